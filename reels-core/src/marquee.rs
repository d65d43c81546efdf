//! Frame clock for the constant-speed marquee

/// Tracks the previous frame timestamp so the marquee advances by real
/// elapsed time, capped per frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MarqueeClock {
    last_ts: Option<f64>,
}

impl MarqueeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame. The next [`MarqueeClock::delta`] is zero.
    pub fn reset(&mut self) {
        self.last_ts = None;
    }

    /// Record a frame without advancing (marquee suspended).
    pub fn mark(&mut self, ts: f64) {
        self.last_ts = Some(ts);
    }

    /// Timestamp (ms) of the most recent frame, if any since the last reset.
    pub fn last(&self) -> Option<f64> {
        self.last_ts
    }

    /// Seconds since the previous frame, clamped to `[0, max_dt]`.
    pub fn delta(&mut self, ts: f64, max_dt: f64) -> f64 {
        let last = self.last_ts.replace(ts).unwrap_or(ts);
        ((ts - last) / 1000.0).clamp(0.0, max_dt.max(0.0))
    }
}

/// Offset displacement for one marquee frame (the strip moves left).
#[inline]
pub fn advance(offset: f64, speed_px_per_s: f64, dt_s: f64) -> f64 {
    offset - speed_px_per_s * dt_s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_after_reset_is_zero() {
        let mut clock = MarqueeClock::new();
        assert_eq!(clock.delta(500.0, 0.05), 0.0);
        assert!((clock.delta(516.0, 0.05) - 0.016).abs() < 1e-12);
        clock.reset();
        assert_eq!(clock.delta(10_000.0, 0.05), 0.0);
    }

    #[test]
    fn long_gaps_are_capped() {
        let mut clock = MarqueeClock::new();
        clock.mark(0.0);
        assert_eq!(clock.delta(5_000.0, 0.05), 0.05);
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut clock = MarqueeClock::new();
        clock.mark(100.0);
        assert_eq!(clock.delta(90.0, 0.05), 0.0);
    }

    #[test]
    fn advance_moves_left() {
        assert_eq!(advance(-10.0, 80.0, 0.05), -14.0);
    }
}
