//! Time-based tween toward a target offset

use reels_config::EasingKind;
use reels_config::constants::tween as defaults;

use crate::host::CardIndex;

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: f64,
    target: f64,
    /// Host timestamp (ms) of the first frame that sampled this tween.
    started_at: Option<f64>,
    duration_ms: f64,
    easing: EasingKind,
    /// Card being centered, if any.
    card: Option<CardIndex>,
}

impl Tween {
    /// A tween from `start` to `target`. Unless anchored with
    /// [`Tween::anchored_at`], the clock starts on the first
    /// [`Tween::sample`].
    pub fn new(
        start: f64,
        target: f64,
        duration_ms: f64,
        easing: EasingKind,
    ) -> Self {
        Self {
            start,
            target,
            started_at: None,
            duration_ms: duration_ms.max(defaults::MIN_DURATION_MS),
            easing,
            card: None,
        }
    }

    pub fn centering(mut self, card: CardIndex) -> Self {
        self.card = Some(card);
        self
    }

    pub fn card(&self) -> Option<CardIndex> {
        self.card
    }

    /// Start the clock at host time `ts` instead of the first sample.
    pub fn anchored_at(mut self, ts: f64) -> Self {
        self.started_at = Some(ts);
        self
    }

    /// Linear progress in `[0, 1]` at host time `now`.
    pub fn progress(&self, now: f64) -> f64 {
        match self.started_at {
            Some(t0) => ((now - t0) / self.duration_ms).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    /// Un-normalized offset at linear progress `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        let eased = self.easing.apply(t);
        if eased >= 1.0 {
            return self.target;
        }
        self.start + (self.target - self.start) * eased
    }

    /// Advance to host time `now`. Returns the un-normalized offset and
    /// whether the tween has finished.
    pub fn sample(&mut self, now: f64) -> (f64, bool) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        let t = self.progress(now);
        (self.value_at(t), t >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_start_and_last_is_target() {
        let mut tween = Tween::new(-300.0, -84.0, 520.0, EasingKind::EaseOutCubic);
        assert_eq!(tween.sample(1000.0), (-300.0, false));
        let (v, done) = tween.sample(1520.0);
        assert!(done);
        assert_eq!(v, -84.0);
    }

    #[test]
    fn ease_out_cubic_is_monotonic_without_overshoot() {
        for (start, target) in [(-500.0, -20.0), (-20.0, -700.0), (0.0, 1e4)] {
            let mut tween =
                Tween::new(start, target, 520.0, EasingKind::EaseOutCubic);
            let mut prev = tween.sample(0.0).0;
            let dir = (target - start).signum();
            let mut now = 0.0;
            loop {
                now += 7.3;
                let (v, done) = tween.sample(now);
                assert!((v - prev) * dir >= 0.0, "reversal at {now}");
                assert!((target - v) * dir >= 0.0, "overshoot at {now}");
                prev = v;
                if done {
                    assert_eq!(v, target);
                    break;
                }
            }
        }
    }

    #[test]
    fn duration_is_at_least_one_ms() {
        let mut tween = Tween::new(0.0, 10.0, 0.0, EasingKind::Linear);
        assert_eq!(tween.sample(5.0), (0.0, false));
        assert_eq!(tween.sample(6.0), (10.0, true));
    }

    #[test]
    fn anchored_tween_is_already_moving_on_first_sample() {
        let mut tween = Tween::new(0.0, 100.0, 100.0, EasingKind::Linear)
            .anchored_at(0.0);
        let (v, done) = tween.sample(16.0);
        assert!(!done);
        assert!((v - 16.0).abs() < 1e-9);
    }

    #[test]
    fn midpoint_uses_easing() {
        let mut tween = Tween::new(0.0, 100.0, 100.0, EasingKind::EaseOutCubic);
        tween.sample(0.0);
        let (v, done) = tween.sample(50.0);
        assert!(!done);
        assert!((v - 87.5).abs() < 1e-9);
    }
}
