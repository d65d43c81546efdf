//! Strip geometry: wrap arithmetic, measurement and card placement.

use serde::Serialize;

use crate::host::{CardIndex, Rect};

/// Normalize `value` into the half-open band `[min, max)`.
///
/// Values already inside the band are returned untouched, which keeps
/// `wrap` exactly idempotent. A degenerate band (`max == min`) and
/// non-finite input collapse to `min`.
pub fn wrap(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 || !value.is_finite() {
        return min;
    }
    if value >= min && value < max {
        return value;
    }
    let mut v = (value - min) % range;
    if v < 0.0 {
        v += range;
    }
    let wrapped = v + min;
    // `v + range` or `v + min` can round up onto the excluded bound.
    if wrapped >= max { min } else { wrapped }
}

/// Parse a CSS pixel length the way `parseFloat` does: the longest leading
/// numeric prefix wins, trailing units and extra values are ignored.
pub fn parse_px(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => {
                // Only consume the exponent if digits follow it.
                let mut look = end + 1;
                if matches!(bytes.get(look), Some(b'+' | b'-')) {
                    look += 1;
                }
                if !matches!(bytes.get(look), Some(b'0'..=b'9')) {
                    break;
                }
                seen_exp = true;
                end = look;
                continue;
            }
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Settled size of the first card plus the track gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub width: f64,
    pub height: f64,
    pub gap: f64,
}

impl Measurement {
    /// Accept a first-card box only once it is at least `min_px` in both
    /// dimensions; an unparsable gap falls back to `default_gap`.
    pub fn from_rect(
        rect: Rect,
        gap: Option<&str>,
        min_px: f64,
        default_gap: f64,
    ) -> Option<Self> {
        let width = rect.width.max(0.0);
        let height = rect.height.max(0.0);
        if !(width >= min_px && height >= min_px) {
            return None;
        }
        let gap = gap.and_then(parse_px).unwrap_or(default_gap);
        Some(Self { width, height, gap })
    }
}

/// Geometry of the looping strip. `offset` always lies in `[-total, 0)`
/// once the layout is ready.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayoutState {
    pub width: f64,
    pub height: f64,
    pub gap: f64,
    pub step: f64,
    pub total: f64,
    pub offset: f64,
}

impl LayoutState {
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.step > 0.0 && self.total > 0.0
    }

    /// Adopt a new measurement for `card_count` cards, keeping the current
    /// offset (re-normalized into the new band).
    pub fn apply(&mut self, m: Measurement, card_count: usize) {
        self.width = m.width;
        self.height = m.height;
        self.gap = m.gap;
        self.step = m.width + m.gap;
        self.total = self.step * card_count as f64;
        self.normalize();
    }

    /// Set a raw offset and normalize it.
    pub fn set_offset(&mut self, raw: f64) {
        self.offset = raw;
        self.normalize();
    }

    pub fn normalize(&mut self) {
        if self.total > 0.0 {
            self.offset = wrap(self.offset, -self.total, 0.0);
        }
    }

    /// Horizontal translation of card `i`, inside `[-step, total - step)`.
    #[inline]
    pub fn card_position(&self, card: CardIndex) -> f64 {
        let base = card.0 as f64 * self.step;
        wrap(base + self.offset, -self.step, self.total - self.step)
    }
}
