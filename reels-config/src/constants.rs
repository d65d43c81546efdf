//! Reels carousel constants
//!
//! Compiled defaults for every tunable of the reels carousel and the
//! testimonial marquee gate. `RuntimeConfig` falls back to these when an
//! override is absent, so tuning the defaults should happen here.

/// Continuous marquee defaults.
pub mod marquee {
    /// Constant marquee speed in px/s.
    pub const SPEED_PX_PER_S: f64 = 80.0;
    /// Upper bound for a single frame delta (s). Prevents large jumps after
    /// the host throttles frames (e.g. a backgrounded tab).
    pub const MAX_FRAME_DT_S: f64 = 0.05;
}

/// Centering tween defaults.
pub mod tween {
    /// Duration (ms) of the tween that centers an activated card.
    pub const CENTER_DURATION_MS: f64 = 520.0;
    /// Shortest accepted tween duration (ms).
    pub const MIN_DURATION_MS: f64 = 1.0;
    /// Easing kind: 0=Linear, 1=EaseIn, 2=EaseOut, 3=EaseInOut, 4=EaseOutCubic.
    pub const EASING_KIND: u8 = 4;
}

/// Layout measurement defaults.
pub mod layout {
    /// Gap (px) used when the track's computed `gap` cannot be parsed.
    pub const DEFAULT_GAP_PX: f64 = 16.0;
    /// A first card narrower or shorter than this (px) is treated as not yet
    /// laid out.
    pub const MIN_MEASURE_PX: f64 = 2.0;
    /// Frames to keep retrying layout before giving up.
    pub const MAX_LAYOUT_ATTEMPTS: u32 = 60;
}

/// Per-card video defaults.
pub mod video {
    /// Distance (s) between the warm frame and the clip boundary.
    pub const WARM_FRAME_LEAD_S: f64 = 0.05;
    /// Minimum `readyState` (HAVE_CURRENT_DATA) at which the warm frame can be
    /// seeked immediately instead of waiting for `loadeddata`.
    pub const WARM_FRAME_READY_STATE: u8 = 2;
    /// Volume applied when a card's video is activated.
    pub const ACTIVE_VOLUME: f64 = 1.0;
}

/// Intersection observation defaults.
pub mod visibility {
    /// Threshold passed to the host when observing reel cards.
    pub const CARD_THRESHOLD: f64 = 0.15;
    /// Bottom root margin (px) used for the testimonial marquee observer.
    pub const TESTIMONIAL_ROOT_MARGIN_BOTTOM_PX: f64 = -100.0;
}

/// Class names toggled on host elements.
pub mod classes {
    /// Set on a reel card while its video plays.
    pub const IS_PLAYING: &str = "is-playing";
    /// Set on the reel track while a drag is in progress.
    pub const IS_DRAGGING: &str = "is-dragging";
    /// Set on the testimonial track while its marquee is in view.
    pub const ACTIVE: &str = "active";
}

/// Environment variable naming a TOML file with runtime overrides.
pub const CONFIG_PATH_ENV: &str = "REELS_CONFIG";
