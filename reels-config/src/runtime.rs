//! Runtime configuration for user-adjustable constants
//!
//! `RuntimeConfig` carries `Option<T>` fields that override the compiled
//! defaults in [`crate::constants`]. Accessor methods fall back to the
//! constants when a field is `None`, so an empty TOML file (or
//! `RuntimeConfig::default()`) reproduces the stock behavior.

use serde::Deserialize;

use crate::constants::{layout, marquee, tween, video, visibility};

/// Easing function type for animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingKind {
    Linear = 0,
    EaseIn = 1,
    EaseOut = 2,
    EaseInOut = 3,
    #[default]
    EaseOutCubic = 4,
}

impl EasingKind {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Linear,
            1 => Self::EaseIn,
            2 => Self::EaseOut,
            3 => Self::EaseInOut,
            _ => Self::EaseOutCubic,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub const ALL: [Self; 5] = [
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::EaseOutCubic,
    ];

    /// Map linear progress `t` in [0, 1] to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

impl std::fmt::Display for EasingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::EaseIn => write!(f, "Ease In"),
            Self::EaseOut => write!(f, "Ease Out"),
            Self::EaseInOut => write!(f, "Ease In/Out"),
            Self::EaseOutCubic => write!(f, "Ease Out (cubic)"),
        }
    }
}

/// Where the idle warm frame of a card video sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarmFrameAnchor {
    /// `lead` seconds before the natural end of the clip.
    #[default]
    End,
    /// `lead` seconds into the clip, pulled back for very short clips.
    Start,
}

impl WarmFrameAnchor {
    /// Seek position (s) for a clip of `duration` seconds, or `None` when the
    /// duration is unknown.
    pub fn position(self, duration: f64, lead: f64) -> Option<f64> {
        if !duration.is_finite() || duration <= 0.0 {
            return None;
        }
        let before_end = (duration - lead).max(0.0);
        Some(match self {
            Self::End => before_end,
            Self::Start => lead.min(before_end),
        })
    }
}

/// Runtime configuration with optional overrides for constants.
/// Fields are None by default, falling back to compiled constants.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    // ========== MARQUEE ==========
    /// Marquee speed (px/s)
    pub marquee_speed: Option<f64>,
    /// Per-frame delta cap (s)
    pub marquee_max_frame_dt: Option<f64>,

    // ========== TWEEN ==========
    /// Centering tween duration (ms)
    pub center_duration_ms: Option<f64>,
    /// Centering tween easing
    pub center_easing: Option<EasingKind>,

    // ========== LAYOUT ==========
    /// Gap fallback (px)
    pub default_gap_px: Option<f64>,
    /// Minimum measured card size (px)
    pub min_measure_px: Option<f64>,
    /// Layout retry budget (frames)
    pub max_layout_attempts: Option<u32>,

    // ========== VIDEO ==========
    /// Warm frame lead (s)
    pub warm_frame_lead: Option<f64>,
    /// Warm frame anchor
    pub warm_frame_anchor: Option<WarmFrameAnchor>,
    /// Volume for activated videos
    pub active_volume: Option<f64>,

    // ========== VISIBILITY ==========
    /// Intersection threshold for reel cards
    pub card_visibility_threshold: Option<f64>,
    /// Bottom root margin (px) for the testimonial observer
    pub testimonial_root_margin_bottom: Option<f64>,

    // ========== ACCESSIBILITY ==========
    /// Force reduced motion regardless of the host preference
    pub force_reduced_motion: Option<bool>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== MARQUEE ACCESSORS ==========

    pub fn marquee_speed(&self) -> f64 {
        self.marquee_speed.unwrap_or(marquee::SPEED_PX_PER_S)
    }

    pub fn marquee_max_frame_dt(&self) -> f64 {
        self.marquee_max_frame_dt.unwrap_or(marquee::MAX_FRAME_DT_S)
    }

    // ========== TWEEN ACCESSORS ==========

    pub fn center_duration_ms(&self) -> f64 {
        self.center_duration_ms.unwrap_or(tween::CENTER_DURATION_MS)
    }

    pub fn center_easing(&self) -> EasingKind {
        self.center_easing
            .unwrap_or_else(|| EasingKind::from_u8(tween::EASING_KIND))
    }

    // ========== LAYOUT ACCESSORS ==========

    pub fn default_gap_px(&self) -> f64 {
        self.default_gap_px.unwrap_or(layout::DEFAULT_GAP_PX)
    }

    pub fn min_measure_px(&self) -> f64 {
        self.min_measure_px.unwrap_or(layout::MIN_MEASURE_PX)
    }

    pub fn max_layout_attempts(&self) -> u32 {
        self.max_layout_attempts
            .unwrap_or(layout::MAX_LAYOUT_ATTEMPTS)
    }

    // ========== VIDEO ACCESSORS ==========

    pub fn warm_frame_lead(&self) -> f64 {
        self.warm_frame_lead.unwrap_or(video::WARM_FRAME_LEAD_S)
    }

    pub fn warm_frame_anchor(&self) -> WarmFrameAnchor {
        self.warm_frame_anchor.unwrap_or_default()
    }

    pub fn active_volume(&self) -> f64 {
        self.active_volume.unwrap_or(video::ACTIVE_VOLUME)
    }

    // ========== VISIBILITY ACCESSORS ==========

    pub fn card_visibility_threshold(&self) -> f64 {
        self.card_visibility_threshold
            .unwrap_or(visibility::CARD_THRESHOLD)
    }

    pub fn testimonial_root_margin_bottom(&self) -> f64 {
        self.testimonial_root_margin_bottom
            .unwrap_or(visibility::TESTIMONIAL_ROOT_MARGIN_BOTTOM_PX)
    }

    pub fn force_reduced_motion(&self) -> bool {
        self.force_reduced_motion.unwrap_or(false)
    }
}
