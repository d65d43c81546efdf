use thiserror::Error;

use crate::runtime::RuntimeConfig;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigGuardRailError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("max_layout_attempts must be at least 1")]
    NoLayoutAttempts,
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Reject values the drivers cannot work with and warn about values that
/// are legal but probably unintended.
pub fn apply_guard_rails(
    config: &RuntimeConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    non_negative("marquee_speed", config.marquee_speed())?;
    non_negative("marquee_max_frame_dt", config.marquee_max_frame_dt())?;
    non_negative("center_duration_ms", config.center_duration_ms())?;
    non_negative("default_gap_px", config.default_gap_px())?;
    non_negative("min_measure_px", config.min_measure_px())?;
    non_negative("warm_frame_lead", config.warm_frame_lead())?;
    finite(
        "testimonial_root_margin_bottom",
        config.testimonial_root_margin_bottom(),
    )?;
    unit_range("active_volume", config.active_volume())?;
    unit_range(
        "card_visibility_threshold",
        config.card_visibility_threshold(),
    )?;

    if config.max_layout_attempts() == 0 {
        return Err(ConfigGuardRailError::NoLayoutAttempts);
    }

    if config.marquee_speed() == 0.0 {
        warnings.push_with_hint(
            "marquee_speed is 0; the strip will never auto-scroll",
            "Set force_reduced_motion = true to disable the marquee explicitly",
        );
    }
    if config.marquee_max_frame_dt() == 0.0 {
        warnings.push("marquee_max_frame_dt is 0; the marquee cannot advance");
    }
    if config.center_duration_ms() < 1.0 {
        warnings.push_with_hint(
            "center_duration_ms below 1ms is raised to 1ms",
            "Centering always animates over at least one frame",
        );
    }

    Ok(warnings)
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigGuardRailError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigGuardRailError::NotFinite { field, value })
    }
}

fn non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), ConfigGuardRailError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigGuardRailError::Negative { field, value });
    }
    Ok(())
}

fn unit_range(
    field: &'static str,
    value: f64,
) -> Result<(), ConfigGuardRailError> {
    finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigGuardRailError::OutOfUnitRange { field, value });
    }
    Ok(())
}
