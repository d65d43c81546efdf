//! Shared configuration for the reels carousel.
//!
//! This crate holds the compiled defaults, the `RuntimeConfig` override
//! layer, TOML loading and the guard rails that keep overrides within what
//! the carousel drivers can handle. `reels-core` consumes `RuntimeConfig`
//! directly; hosts usually obtain one through [`ConfigLoader`].

pub mod constants;
pub mod loader;
pub mod runtime;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use runtime::{EasingKind, RuntimeConfig, WarmFrameAnchor};
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};
