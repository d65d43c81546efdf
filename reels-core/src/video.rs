//! Per-card video modes
//!
//! A card video is either idle (paused, muted, looping, parked on a warm
//! frame) or activated (unmuted, non-looping, playing). The controller
//! keeps at most one card activated.

use log::debug;
use reels_config::RuntimeConfig;

use crate::error::BestEffort;
use crate::host::{CardIndex, Video};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoMode {
    #[default]
    Idle,
    Activated,
}

/// Result of a user request to toggle a card's video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Playback started. `muted` is set when the unmuted attempt was
    /// rejected and the muted retry succeeded.
    Playing { muted: bool },
    /// Both attempts were rejected; the host should offer a manual play
    /// affordance.
    Blocked,
    /// The video was playing and has been returned to idle.
    Paused,
}

/// One card of the strip and its optional video.
#[derive(Debug)]
pub struct ReelCard<V> {
    pub index: CardIndex,
    pub video: Option<V>,
    pub mode: VideoMode,
    /// Warm frame not yet applied (waiting for `loadeddata`).
    pub warm_pending: bool,
}

impl<V: Video> ReelCard<V> {
    pub fn new(index: CardIndex, video: Option<V>) -> Self {
        Self {
            index,
            video,
            mode: VideoMode::Idle,
            warm_pending: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.video.as_ref().is_some_and(|v| !v.is_paused())
    }

    pub fn is_activated(&self) -> bool {
        self.mode == VideoMode::Activated && self.is_playing()
    }
}

/// Put a video into its idle presentation. Does not seek.
pub fn park<V: Video>(video: &mut V) {
    video.set_controls(false);
    video.set_muted(true);
    video.set_looping(true);
    video.set_plays_inline(true);
    video.pause();
}

/// Return a (possibly playing) video to idle: paused, muted, looping.
pub fn deactivate<V: Video>(video: &mut V) {
    if !video.is_paused() {
        video.pause();
    }
    video.set_muted(true);
    video.set_looping(true);
}

/// Seek to the configured warm frame. Returns `false` when the duration is
/// not known yet and the seek must wait for `loadeddata`.
pub fn seek_warm_frame<V: Video>(
    video: &mut V,
    card: CardIndex,
    config: &RuntimeConfig,
) -> bool {
    let Some(at) = video.duration().and_then(|d| {
        config
            .warm_frame_anchor()
            .position(d, config.warm_frame_lead())
    }) else {
        return false;
    };
    video
        .seek(at)
        .best_effort(&format!("warm frame seek for {card}"));
    true
}

/// Switch to the activated presentation and start playback, retrying
/// muted when the host rejects unmuted playback.
pub fn activate<V: Video>(
    video: &mut V,
    card: CardIndex,
    config: &RuntimeConfig,
) -> PlaybackOutcome {
    video.set_looping(false);
    video.set_controls(false);
    video.set_muted(false);
    video.set_volume(config.active_volume());

    match video.play() {
        Ok(()) => PlaybackOutcome::Playing { muted: false },
        Err(err) => {
            debug!("{card}: unmuted play rejected ({err}); retrying muted");
            video.set_muted(true);
            match video.play() {
                Ok(()) => PlaybackOutcome::Playing { muted: true },
                Err(err) => {
                    debug!("{card}: muted play rejected ({err})");
                    PlaybackOutcome::Blocked
                }
            }
        }
    }
}
