//! Capability traits implemented by the embedding host.
//!
//! The carousel never touches a document directly. A host (a wasm binding,
//! a native toolkit, or [`crate::sim`]) implements [`Surface`] for the
//! track and its cards and [`Video`] for each embedded video element, then
//! forwards input through [`crate::ReelsCarousel::update`].

use serde::Serialize;

use crate::error::CapabilityResult;

/// Position of a card in the strip, `0..card_count`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
pub struct CardIndex(pub usize);

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// Pointer identifier as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// Opaque handle returned by [`Surface::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Viewport-relative box of a rendered element (px).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Host events the carousel listens to. Each subscription is torn down
/// when the carousel is destroyed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    AnimationFrame,
    Resize,
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    Click,
    VideoPlay,
    VideoPause,
    VideoEnded,
    /// One-shot `loadeddata` for a card whose warm frame is still pending.
    VideoLoadedData(CardIndex),
    /// Intersection observation of every card at the given threshold.
    CardIntersection { threshold: f64 },
}

/// The reel track, its container and its cards.
pub trait Surface {
    fn has_track(&self) -> bool;
    fn has_carousel(&self) -> bool;
    fn card_count(&self) -> usize;

    /// Rendered box of a card.
    fn card_rect(&self, card: CardIndex) -> CapabilityResult<Rect>;
    /// Rendered box of the carousel container (the visible viewport).
    fn carousel_rect(&self) -> CapabilityResult<Rect>;
    /// Raw computed `gap` of the track (e.g. `"16px"`), if any.
    fn track_gap(&self) -> Option<String>;
    fn prefers_reduced_motion(&self) -> CapabilityResult<bool>;

    fn set_track_height(&mut self, px: f64);
    /// Place a card at horizontal translation `x` (px).
    fn set_card_offset(&mut self, card: CardIndex, x: f64);
    fn set_card_class(&mut self, card: CardIndex, class: &str, on: bool);
    fn set_track_class(&mut self, class: &str, on: bool);

    fn capture_pointer(&mut self, pointer: PointerId) -> CapabilityResult<()>;
    fn release_pointer(&mut self, pointer: PointerId) -> CapabilityResult<()>;

    fn subscribe(&mut self, event: HostEvent)
    -> CapabilityResult<SubscriptionId>;
    fn unsubscribe(&mut self, id: SubscriptionId) -> CapabilityResult<()>;
}

/// Playback control of one card video.
pub trait Video {
    fn is_paused(&self) -> bool;
    /// Clip length in seconds, `None` until metadata is known.
    fn duration(&self) -> Option<f64>;
    /// HTML media `readyState` (0..=4).
    fn ready_state(&self) -> u8;

    fn set_muted(&mut self, muted: bool);
    fn set_looping(&mut self, looping: bool);
    fn set_controls(&mut self, controls: bool);
    fn set_plays_inline(&mut self, inline: bool);
    fn set_volume(&mut self, volume: f64);

    /// Start playback. Hosts report autoplay-policy refusals as
    /// [`crate::CapabilityError::Rejected`].
    fn play(&mut self) -> CapabilityResult<()>;
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64) -> CapabilityResult<()>;
}
