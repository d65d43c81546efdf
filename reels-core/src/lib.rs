//! Headless controller for an infinitely looping, draggable strip of video
//! reel cards.
//!
//! The strip scrolls on its own as a marquee, can be dragged with a
//! pointer, and centers a card with a short tween when its video starts
//! playing. At most one card video plays with sound; every other video
//! stays parked (paused, muted, looping) on a warm frame.
//!
//! Nothing here touches a document or a clock. The embedding host
//! implements [`Surface`] and [`Video`], forwards input and animation
//! frames as [`CarouselEvent`]s, and renders whatever the controller writes
//! back. [`sim`] provides an in-memory host.
//!
//! ```
//! use reels_config::RuntimeConfig;
//! use reels_core::sim::SimSurface;
//! use reels_core::{CarouselEvent, ReelsCarousel, sim::SimVideo};
//!
//! let surface = SimSurface::new(6, 200.0, 356.0, 16.0);
//! let videos: Vec<Option<SimVideo>> = Vec::new();
//! let mut reels =
//!     ReelsCarousel::setup(surface, videos, RuntimeConfig::default())
//!         .expect("reel markup present");
//! reels.update(CarouselEvent::Frame(0.0));
//! reels.update(CarouselEvent::Frame(16.0));
//! assert!(reels.offset() < 0.0);
//! ```

pub mod controller;
pub mod drag;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod marquee;
pub mod motion;
pub mod sim;
pub mod subscription;
pub mod testimonials;
pub mod tween;
pub mod video;
pub mod visibility;

pub use controller::{Playback, ReelsCarousel};
pub use drag::{PointerInput, PointerTarget};
pub use error::{BestEffort, CapabilityError, CapabilityResult};
pub use event::{CarouselEvent, ClickTarget, VideoEvent};
pub use geometry::{LayoutState, Measurement};
pub use host::{
    CardIndex, HostEvent, PointerId, Rect, SubscriptionId, Surface, Video,
};
pub use motion::MotionState;
pub use testimonials::{TestimonialMarquee, TestimonialSurface};
pub use video::{PlaybackOutcome, VideoMode};
pub use visibility::IntersectionEntry;
