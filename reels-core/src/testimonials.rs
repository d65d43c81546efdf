//! Visibility gate for the CSS-animated testimonial strip
//!
//! The strip scrolls with a pure CSS animation over a track whose items are
//! duplicated once. The gate only toggles the `active` class so the
//! animation runs while the strip is on screen.

use log::{debug, info};
use reels_config::RuntimeConfig;
use reels_config::constants::classes;

use crate::error::{BestEffort, CapabilityResult};
use crate::host::SubscriptionId;

/// The testimonial marquee container and its track.
pub trait TestimonialSurface {
    fn has_marquee(&self) -> bool;
    fn has_track(&self) -> bool;
    /// Items currently in the track (originals plus any clones).
    fn item_count(&self) -> usize;
    /// Whether the track already carries the duplicated items.
    fn is_duplicated(&self) -> bool;
    /// Append clones of the first `count` items and mark the track as
    /// duplicated.
    fn duplicate_items(&mut self, count: usize);
    fn set_track_class(&mut self, class: &str, on: bool);
    /// Observe the marquee container against the viewport shrunk by
    /// `root_margin_bottom` px at the bottom (negative shrinks).
    fn observe_marquee(
        &mut self,
        root_margin_bottom: f64,
    ) -> CapabilityResult<SubscriptionId>;
    fn unobserve(&mut self, id: SubscriptionId) -> CapabilityResult<()>;
}

#[derive(Debug)]
pub struct TestimonialMarquee<T: TestimonialSurface> {
    surface: T,
    observation: Option<SubscriptionId>,
    active: bool,
}

impl<T: TestimonialSurface> TestimonialMarquee<T> {
    /// Duplicate the track once and start observing. `None` when the
    /// marquee or its track is missing.
    pub fn setup(mut surface: T, config: &RuntimeConfig) -> Option<Self> {
        if !surface.has_marquee() || !surface.has_track() {
            debug!("testimonial marquee missing; skipping setup");
            return None;
        }
        if surface.is_duplicated() {
            debug!("testimonial track already duplicated");
        } else {
            let originals = surface.item_count();
            surface.duplicate_items(originals);
            info!("testimonial track duplicated ({originals} items)");
        }
        let observation = surface
            .observe_marquee(config.testimonial_root_margin_bottom())
            .best_effort("testimonial observation");
        Some(Self {
            surface,
            observation,
            active: false,
        })
    }

    /// Apply one intersection entry for the marquee container.
    pub fn on_intersection(&mut self, is_intersecting: bool) {
        if self.observation.is_none() || self.active == is_intersecting {
            return;
        }
        self.active = is_intersecting;
        self.surface.set_track_class(classes::ACTIVE, is_intersecting);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn surface(&self) -> &T {
        &self.surface
    }

    /// Stop observing. The track keeps its items and current class.
    pub fn destroy(&mut self) {
        if let Some(id) = self.observation.take() {
            self.surface
                .unobserve(id)
                .best_effort("testimonial unobserve");
        }
    }
}

impl<T: TestimonialSurface> Drop for TestimonialMarquee<T> {
    fn drop(&mut self) {
        self.destroy();
    }
}
