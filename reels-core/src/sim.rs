//! In-memory host used by the `reels-sim` binary and the test suites.
//!
//! [`SimSurface`], [`SimVideo`] and [`SimTestimonials`] implement the
//! capability traits over plain fields and record every host-visible write
//! into a shared [`Journal`], so ordering can be asserted after the fact.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::error::{CapabilityError, CapabilityResult};
use crate::host::{
    CardIndex, HostEvent, PointerId, Rect, SubscriptionId, Surface, Video,
};
use crate::testimonials::TestimonialSurface;

/// Append-only log of host writes shared between sim objects.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Index of the first entry equal to `entry`.
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == entry)
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.position(entry).is_some()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// A track of equally sized cards inside a carousel viewport.
#[derive(Debug)]
pub struct SimSurface {
    journal: Journal,
    has_track: bool,
    has_carousel: bool,
    card_count: usize,
    card_width: f64,
    card_height: f64,
    gap: Option<String>,
    viewport: Rect,
    reduced_motion: CapabilityResult<bool>,
    capture_fails: bool,
    offsets: Vec<Option<f64>>,
    card_classes: Vec<BTreeSet<String>>,
    track_classes: BTreeSet<String>,
    track_height: Option<f64>,
    captured: Option<PointerId>,
    subscriptions: BTreeMap<SubscriptionId, HostEvent>,
    next_subscription: u64,
}

impl SimSurface {
    /// `card_count` cards of `width`×`height` separated by `gap` px, shown
    /// in a 1000px wide viewport.
    pub fn new(card_count: usize, width: f64, height: f64, gap: f64) -> Self {
        Self {
            journal: Journal::new(),
            has_track: true,
            has_carousel: true,
            card_count,
            card_width: width,
            card_height: height,
            gap: Some(format!("{gap}px")),
            viewport: Rect::new(0.0, 0.0, 1000.0, height),
            reduced_motion: Ok(false),
            capture_fails: false,
            offsets: vec![None; card_count],
            card_classes: vec![BTreeSet::new(); card_count],
            track_classes: BTreeSet::new(),
            track_height: None,
            captured: None,
            subscriptions: BTreeMap::new(),
            next_subscription: 1,
        }
    }

    /// A page without the reel markup.
    pub fn missing_track() -> Self {
        let mut surface = Self::new(0, 0.0, 0.0, 0.0);
        surface.has_track = false;
        surface
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_raw_gap(mut self, gap: Option<&str>) -> Self {
        self.gap = gap.map(str::to_owned);
        self
    }

    pub fn with_reduced_motion(mut self, preference: bool) -> Self {
        self.reduced_motion = Ok(preference);
        self
    }

    /// The host cannot answer the reduced-motion query.
    pub fn without_media_queries(mut self) -> Self {
        self.reduced_motion = Err(CapabilityError::Unsupported);
        self
    }

    pub fn with_failing_capture(mut self) -> Self {
        self.capture_fails = true;
        self
    }

    /// Resize every card (0×0 models a card that is not laid out yet).
    pub fn set_card_size(&mut self, width: f64, height: f64) {
        self.card_width = width;
        self.card_height = height;
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    pub fn card_offset(&self, card: CardIndex) -> Option<f64> {
        self.offsets.get(card.0).copied().flatten()
    }

    pub fn card_has_class(&self, card: CardIndex, class: &str) -> bool {
        self.card_classes
            .get(card.0)
            .is_some_and(|classes| classes.contains(class))
    }

    pub fn track_has_class(&self, class: &str) -> bool {
        self.track_classes.contains(class)
    }

    pub fn track_height(&self) -> Option<f64> {
        self.track_height
    }

    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }

    pub fn active_subscriptions(&self) -> Vec<HostEvent> {
        self.subscriptions.values().copied().collect()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }
}

impl Surface for SimSurface {
    fn has_track(&self) -> bool {
        self.has_track
    }

    fn has_carousel(&self) -> bool {
        self.has_carousel
    }

    fn card_count(&self) -> usize {
        self.card_count
    }

    fn card_rect(&self, card: CardIndex) -> CapabilityResult<Rect> {
        if card.0 >= self.card_count {
            return Err(CapabilityError::Host(format!("no {card}")));
        }
        let x = self.card_offset(card).unwrap_or_default();
        Ok(Rect::new(
            self.viewport.left + x,
            self.viewport.top,
            self.card_width,
            self.card_height,
        ))
    }

    fn carousel_rect(&self) -> CapabilityResult<Rect> {
        Ok(self.viewport)
    }

    fn track_gap(&self) -> Option<String> {
        self.gap.clone()
    }

    fn prefers_reduced_motion(&self) -> CapabilityResult<bool> {
        self.reduced_motion.clone()
    }

    fn set_track_height(&mut self, px: f64) {
        self.track_height = Some(px);
        self.journal.push(format!("track height {px}"));
    }

    fn set_card_offset(&mut self, card: CardIndex, x: f64) {
        if let Some(slot) = self.offsets.get_mut(card.0) {
            *slot = Some(x);
        }
    }

    fn set_card_class(&mut self, card: CardIndex, class: &str, on: bool) {
        let Some(classes) = self.card_classes.get_mut(card.0) else {
            return;
        };
        let changed = if on {
            classes.insert(class.to_owned())
        } else {
            classes.remove(class)
        };
        if changed {
            let sign = if on { '+' } else { '-' };
            self.journal.push(format!("{card} {sign}{class}"));
        }
    }

    fn set_track_class(&mut self, class: &str, on: bool) {
        let changed = if on {
            self.track_classes.insert(class.to_owned())
        } else {
            self.track_classes.remove(class)
        };
        if changed {
            let sign = if on { '+' } else { '-' };
            self.journal.push(format!("track {sign}{class}"));
        }
    }

    fn capture_pointer(&mut self, pointer: PointerId) -> CapabilityResult<()> {
        if self.capture_fails {
            return Err(CapabilityError::Unsupported);
        }
        self.captured = Some(pointer);
        Ok(())
    }

    fn release_pointer(&mut self, pointer: PointerId) -> CapabilityResult<()> {
        if self.captured != Some(pointer) {
            return Err(CapabilityError::NotReady);
        }
        self.captured = None;
        Ok(())
    }

    fn subscribe(&mut self, event: HostEvent) -> CapabilityResult<SubscriptionId> {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id, event);
        Ok(id)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> CapabilityResult<()> {
        self.subscriptions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CapabilityError::Host(format!("unknown {id:?}")))
    }
}

/// How a [`SimVideo`] answers `play()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayPolicy {
    #[default]
    Allow,
    /// Autoplay policy: only muted playback may start.
    RejectUnmuted,
    RejectAll,
}

#[derive(Debug)]
pub struct SimVideo {
    card: CardIndex,
    journal: Journal,
    pub paused: bool,
    pub muted: bool,
    pub looping: bool,
    pub controls: bool,
    pub plays_inline: bool,
    pub volume: f64,
    pub duration: Option<f64>,
    pub ready_state: u8,
    pub current_time: f64,
    pub policy: PlayPolicy,
}

impl SimVideo {
    /// A loaded clip of `duration` seconds with default element state.
    pub fn new(card: CardIndex, journal: &Journal, duration: f64) -> Self {
        Self {
            card,
            journal: journal.clone(),
            paused: true,
            muted: false,
            looping: false,
            controls: true,
            plays_inline: false,
            volume: 1.0,
            duration: Some(duration),
            ready_state: 4,
            current_time: 0.0,
            policy: PlayPolicy::Allow,
        }
    }

    /// A clip whose metadata has not arrived yet.
    pub fn unloaded(card: CardIndex, journal: &Journal) -> Self {
        let mut video = Self::new(card, journal, 0.0);
        video.duration = None;
        video.ready_state = 0;
        video
    }

    pub fn with_policy(mut self, policy: PlayPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Metadata and first frame arrive.
    pub fn load(&mut self, duration: f64) {
        self.duration = Some(duration);
        self.ready_state = 4;
    }

    /// Playback reaches the end of a non-looping clip.
    pub fn finish(&mut self) {
        self.paused = true;
        self.journal.push(format!("video{} ended", self.card.0));
    }

    /// Playback started by the host itself (native controls, scripts).
    pub fn start_externally(&mut self) {
        self.paused = false;
        self.journal.push(format!("video{} play", self.card.0));
    }
}

impl Video for SimVideo {
    fn is_paused(&self) -> bool {
        self.paused
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn ready_state(&self) -> u8 {
        self.ready_state
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_controls(&mut self, controls: bool) {
        self.controls = controls;
    }

    fn set_plays_inline(&mut self, inline: bool) {
        self.plays_inline = inline;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn play(&mut self) -> CapabilityResult<()> {
        let rejected = match self.policy {
            PlayPolicy::Allow => false,
            PlayPolicy::RejectUnmuted => !self.muted,
            PlayPolicy::RejectAll => true,
        };
        if rejected {
            self.journal.push(format!("video{} play rejected", self.card.0));
            return Err(CapabilityError::Rejected("autoplay policy".into()));
        }
        self.paused = false;
        self.journal.push(format!("video{} play", self.card.0));
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.journal.push(format!("video{} pause", self.card.0));
        }
        self.paused = true;
    }

    fn seek(&mut self, seconds: f64) -> CapabilityResult<()> {
        if self.ready_state == 0 {
            return Err(CapabilityError::NotReady);
        }
        self.current_time = seconds;
        self.journal
            .push(format!("video{} seek {seconds:.3}", self.card.0));
        Ok(())
    }
}

/// Testimonial marquee markup with `items` original entries.
#[derive(Debug)]
pub struct SimTestimonials {
    pub present: bool,
    pub items: usize,
    pub duplicated: bool,
    pub track_classes: BTreeSet<String>,
    pub observed_margin: Option<f64>,
    next_id: u64,
}

impl SimTestimonials {
    pub fn new(items: usize) -> Self {
        Self {
            present: true,
            items,
            duplicated: false,
            track_classes: BTreeSet::new(),
            observed_margin: None,
            next_id: 1,
        }
    }

    pub fn track_has_class(&self, class: &str) -> bool {
        self.track_classes.contains(class)
    }
}

impl TestimonialSurface for SimTestimonials {
    fn has_marquee(&self) -> bool {
        self.present
    }

    fn has_track(&self) -> bool {
        self.present
    }

    fn item_count(&self) -> usize {
        self.items
    }

    fn is_duplicated(&self) -> bool {
        self.duplicated
    }

    fn duplicate_items(&mut self, count: usize) {
        self.items += count.min(self.items);
        self.duplicated = true;
    }

    fn set_track_class(&mut self, class: &str, on: bool) {
        if on {
            self.track_classes.insert(class.to_owned());
        } else {
            self.track_classes.remove(class);
        }
    }

    fn observe_marquee(
        &mut self,
        root_margin_bottom: f64,
    ) -> CapabilityResult<SubscriptionId> {
        self.observed_margin = Some(root_margin_bottom);
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        Ok(id)
    }

    fn unobserve(&mut self, _id: SubscriptionId) -> CapabilityResult<()> {
        self.observed_margin = None;
        Ok(())
    }
}
