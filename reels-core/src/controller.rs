//! `ReelsCarousel`: the looping reel strip controller
//!
//! Owns the strip geometry, the motion state machine and the per-card
//! video modes. The host feeds it [`CarouselEvent`]s one at a time; every
//! visual change is written back through the [`Surface`] and [`Video`]
//! capabilities.

use log::{debug, info, trace, warn};
use reels_config::RuntimeConfig;
use reels_config::constants::{classes, video as video_cfg};

use crate::drag::{DragSession, PointerInput};
use crate::error::BestEffort;
use crate::event::{CarouselEvent, VideoEvent};
use crate::geometry::{LayoutState, Measurement};
use crate::host::{CardIndex, HostEvent, PointerId, Surface, Video};
use crate::layout::LayoutRetry;
use crate::motion::{Motion, MotionState};
use crate::subscription::Subscriptions;
use crate::tween::Tween;
use crate::video::{self, PlaybackOutcome, ReelCard, VideoMode};
use crate::visibility::IntersectionEntry;

/// Playback feedback for a click that toggled a card video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    pub card: CardIndex,
    pub outcome: PlaybackOutcome,
}

#[derive(Debug)]
pub struct ReelsCarousel<S: Surface, V: Video> {
    surface: S,
    cards: Vec<ReelCard<V>>,
    layout: LayoutState,
    retry: LayoutRetry,
    motion: Motion,
    config: RuntimeConfig,
    subscriptions: Subscriptions,
    destroyed: bool,
}

impl<S: Surface, V: Video> ReelsCarousel<S, V> {
    /// Wire the carousel to `surface`. `videos[i]` is the video embedded in
    /// card `i`, if any.
    ///
    /// Returns `None` (and leaves the surface untouched) when the track,
    /// its carousel container or its cards are missing.
    pub fn setup(
        surface: S,
        videos: Vec<Option<V>>,
        config: RuntimeConfig,
    ) -> Option<Self> {
        if !surface.has_track() || !surface.has_carousel() {
            debug!("reels carousel: no track or container; skipping setup");
            return None;
        }
        let count = surface.card_count();
        if count == 0 {
            debug!("reels carousel: no cards; skipping setup");
            return None;
        }
        if videos.len() > count {
            warn!(
                "reels carousel: {} videos for {count} cards; extras ignored",
                videos.len()
            );
        }

        let reduced_motion = config.force_reduced_motion()
            || surface
                .prefers_reduced_motion()
                .best_effort("reduced-motion query")
                .unwrap_or(false);

        let mut videos = videos.into_iter();
        let cards = (0..count)
            .map(|i| ReelCard::new(CardIndex(i), videos.next().flatten()))
            .collect();

        let mut carousel = Self {
            surface,
            cards,
            layout: LayoutState::default(),
            retry: LayoutRetry::new(config.max_layout_attempts()),
            motion: Motion::new(
                reduced_motion,
                config.marquee_speed(),
                config.marquee_max_frame_dt(),
            ),
            config,
            subscriptions: Subscriptions::new(),
            destroyed: false,
        };

        carousel.schedule_layout();
        carousel.init_videos();
        carousel.subscribe_host_events();

        info!(
            "reels carousel ready: {count} cards, reduced_motion={reduced_motion}"
        );
        Some(carousel)
    }

    // ========== ACCESSORS ==========

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn offset(&self) -> f64 {
        self.layout.offset
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn motion_state(&self) -> &MotionState {
        self.motion.state()
    }

    pub fn is_marquee_running(&self) -> bool {
        self.motion.is_marquee_running()
    }

    pub fn is_dragging(&self) -> bool {
        self.motion.is_dragging()
    }

    pub fn is_layout_pending(&self) -> bool {
        self.retry.is_pending()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn video(&self, card: CardIndex) -> Option<&V> {
        self.cards.get(card.0)?.video.as_ref()
    }

    pub fn video_mut(&mut self, card: CardIndex) -> Option<&mut V> {
        self.cards.get_mut(card.0)?.video.as_mut()
    }

    pub fn video_mode(&self, card: CardIndex) -> Option<VideoMode> {
        self.cards.get(card.0).map(|c| c.mode)
    }

    pub fn any_video_playing(&self) -> bool {
        self.cards.iter().any(ReelCard::is_playing)
    }

    /// Cards whose video is currently playing in the activated mode.
    pub fn activated_cards(&self) -> Vec<CardIndex> {
        self.cards
            .iter()
            .filter(|c| c.is_activated())
            .map(|c| c.index)
            .collect()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    // ========== EVENT DISPATCH ==========

    /// Handle one host event. Returns playback feedback when a click
    /// toggled a card video.
    pub fn update(&mut self, event: CarouselEvent) -> Option<Playback> {
        if self.destroyed {
            trace!("reels carousel destroyed; dropping {event:?}");
            return None;
        }
        match event {
            CarouselEvent::Frame(ts) => self.on_frame(ts),
            CarouselEvent::Resize => self.schedule_layout(),
            CarouselEvent::PointerDown(input) => self.on_pointer_down(input),
            CarouselEvent::PointerMove(input) => self.on_pointer_move(input),
            CarouselEvent::PointerUp(input)
            | CarouselEvent::PointerCancel(input) => {
                self.stop_drag(input.pointer)
            }
            CarouselEvent::Click(target) => {
                let card = target.card()?;
                let outcome = self.toggle_video(card)?;
                return Some(Playback { card, outcome });
            }
            CarouselEvent::Video(card, event) => {
                self.on_video_event(card, event)
            }
            CarouselEvent::Intersection(entries) => {
                self.on_intersection(&entries)
            }
        }
        None
    }

    fn subscribe_host_events(&mut self) {
        let threshold = self.config.card_visibility_threshold();
        let mut events = vec![
            HostEvent::AnimationFrame,
            HostEvent::Resize,
            HostEvent::PointerDown,
            HostEvent::PointerMove,
            HostEvent::PointerUp,
            HostEvent::PointerCancel,
            HostEvent::Click,
            HostEvent::VideoPlay,
            HostEvent::VideoPause,
            HostEvent::VideoEnded,
            HostEvent::CardIntersection { threshold },
        ];
        events.extend(
            self.cards
                .iter()
                .filter(|c| c.warm_pending)
                .map(|c| HostEvent::VideoLoadedData(c.index)),
        );
        for event in events {
            self.subscriptions.subscribe(&mut self.surface, event);
        }
    }

    // ========== LAYOUT ==========

    /// Measure the first card and lay out the strip. Returns `false`
    /// without touching any state when the card is not laid out yet.
    pub fn measure_and_layout(&mut self) -> bool {
        let Some(rect) = self
            .surface
            .card_rect(CardIndex(0))
            .best_effort("first card measurement")
        else {
            return false;
        };
        let gap = self.surface.track_gap();
        let Some(measurement) = Measurement::from_rect(
            rect,
            gap.as_deref(),
            self.config.min_measure_px(),
            self.config.default_gap_px(),
        ) else {
            trace!("first card not laid out yet ({rect:?})");
            return false;
        };

        self.layout.apply(measurement, self.cards.len());
        self.surface.set_track_height(measurement.height);
        self.render();
        debug!(
            "layout: step={} total={} offset={:.2}",
            self.layout.step, self.layout.total, self.layout.offset
        );
        true
    }

    /// Attempt layout now and keep retrying on later frames with a fresh
    /// attempt budget.
    fn schedule_layout(&mut self) {
        self.retry.restart();
        let ok = self.measure_and_layout();
        self.retry.record(ok);
    }

    /// Write every card's translation.
    fn render(&mut self) {
        if !self.layout.is_ready() {
            return;
        }
        for card in &self.cards {
            let x = self.layout.card_position(card.index);
            self.surface.set_card_offset(card.index, x);
        }
    }

    fn on_frame(&mut self, ts: f64) {
        if self.retry.is_pending() {
            let ok = self.measure_and_layout();
            self.retry.record(ok);
        }
        let outcome = self.motion.tick(ts, &mut self.layout);
        if outcome.moved {
            self.render();
        }
        if outcome.tween_finished {
            self.resume_marquee();
        }
    }

    // ========== MOTION ==========

    fn resume_marquee(&mut self) -> bool {
        let playing = self.any_video_playing();
        self.motion.try_resume_marquee(playing)
    }

    /// Tween the offset to `target` over `duration_ms`, replacing any
    /// in-flight tween.
    pub fn animate_offset_to(&mut self, target: f64, duration_ms: f64) {
        let tween = Tween::new(
            self.layout.offset,
            target,
            duration_ms,
            self.config.center_easing(),
        );
        self.motion.start_tween(tween);
    }

    /// Tween so `card` sits in the middle of the carousel viewport.
    pub fn center_card(&mut self, card: CardIndex) {
        if !self.layout.is_ready() {
            return;
        }
        self.motion.suspend_marquee();
        let Some(viewport) = self
            .surface
            .carousel_rect()
            .best_effort("carousel measurement")
        else {
            return;
        };
        let Some(rect) = self
            .surface
            .card_rect(card)
            .best_effort(&format!("{card} measurement"))
        else {
            return;
        };
        let dx = viewport.center_x() - rect.center_x();
        let tween = Tween::new(
            self.layout.offset,
            self.layout.offset + dx,
            self.config.center_duration_ms(),
            self.config.center_easing(),
        )
        .centering(card);
        self.motion.start_tween(tween);
    }

    // ========== DRAG ==========

    fn on_pointer_down(&mut self, input: PointerInput) {
        if self.motion.is_dragging() {
            return;
        }
        let Some(session) = DragSession::begin(&input, self.layout.offset)
        else {
            return;
        };
        if !self.motion.begin_drag(session) {
            return;
        }
        self.surface.set_track_class(classes::IS_DRAGGING, true);
        self.surface
            .capture_pointer(input.pointer)
            .best_effort("pointer capture");
    }

    fn on_pointer_move(&mut self, input: PointerInput) {
        let Some(session) = self.motion.drag().copied() else {
            return;
        };
        if !session.owns(input.pointer) {
            return;
        }
        self.layout.set_offset(session.offset_at(input.client_x));
        self.render();
    }

    fn stop_drag(&mut self, pointer: PointerId) {
        if self.motion.end_drag(pointer).is_none() {
            return;
        }
        self.surface.set_track_class(classes::IS_DRAGGING, false);
        self.surface
            .release_pointer(pointer)
            .best_effort("pointer release");
        self.resume_marquee();
    }

    // ========== VIDEO ==========

    fn init_videos(&mut self) {
        for card in &mut self.cards {
            let Some(video) = card.video.as_mut() else {
                continue;
            };
            video::park(video);
            if video.ready_state() >= video_cfg::WARM_FRAME_READY_STATE {
                video::seek_warm_frame(video, card.index, &self.config);
            } else {
                card.warm_pending = true;
            }
            let playing = !video.is_paused();
            self.surface
                .set_card_class(card.index, classes::IS_PLAYING, playing);
        }
    }

    /// Pause every video except `keep` and clear their playing class.
    fn pause_all_except(&mut self, keep: CardIndex) {
        for card in self.cards.iter_mut().filter(|c| c.index != keep) {
            let Some(video) = card.video.as_mut() else {
                continue;
            };
            if !video.is_paused() {
                video::deactivate(video);
            }
            card.mode = VideoMode::Idle;
            self.surface
                .set_card_class(card.index, classes::IS_PLAYING, false);
        }
    }

    /// Play a paused card video (exclusively, centered, with sound) or
    /// return a playing one to idle. `None` when the card has no video.
    pub fn toggle_video(&mut self, card: CardIndex) -> Option<PlaybackOutcome> {
        let paused = self.video(card)?.is_paused();

        let outcome = if paused {
            self.pause_all_except(card);
            self.motion.suspend_marquee();
            self.center_card(card);
            let slot = self.cards.get_mut(card.0)?;
            let video = slot.video.as_mut()?;
            let outcome = video::activate(video, card, &self.config);
            if outcome == PlaybackOutcome::Blocked {
                video::deactivate(video);
                slot.mode = VideoMode::Idle;
            } else {
                slot.mode = VideoMode::Activated;
            }
            outcome
        } else {
            let slot = self.cards.get_mut(card.0)?;
            if let Some(video) = slot.video.as_mut() {
                video::deactivate(video);
            }
            slot.mode = VideoMode::Idle;
            PlaybackOutcome::Paused
        };

        let playing = self.cards[card.0].is_playing();
        self.surface
            .set_card_class(card, classes::IS_PLAYING, playing);
        if !playing {
            self.resume_marquee();
        }
        debug!("{card}: toggle -> {outcome:?}");
        Some(outcome)
    }

    fn on_video_event(&mut self, card: CardIndex, event: VideoEvent) {
        if self.video(card).is_none() {
            return;
        }
        match event {
            VideoEvent::Play => {
                self.surface
                    .set_card_class(card, classes::IS_PLAYING, true);
                self.pause_all_except(card);
                self.motion.suspend_marquee();
                let centering = self.motion.tween().and_then(Tween::card);
                if centering != Some(card) {
                    self.center_card(card);
                }
            }
            VideoEvent::Pause | VideoEvent::Ended => {
                let Some(slot) = self.cards.get_mut(card.0) else {
                    return;
                };
                let Some(video) = slot.video.as_mut() else {
                    return;
                };
                if !video.is_paused() {
                    debug!("{card}: stale {event:?} while playing; ignored");
                    return;
                }
                video.set_muted(true);
                video.set_looping(true);
                slot.mode = VideoMode::Idle;
                self.surface
                    .set_card_class(card, classes::IS_PLAYING, false);
                self.resume_marquee();
            }
            VideoEvent::LoadedData => self.on_loaded_data(card),
        }
    }

    fn on_loaded_data(&mut self, card: CardIndex) {
        let Some(slot) = self.cards.get_mut(card.0) else {
            return;
        };
        if !slot.warm_pending {
            return;
        }
        let Some(video) = slot.video.as_mut() else {
            return;
        };
        video::seek_warm_frame(video, card, &self.config);
        slot.warm_pending = false;
        self.subscriptions
            .release(&mut self.surface, &HostEvent::VideoLoadedData(card));
    }

    // ========== VISIBILITY ==========

    fn on_intersection(&mut self, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|e| e.is_out_of_view()) {
            let Some(slot) = self.cards.get_mut(entry.card.0) else {
                continue;
            };
            if let Some(video) = slot.video.as_mut() {
                if !video.is_paused() {
                    debug!("{}: left view while playing; pausing", entry.card);
                    video::deactivate(video);
                }
                slot.mode = VideoMode::Idle;
            }
            self.surface
                .set_card_class(entry.card, classes::IS_PLAYING, false);
        }
        self.resume_marquee();
    }

    // ========== TEARDOWN ==========

    /// Release every host subscription and stop all motion. Later events
    /// are ignored. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(session) = self.motion.drag().copied() {
            self.surface.set_track_class(classes::IS_DRAGGING, false);
            self.surface
                .release_pointer(session.pointer())
                .best_effort("pointer release");
        }
        self.motion.halt();
        self.retry.cancel();
        let released = self.subscriptions.teardown(&mut self.surface);
        self.destroyed = true;
        info!("reels carousel destroyed ({released} subscriptions released)");
    }
}

impl<S: Surface, V: Video> Drop for ReelsCarousel<S, V> {
    fn drop(&mut self) {
        self.destroy();
    }
}
