//! Shared harness for driving a carousel over the in-memory host.
#![allow(dead_code)]

use reels_config::RuntimeConfig;
use reels_core::sim::{Journal, SimSurface, SimVideo};
use reels_core::{
    CardIndex, CarouselEvent, ClickTarget, Playback, PointerId,
    PointerInput, ReelsCarousel, VideoEvent,
};

pub type Reels = ReelsCarousel<SimSurface, SimVideo>;

pub const CARDS: usize = 6;
pub const CARD_WIDTH: f64 = 200.0;
pub const CARD_HEIGHT: f64 = 356.0;
pub const GAP: f64 = 16.0;
pub const STEP: f64 = CARD_WIDTH + GAP;
pub const TOTAL: f64 = STEP * CARDS as f64;
pub const FRAME_MS: f64 = 16.0;
pub const CLIP_SECONDS: f64 = 12.0;

pub fn six_card_surface(journal: &Journal) -> SimSurface {
    SimSurface::new(CARDS, CARD_WIDTH, CARD_HEIGHT, GAP)
        .with_journal(journal.clone())
}

pub fn loaded_videos(journal: &Journal, count: usize) -> Vec<Option<SimVideo>> {
    (0..count)
        .map(|i| Some(SimVideo::new(CardIndex(i), journal, CLIP_SECONDS)))
        .collect()
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

pub struct Harness {
    pub reels: Reels,
    pub journal: Journal,
    pub ts: f64,
}

impl Harness {
    /// Six loaded video cards with default config.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let journal = Journal::new();
        let surface = six_card_surface(&journal);
        let videos = loaded_videos(&journal, CARDS);
        Self::from_parts(surface, videos, config, journal)
    }

    pub fn from_parts(
        surface: SimSurface,
        videos: Vec<Option<SimVideo>>,
        config: RuntimeConfig,
        journal: Journal,
    ) -> Self {
        let reels = ReelsCarousel::setup(surface, videos, config)
            .expect("carousel markup present");
        Self {
            reels,
            journal,
            ts: 1_000.0,
        }
    }

    pub fn frame(&mut self) {
        self.ts += FRAME_MS;
        self.reels.update(CarouselEvent::Frame(self.ts));
    }

    pub fn frames(&mut self, n: usize) {
        for _ in 0..n {
            self.frame();
        }
    }

    /// Enough frames for a default centering tween to settle.
    pub fn settle(&mut self) {
        self.frames(40);
    }

    pub fn click(&mut self, card: usize) -> Option<Playback> {
        self.reels.update(CarouselEvent::Click(ClickTarget::PlayButton(
            CardIndex(card),
        )))
    }

    pub fn video_event(&mut self, card: usize, event: VideoEvent) {
        self.reels.update(CarouselEvent::Video(CardIndex(card), event));
    }

    pub fn pointer_down(&mut self, pointer: i32, x: f64) {
        self.reels.update(CarouselEvent::PointerDown(PointerInput::primary(
            PointerId(pointer),
            x,
        )));
    }

    pub fn pointer_move(&mut self, pointer: i32, x: f64) {
        self.reels.update(CarouselEvent::PointerMove(PointerInput::primary(
            PointerId(pointer),
            x,
        )));
    }

    pub fn pointer_up(&mut self, pointer: i32, x: f64) {
        self.reels.update(CarouselEvent::PointerUp(PointerInput::primary(
            PointerId(pointer),
            x,
        )));
    }

    pub fn video(&self, card: usize) -> &SimVideo {
        self.reels.video(CardIndex(card)).expect("card has a video")
    }

    pub fn video_mut(&mut self, card: usize) -> &mut SimVideo {
        self.reels
            .video_mut(CardIndex(card))
            .expect("card has a video")
    }

    pub fn card_center(&self, card: usize) -> f64 {
        let x = self
            .reels
            .surface()
            .card_offset(CardIndex(card))
            .expect("card placed");
        x + CARD_WIDTH / 2.0
    }

    pub fn has_playing_class(&self, card: usize) -> bool {
        self.reels
            .surface()
            .card_has_class(CardIndex(card), "is-playing")
    }

    /// Offsets and card positions are inside their bands.
    pub fn assert_in_band(&self) {
        let offset = self.reels.offset();
        assert!(
            (-TOTAL..0.0).contains(&offset),
            "offset {offset} outside [-{TOTAL}, 0)"
        );
        for i in 0..CARDS {
            let x = self
                .reels
                .surface()
                .card_offset(CardIndex(i))
                .expect("card placed");
            assert!(
                (-STEP..TOTAL - STEP).contains(&x),
                "card#{i} at {x} outside [-{STEP}, {})",
                TOTAL - STEP
            );
        }
    }
}
