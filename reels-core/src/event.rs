//! Input delivered by the host to the carousel

use crate::drag::PointerInput;
use crate::host::CardIndex;
use crate::visibility::IntersectionEntry;

/// Native media events observed on a card video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEvent {
    Play,
    Pause,
    Ended,
    LoadedData,
}

/// What a click on the track landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    PlayButton(CardIndex),
    Video(CardIndex),
    Other,
}

impl ClickTarget {
    pub fn card(self) -> Option<CardIndex> {
        match self {
            Self::PlayButton(card) | Self::Video(card) => Some(card),
            Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    /// Animation frame at host time (ms).
    Frame(f64),
    Resize,
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp(PointerInput),
    PointerCancel(PointerInput),
    Click(ClickTarget),
    Video(CardIndex, VideoEvent),
    Intersection(Vec<IntersectionEntry>),
}
