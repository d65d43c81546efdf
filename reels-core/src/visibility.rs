//! Intersection reports for reel cards

use crate::host::CardIndex;

/// One changed entry of a card intersection batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub card: CardIndex,
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn visible(card: CardIndex, ratio: f64) -> Self {
        Self {
            card,
            ratio,
            is_intersecting: ratio > 0.0,
        }
    }

    pub fn hidden(card: CardIndex) -> Self {
        Self {
            card,
            ratio: 0.0,
            is_intersecting: false,
        }
    }

    /// The card has fully left the viewport.
    pub fn is_out_of_view(&self) -> bool {
        !self.is_intersecting || self.ratio <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_view_only_at_zero() {
        assert!(IntersectionEntry::hidden(CardIndex(0)).is_out_of_view());
        assert!(!IntersectionEntry::visible(CardIndex(0), 0.1).is_out_of_view());
        let stale = IntersectionEntry {
            card: CardIndex(1),
            ratio: 0.0,
            is_intersecting: true,
        };
        assert!(stale.is_out_of_view());
    }
}
