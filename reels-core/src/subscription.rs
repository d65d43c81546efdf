//! Host listener bookkeeping

use log::debug;

use crate::error::BestEffort;
use crate::host::{HostEvent, Surface, SubscriptionId};

/// Every listener the carousel registered, released together.
#[derive(Debug, Default)]
pub struct Subscriptions {
    active: Vec<(HostEvent, SubscriptionId)>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `event`. A host that cannot deliver it simply leaves
    /// that feature inert.
    pub fn subscribe<S: Surface>(
        &mut self,
        surface: &mut S,
        event: HostEvent,
    ) -> Option<SubscriptionId> {
        let id = surface
            .subscribe(event)
            .best_effort(&format!("subscription to {event:?}"))?;
        self.active.push((event, id));
        Some(id)
    }

    pub fn is_subscribed(&self, event: &HostEvent) -> bool {
        self.active.iter().any(|(e, _)| e == event)
    }

    /// Drop a single subscription (e.g. a one-shot listener that fired).
    pub fn release<S: Surface>(&mut self, surface: &mut S, event: &HostEvent) {
        if let Some(pos) = self.active.iter().position(|(e, _)| e == event) {
            let (_, id) = self.active.remove(pos);
            surface
                .unsubscribe(id)
                .best_effort(&format!("unsubscribe {event:?}"));
        }
    }

    /// Release everything. Returns how many subscriptions were dropped.
    pub fn teardown<S: Surface>(&mut self, surface: &mut S) -> usize {
        let count = self.active.len();
        for (event, id) in self.active.drain(..) {
            surface
                .unsubscribe(id)
                .best_effort(&format!("unsubscribe {event:?}"));
        }
        debug!("released {count} host subscriptions");
        count
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
