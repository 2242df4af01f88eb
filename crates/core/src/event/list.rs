// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered event batches

use super::Event;
use serde::{Deserialize, Serialize};

/// An ordered, possibly empty sequence of events delivered atomically.
/// Insertion order is preserved end to end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventList(Vec<Event>);

impl EventList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_back(&mut self, event: Event) {
        self.0.push(event);
    }

    /// Append all of `other`, preserving its order.
    pub fn concat(&mut self, other: EventList) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.0.iter()
    }

    /// Copy of the primary events with their follow-up subtrees removed.
    /// Interceptors receive this, so a recorded trace is free of nested
    /// state.
    pub fn stripped(&self) -> EventList {
        EventList(
            self.0
                .iter()
                .map(|event| Event {
                    dest: event.dest.clone(),
                    body: event.body.clone(),
                    follow_ups: Vec::new(),
                })
                .collect(),
        )
    }

    /// Split into the primary events and their detached follow-up subtrees,
    /// in primary order. Nested follow-ups stay attached to the detached
    /// events.
    pub fn strip(self) -> (EventList, EventList) {
        let mut follow_ups = EventList::new();
        let primaries = self
            .0
            .into_iter()
            .map(|mut event| {
                for follow_up in std::mem::take(&mut event.follow_ups) {
                    follow_ups.push_back(follow_up);
                }
                event
            })
            .collect();
        (EventList(primaries), follow_ups)
    }
}

impl From<Event> for EventList {
    fn from(event: Event) -> Self {
        Self(vec![event])
    }
}

impl From<Vec<Event>> for EventList {
    fn from(events: Vec<Event>) -> Self {
        Self(events)
    }
}

impl FromIterator<Event> for EventList {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for EventList {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventList {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
