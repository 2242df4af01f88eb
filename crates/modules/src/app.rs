// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application modules

use stele_core::{EventList, ModuleError, PassiveModule};

#[cfg(any(test, feature = "test-support"))]
use parking_lot::Mutex;
#[cfg(any(test, feature = "test-support"))]
use std::sync::Arc;
#[cfg(any(test, feature = "test-support"))]
use stele_core::{EventBody, SeqNo};

/// Application that discards everything delivered to it.
#[derive(Debug, Default)]
pub struct NullApp;

impl NullApp {
    pub fn new() -> Self {
        Self
    }
}

impl PassiveModule for NullApp {
    fn apply(&mut self, _batch: EventList) -> Result<EventList, ModuleError> {
        Ok(EventList::new())
    }
}

/// Shared view of what a [`CollectingApp`] has received.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct Deliveries {
    delivered: Arc<Mutex<Vec<(SeqNo, Vec<u8>)>>>,
    recovered: Arc<Mutex<Vec<Vec<u8>>>>,
}

#[cfg(any(test, feature = "test-support"))]
impl Deliveries {
    /// Payloads delivered in order, one per `Deliver` event.
    pub fn delivered(&self) -> Vec<(SeqNo, Vec<u8>)> {
        self.delivered.lock().clone()
    }

    /// Payloads handed back through recovery `AppendEntries` batches.
    pub fn recovered(&self) -> Vec<Vec<u8>> {
        self.recovered.lock().clone()
    }
}

/// Application that records everything delivered to it, for assertions.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct CollectingApp {
    deliveries: Deliveries,
}

#[cfg(any(test, feature = "test-support"))]
impl CollectingApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> Deliveries {
        self.deliveries.clone()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl PassiveModule for CollectingApp {
    fn apply(&mut self, batch: EventList) -> Result<EventList, ModuleError> {
        for event in batch {
            match event.body {
                EventBody::Deliver { seq_no, data } => {
                    self.deliveries.delivered.lock().push((seq_no, data));
                }
                EventBody::AppendEntries { entries } => {
                    self.deliveries.recovered.lock().extend(entries);
                }
                other => {
                    return Err(ModuleError::new(format!(
                        "unexpected event for application: {}",
                        other.name()
                    )))
                }
            }
        }
        Ok(EventList::new())
    }
}
