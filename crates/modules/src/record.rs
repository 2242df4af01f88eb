// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trace recording for deterministic replay

use parking_lot::Mutex;
use std::sync::Arc;
use stele_core::{Event, EventList, Interceptor, ModuleError};

/// Shared, cloneable view of a recorded trace.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    batches: Arc<Mutex<Vec<EventList>>>,
}

impl Trace {
    /// The recorded batches, in delivery order.
    pub fn batches(&self) -> Vec<EventList> {
        self.batches.lock().clone()
    }

    /// The recorded events flattened into one sequence.
    pub fn events(&self) -> Vec<Event> {
        self.batches.lock().iter().flat_map(|batch| batch.iter().cloned()).collect()
    }

    pub fn len(&self) -> usize {
        self.batches.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.lock().is_empty()
    }
}

/// Interceptor that appends every delivered batch to a [`Trace`].
///
/// Batches arrive stripped of follow-ups, so the trace contains each event
/// exactly once, at the moment it was delivered. Feeding the trace back to
/// an identical module set reproduces the run.
#[derive(Debug, Default)]
pub struct RecordingInterceptor {
    trace: Trace,
}

impl RecordingInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for reading the trace while the node runs.
    pub fn trace(&self) -> Trace {
        self.trace.clone()
    }
}

impl Interceptor for RecordingInterceptor {
    fn intercept(&mut self, batch: EventList) -> Result<(), ModuleError> {
        self.trace.batches.lock().push(batch);
        Ok(())
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
