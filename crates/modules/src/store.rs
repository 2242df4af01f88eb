// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory request store

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use stele_core::{ClientId, EventBody, EventList, ModuleError, PassiveModule, ReqNo};

/// Shared read view of a [`MemStore`], usable after the module has been
/// handed to the engine.
#[derive(Debug, Clone, Default)]
pub struct StoreHandle {
    requests: Arc<Mutex<HashMap<(ClientId, ReqNo), Vec<u8>>>>,
}

impl StoreHandle {
    pub fn get(&self, client_id: &ClientId, req_no: ReqNo) -> Option<Vec<u8>> {
        self.requests.lock().get(&(client_id.clone(), req_no)).cloned()
    }

    pub fn len(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.lock().is_empty()
    }
}

/// Stores request payloads in memory, keyed by `(client, req_no)`.
#[derive(Debug, Default)]
pub struct MemStore {
    handle: StoreHandle,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> StoreHandle {
        self.handle.clone()
    }
}

impl PassiveModule for MemStore {
    fn apply(&mut self, batch: EventList) -> Result<EventList, ModuleError> {
        for event in batch {
            match event.body {
                EventBody::StoreRequest { client_id, req_no, data } => {
                    self.handle.requests.lock().insert((client_id, req_no), data);
                }
                other => {
                    return Err(ModuleError::new(format!(
                        "unexpected event for request store: {}",
                        other.name()
                    )))
                }
            }
        }
        Ok(EventList::new())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
