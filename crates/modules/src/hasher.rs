// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default hashing module

use sha2::{Digest, Sha256};
use stele_core::{Event, EventBody, EventList, ModuleError, PassiveModule};

/// SHA-256 hashing module.
///
/// Hash requests are independent of one another — no request reads state
/// left by another — so any number of hasher instances may serve them
/// concurrently. That commutativity is the precondition for running this
/// module behind more than one driver.
#[derive(Debug, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PassiveModule for Sha256Hasher {
    fn apply(&mut self, batch: EventList) -> Result<EventList, ModuleError> {
        let mut out = EventList::new();
        for event in batch {
            match event.body {
                EventBody::HashRequest { data, origin } => {
                    let mut hasher = Sha256::new();
                    for chunk in &data {
                        hasher.update(chunk);
                    }
                    out.push_back(Event::hash_result(hasher.finalize().to_vec(), origin));
                }
                other => {
                    return Err(ModuleError::new(format!(
                        "unexpected event for hasher: {}",
                        other.name()
                    )))
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "hasher_tests.rs"]
mod tests;
