// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Placeholder crypto module

use sha2::{Digest, Sha256};
use stele_core::{Event, EventBody, EventList, ModuleError, PassiveModule};

/// Crypto module that accepts every verification and "signs" with a plain
/// digest. It exists so the request path can be wired end to end;
/// deployments replace it with a real signer.
#[derive(Debug, Default)]
pub struct InsecureCrypto;

impl InsecureCrypto {
    pub fn new() -> Self {
        Self
    }
}

impl PassiveModule for InsecureCrypto {
    fn apply(&mut self, batch: EventList) -> Result<EventList, ModuleError> {
        let mut out = EventList::new();
        for event in batch {
            match event.body {
                EventBody::SignRequest { data, origin } => {
                    let mut hasher = Sha256::new();
                    for chunk in &data {
                        hasher.update(chunk);
                    }
                    out.push_back(Event::sign_result(hasher.finalize().to_vec(), origin));
                }
                EventBody::VerifyRequest { origin, .. } => {
                    out.push_back(Event::verify_result(true, origin));
                }
                other => {
                    return Err(ModuleError::new(format!(
                        "unexpected event for crypto: {}",
                        other.name()
                    )))
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "crypto_tests.rs"]
mod tests;
