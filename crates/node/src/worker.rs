// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver loops for passive modules

use crate::error::NodeError;
use crate::notifier::ErrNotifier;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use stele_core::{EventList, ModuleError, ModuleId, PassiveModule};
use tokio::sync::mpsc;

/// Drives one passive module: read a batch from the module's channel,
/// apply it, forward the results for routing.
///
/// A failed or panicking apply is reported through the notifier and ends
/// the loop; the engine never retries a module. On the exit signal the
/// current batch is dropped and the loop returns.
pub(crate) struct Worker {
    pub module_id: ModuleId,
    pub module: Box<dyn PassiveModule>,
    pub rx: mpsc::Receiver<EventList>,
    pub out: mpsc::Sender<EventList>,
    pub notifier: Arc<ErrNotifier>,
}

impl Worker {
    pub async fn run(mut self) {
        loop {
            let batch = tokio::select! {
                _ = self.notifier.exited() => return,
                batch = self.rx.recv() => match batch {
                    Some(batch) => batch,
                    None => return,
                },
            };

            let (primaries, follow_ups) = batch.strip();
            let applied = catch_unwind(AssertUnwindSafe(|| self.module.apply(primaries)));
            let mut out = match applied {
                Ok(Ok(out)) => out,
                Ok(Err(err)) => {
                    self.fail(err);
                    return;
                }
                Err(_) => {
                    self.fail(ModuleError::new("apply panicked"));
                    return;
                }
            };

            // Follow-ups enter routing only after the primary batch's
            // effects.
            out.concat(follow_ups);
            if out.is_empty() {
                continue;
            }
            tokio::select! {
                _ = self.notifier.exited() => return,
                sent = self.out.send(out) => {
                    if sent.is_err() {
                        return;
                    }
                }
            }
        }
    }

    fn fail(&self, err: ModuleError) {
        self.notifier.fail(NodeError::Module { module: self.module_id.clone(), source: err });
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
