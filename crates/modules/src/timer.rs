// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer module

use std::time::Duration;
use stele_core::{ActiveModule, EventBody, EventList, ModuleError};
use tokio::sync::mpsc;

const OUT_BUFFER: usize = 16;

/// Active timer module: each `TimerDelay` batch is released onto the
/// output stream after its delay, from a sleep task owned by this module.
///
/// Must be handed to a node running inside a tokio runtime.
#[derive(Debug)]
pub struct TokioTimer {
    tx: mpsc::Sender<EventList>,
    rx: Option<mpsc::Receiver<EventList>>,
}

impl TokioTimer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(OUT_BUFFER);
        Self { tx, rx: Some(rx) }
    }
}

impl Default for TokioTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveModule for TokioTimer {
    fn apply_events(&mut self, batch: EventList) -> Result<(), ModuleError> {
        for event in batch {
            match event.body {
                EventBody::TimerDelay { delay_ms, events } => {
                    if events.is_empty() {
                        continue;
                    }
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        // The engine is gone if this fails; nothing to do.
                        let _ = tx.send(EventList::from(events)).await;
                    });
                }
                other => {
                    return Err(ModuleError::new(format!(
                        "unexpected event for timer: {}",
                        other.name()
                    )))
                }
            }
        }
        Ok(())
    }

    fn events_out(&mut self) -> Option<mpsc::Receiver<EventList>> {
        self.rx.take()
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
