// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in ordering protocols

use stele_core::{Event, EventBody, EventList, ModuleError, PassiveModule, RetentionIndex, SeqNo};
use tracing::debug;

/// Single-replica total-order protocol.
///
/// Orders admitted requests by arrival: each `RequestReady` is assigned
/// the next sequence number and persisted as an `Ordered` entry, with the
/// application delivery attached as a follow-up so it trails the persist
/// request into routing. On recovery, replayed `Ordered` entries restore
/// the sequence counter, and the recovered log is handed back to the
/// application in one `AppendEntries` batch when `Init` arrives.
///
/// Peer messages and timer ticks are ignored — there are no peers to
/// agree with.
#[derive(Debug, Default)]
pub struct LocalOrder {
    next_seq: u64,
    /// Payloads recovered from the WAL, drained into `AppendEntries` on
    /// `Init`.
    recovered: Vec<Vec<u8>>,
}

impl LocalOrder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PassiveModule for LocalOrder {
    fn apply(&mut self, batch: EventList) -> Result<EventList, ModuleError> {
        let mut out = EventList::new();
        for event in batch {
            match event.body {
                EventBody::Init => {
                    debug!(next_seq = self.next_seq, "protocol initialized");
                    if !self.recovered.is_empty() {
                        out.push_back(Event::append_entries(std::mem::take(
                            &mut self.recovered,
                        )));
                    }
                }
                EventBody::RequestReady { client_id, req_no, data } => {
                    self.next_seq += 1;
                    let seq_no = SeqNo(self.next_seq);
                    let ordered =
                        Event::ordered(seq_no, client_id, req_no, data.clone());
                    out.push_back(
                        Event::persist_entry(ordered, RetentionIndex(self.next_seq))
                            .with_follow_up(Event::deliver(seq_no, data)),
                    );
                }
                EventBody::WalEntry { event, .. } => match event.body {
                    EventBody::Ordered { seq_no, data, .. } => {
                        self.next_seq = self.next_seq.max(seq_no.0);
                        self.recovered.push(data);
                    }
                    other => {
                        return Err(ModuleError::new(format!(
                            "unexpected WAL entry for protocol: {}",
                            other.name()
                        )))
                    }
                },
                EventBody::MessageReceived { source, .. } => {
                    debug!(source = %source, "ignoring peer message: single-replica ordering");
                }
                EventBody::TimerTrigger { tick } => {
                    debug!(tick, "ignoring timer tick");
                }
                other => {
                    return Err(ModuleError::new(format!(
                        "unexpected event for protocol: {}",
                        other.name()
                    )))
                }
            }
        }
        Ok(out)
    }
}

/// Protocol that does nothing at all. Useful as a stand-in when a test
/// drives the engine directly.
#[derive(Debug, Default)]
pub struct NullProtocol;

impl NullProtocol {
    pub fn new() -> Self {
        Self
    }
}

impl PassiveModule for NullProtocol {
    fn apply(&mut self, _batch: EventList) -> Result<EventList, ModuleError> {
        Ok(EventList::new())
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
