// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event dispatch methods — name and log summary

use super::{Event, EventBody};

impl EventBody {
    pub fn name(&self) -> &'static str {
        match self {
            EventBody::Init => "node:init",
            EventBody::MessageReceived { .. } => "net:received",
            EventBody::SendMessage { .. } => "net:send",
            EventBody::ClientRequest { .. } => "client:request",
            EventBody::StoreRequest { .. } => "store:put",
            EventBody::RequestReady { .. } => "protocol:request_ready",
            EventBody::Ordered { .. } => "protocol:ordered",
            EventBody::HashRequest { .. } => "hash:request",
            EventBody::HashResult { .. } => "hash:result",
            EventBody::SignRequest { .. } => "crypto:sign",
            EventBody::SignResult { .. } => "crypto:signed",
            EventBody::VerifyRequest { .. } => "crypto:verify",
            EventBody::VerifyResult { .. } => "crypto:verified",
            EventBody::WalEntry { .. } => "wal:entry",
            EventBody::PersistEntry { .. } => "wal:persist",
            EventBody::Truncate { .. } => "wal:truncate",
            EventBody::Deliver { .. } => "app:deliver",
            EventBody::AppendEntries { .. } => "app:append",
            EventBody::TimerDelay { .. } => "timer:delay",
            EventBody::TimerTrigger { .. } => "timer:trigger",
        }
    }
}

impl Event {
    pub fn name(&self) -> &'static str {
        self.body.name()
    }

    pub fn log_summary(&self) -> String {
        let t = self.name();
        match &self.body {
            EventBody::ClientRequest { client_id, req_no, .. } => {
                format!("{} dest={} client={} req_no={}", t, self.dest, client_id, req_no)
            }
            EventBody::Ordered { seq_no, client_id, .. } => {
                format!("{} dest={} seq={} client={}", t, self.dest, seq_no, client_id)
            }
            EventBody::Deliver { seq_no, .. } => {
                format!("{} dest={} seq={}", t, self.dest, seq_no)
            }
            EventBody::WalEntry { event, retention_index }
            | EventBody::PersistEntry { event, retention_index } => {
                format!("{} dest={} inner={} ret={}", t, self.dest, event.name(), retention_index)
            }
            EventBody::TimerDelay { delay_ms, events } => {
                format!("{} dest={} delay_ms={} events={}", t, self.dest, delay_ms, events.len())
            }
            _ => format!("{} dest={}", t, self.dest),
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
