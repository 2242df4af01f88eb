// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events routed between modules.
//!
//! Serializes with `{"dest": ..., "type": "domain:verb", ...fields}` format;
//! follow-up events are omitted when empty.

mod dispatch;
mod list;

pub use list::EventList;

use crate::id::{ClientId, ModuleId, NodeId, ReqNo, RetentionIndex, SeqNo};
use serde::{Deserialize, Serialize};

/// Opaque payload exchanged between nodes. The engine never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self { payload: payload.into() }
    }
}

/// Correlates an asynchronous request event with its result.
///
/// `module` is where the result is routed; `id` is chosen by the requester
/// and echoed back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub module: ModuleId,
    pub id: u64,
}

impl Origin {
    pub fn new(module: ModuleId, id: u64) -> Self {
        Self { module, id }
    }
}

/// A unit of work addressed to a single module.
///
/// Follow-up events are processed only after the primary event's effects
/// have entered routing. They are detached before interception, so a
/// recorded trace contains each event exactly once, at the moment it was
/// delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Destination module.
    pub dest: ModuleId,
    #[serde(flatten)]
    pub body: EventBody,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follow_ups: Vec<Event>,
}

/// The closed set of inter-module message kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventBody {
    /// Handed to the protocol module once per run, after WAL replay.
    #[serde(rename = "node:init")]
    Init,

    // -- networking --
    #[serde(rename = "net:received")]
    MessageReceived { source: NodeId, message: Message },

    #[serde(rename = "net:send")]
    SendMessage { targets: Vec<NodeId>, message: Message },

    // -- client requests --
    #[serde(rename = "client:request")]
    ClientRequest {
        client_id: ClientId,
        req_no: ReqNo,
        data: Vec<u8>,
        authenticator: Vec<u8>,
    },

    #[serde(rename = "store:put")]
    StoreRequest {
        client_id: ClientId,
        req_no: ReqNo,
        data: Vec<u8>,
    },

    /// An admitted request, announced to the protocol for ordering.
    #[serde(rename = "protocol:request_ready")]
    RequestReady {
        client_id: ClientId,
        req_no: ReqNo,
        data: Vec<u8>,
    },

    /// A request's assigned position in the total order. Persisted by the
    /// protocol and replayed on recovery.
    #[serde(rename = "protocol:ordered")]
    Ordered {
        seq_no: SeqNo,
        client_id: ClientId,
        req_no: ReqNo,
        data: Vec<u8>,
    },

    // -- hashing --
    #[serde(rename = "hash:request")]
    HashRequest { data: Vec<Vec<u8>>, origin: Origin },

    #[serde(rename = "hash:result")]
    HashResult { digest: Vec<u8>, origin: Origin },

    // -- crypto --
    #[serde(rename = "crypto:sign")]
    SignRequest { data: Vec<Vec<u8>>, origin: Origin },

    #[serde(rename = "crypto:signed")]
    SignResult { signature: Vec<u8>, origin: Origin },

    #[serde(rename = "crypto:verify")]
    VerifyRequest {
        data: Vec<u8>,
        signature: Vec<u8>,
        origin: Origin,
    },

    #[serde(rename = "crypto:verified")]
    VerifyResult { valid: bool, origin: Origin },

    // -- write-ahead log --
    /// A replayed persisted event, wrapped with its durability metadata.
    /// The wrapper is routed to the persisted event's own destination.
    #[serde(rename = "wal:entry")]
    WalEntry {
        event: Box<Event>,
        retention_index: RetentionIndex,
    },

    #[serde(rename = "wal:persist")]
    PersistEntry {
        event: Box<Event>,
        retention_index: RetentionIndex,
    },

    #[serde(rename = "wal:truncate")]
    Truncate { retention_index: RetentionIndex },

    // -- application --
    #[serde(rename = "app:deliver")]
    Deliver { seq_no: SeqNo, data: Vec<u8> },

    /// Recovery catch-up: a contiguous segment of the ordered log.
    #[serde(rename = "app:append")]
    AppendEntries { entries: Vec<Vec<u8>> },

    // -- timers --
    /// Release the contained events after the delay.
    #[serde(rename = "timer:delay")]
    TimerDelay { delay_ms: u64, events: Vec<Event> },

    #[serde(rename = "timer:trigger")]
    TimerTrigger { tick: u64 },
}

impl Event {
    pub fn new(dest: ModuleId, body: EventBody) -> Self {
        Self { dest, body, follow_ups: Vec::new() }
    }

    /// Attach a follow-up, processed only after this event's effects have
    /// entered routing.
    pub fn with_follow_up(mut self, event: Event) -> Self {
        self.follow_ups.push(event);
        self
    }

    pub fn init() -> Self {
        Self::new(ModuleId::protocol(), EventBody::Init)
    }

    pub fn message_received(source: NodeId, message: Message) -> Self {
        Self::new(ModuleId::protocol(), EventBody::MessageReceived { source, message })
    }

    pub fn send_message(targets: Vec<NodeId>, message: Message) -> Self {
        Self::new(ModuleId::net(), EventBody::SendMessage { targets, message })
    }

    pub fn client_request(
        client_id: ClientId,
        req_no: ReqNo,
        data: Vec<u8>,
        authenticator: Vec<u8>,
    ) -> Self {
        Self::new(
            ModuleId::client(),
            EventBody::ClientRequest { client_id, req_no, data, authenticator },
        )
    }

    pub fn store_request(client_id: ClientId, req_no: ReqNo, data: Vec<u8>) -> Self {
        Self::new(ModuleId::store(), EventBody::StoreRequest { client_id, req_no, data })
    }

    pub fn request_ready(client_id: ClientId, req_no: ReqNo, data: Vec<u8>) -> Self {
        Self::new(ModuleId::protocol(), EventBody::RequestReady { client_id, req_no, data })
    }

    pub fn ordered(seq_no: SeqNo, client_id: ClientId, req_no: ReqNo, data: Vec<u8>) -> Self {
        Self::new(ModuleId::protocol(), EventBody::Ordered { seq_no, client_id, req_no, data })
    }

    pub fn hash_request(data: Vec<Vec<u8>>, origin: Origin) -> Self {
        Self::new(ModuleId::hash(), EventBody::HashRequest { data, origin })
    }

    /// Routed back to the origin module.
    pub fn hash_result(digest: Vec<u8>, origin: Origin) -> Self {
        Self::new(origin.module.clone(), EventBody::HashResult { digest, origin })
    }

    pub fn sign_request(data: Vec<Vec<u8>>, origin: Origin) -> Self {
        Self::new(ModuleId::crypto(), EventBody::SignRequest { data, origin })
    }

    /// Routed back to the origin module.
    pub fn sign_result(signature: Vec<u8>, origin: Origin) -> Self {
        Self::new(origin.module.clone(), EventBody::SignResult { signature, origin })
    }

    pub fn verify_request(data: Vec<u8>, signature: Vec<u8>, origin: Origin) -> Self {
        Self::new(ModuleId::crypto(), EventBody::VerifyRequest { data, signature, origin })
    }

    /// Routed back to the origin module.
    pub fn verify_result(valid: bool, origin: Origin) -> Self {
        Self::new(origin.module.clone(), EventBody::VerifyResult { valid, origin })
    }

    /// Wrap a replayed persisted event. The wrapper inherits the persisted
    /// event's destination so recovery lands in the module that asked for
    /// durability.
    pub fn wal_entry(event: Event, retention_index: RetentionIndex) -> Self {
        let dest = event.dest.clone();
        Self::new(dest, EventBody::WalEntry { event: Box::new(event), retention_index })
    }

    pub fn persist_entry(event: Event, retention_index: RetentionIndex) -> Self {
        Self::new(ModuleId::wal(), EventBody::PersistEntry { event: Box::new(event), retention_index })
    }

    pub fn truncate(retention_index: RetentionIndex) -> Self {
        Self::new(ModuleId::wal(), EventBody::Truncate { retention_index })
    }

    pub fn deliver(seq_no: SeqNo, data: Vec<u8>) -> Self {
        Self::new(ModuleId::app(), EventBody::Deliver { seq_no, data })
    }

    pub fn append_entries(entries: Vec<Vec<u8>>) -> Self {
        Self::new(ModuleId::app(), EventBody::AppendEntries { entries })
    }

    pub fn timer_delay(delay_ms: u64, events: Vec<Event>) -> Self {
        Self::new(ModuleId::timer(), EventBody::TimerDelay { delay_ms, events })
    }

    pub fn timer_trigger(tick: u64) -> Self {
        Self::new(ModuleId::protocol(), EventBody::TimerTrigger { tick })
    }
}
