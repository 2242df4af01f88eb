// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Contracts between the engine and its modules

use crate::event::{Event, EventBody, EventList, Message};
use crate::id::{NodeId, RetentionIndex};
use thiserror::Error;
use tokio::sync::mpsc;

/// Error surfaced by a module. Terminal: the engine never retries a failed
/// apply — retry semantics belong to the module itself, engine-level retry
/// would break replay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ModuleError {
    message: String,
}

impl ModuleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<std::io::Error> for ModuleError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// A module whose work is driven by an engine-owned worker.
pub trait PassiveModule: Send {
    /// Apply a batch and return the derived batch (possibly empty). Must be
    /// synchronous and must not retain the input beyond the call.
    fn apply(&mut self, batch: EventList) -> Result<EventList, ModuleError>;
}

/// A module that owns its own concurrency. The dispatcher writes into it
/// directly and merges its output stream into routing.
pub trait ActiveModule: Send {
    /// Non-blocking ingest of a batch.
    fn apply_events(&mut self, batch: EventList) -> Result<(), ModuleError>;

    /// Stream of asynchronously produced batches. Called once by the
    /// engine at startup; `None` if the module never produces events.
    fn events_out(&mut self) -> Option<mpsc::Receiver<EventList>>;
}

/// Write-ahead log collaborator. Owns the on-disk format; the engine only
/// replays what `load_all` yields and routes `PersistEntry`/`Truncate`
/// events into `apply_events`.
pub trait Wal: Send {
    /// Invoke `cb` once per persisted event, in persisted order.
    fn load_all(
        &mut self,
        cb: &mut dyn FnMut(RetentionIndex, Event),
    ) -> Result<(), ModuleError>;

    fn apply_events(&mut self, batch: EventList) -> Result<(), ModuleError>;

    fn events_out(&mut self) -> Option<mpsc::Receiver<EventList>> {
        None
    }
}

/// Network transport collaborator. Inbound messages surface on
/// `events_out` as `MessageReceived` events addressed to the protocol.
pub trait Transport: Send {
    fn start(&mut self) -> Result<(), ModuleError>;

    fn stop(&mut self);

    /// Establish connections to all peers. Blocking until connected is the
    /// implementation's choice.
    fn connect(&mut self) -> Result<(), ModuleError>;

    fn send(&mut self, dest: &NodeId, message: Message) -> Result<(), ModuleError>;

    /// Translate routed `SendMessage` events into `send` calls. Events of
    /// any other kind are ignored.
    fn apply_events(&mut self, batch: EventList) -> Result<(), ModuleError> {
        for event in batch {
            if let EventBody::SendMessage { targets, message } = event.body {
                for target in &targets {
                    self.send(target, message.clone())?;
                }
            }
        }
        Ok(())
    }

    fn events_out(&mut self) -> Option<mpsc::Receiver<EventList>>;
}

/// Optional observer of every batch the dispatcher hands to a module.
///
/// Batches arrive stripped of follow-ups and in delivery order; because
/// only the dispatcher thread calls this, the observed sequence is a total
/// order sufficient for deterministic replay. Must be synchronous and
/// fast; an error shuts the node down.
pub trait Interceptor: Send {
    fn intercept(&mut self, batch: EventList) -> Result<(), ModuleError>;
}
