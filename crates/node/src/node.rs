// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The public node API

use crate::chans::WorkChans;
use crate::dispatch::{DebugMode, Engine};
use crate::error::NodeError;
use crate::notifier::ErrNotifier;
use crate::registry::{ModuleSet, Registry};
use crate::work_items::WorkItems;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stele_core::{ClientId, Event, EventList, NodeId, ReqNo};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// How the dispatcher handles a full debug output channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DebugOutPolicy {
    /// Wait for the consumer; a slow consumer stalls the dispatcher.
    #[default]
    Block,
    /// Drop the batch and log a warning.
    Drop,
}

/// Node-level (protocol-independent) configuration: buffer sizes and
/// debug behavior.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Capacity of the shared work-input channel. Producers wait when it
    /// is full; nothing is dropped.
    pub work_input_buffer: usize,
    pub debug_out_policy: DebugOutPolicy,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self { work_input_buffer: 64, debug_out_policy: DebugOutPolicy::default() }
    }
}

impl NodeConfig {
    stele_core::setters! {
        set {
            work_input_buffer: usize,
            debug_out_policy: DebugOutPolicy,
        }
    }
}

/// Static snapshot of node state.
///
/// Snapshot collection is not implemented: the dispatcher finalizes the
/// exit status without one, so [`Node::status`] reports the terminal
/// error instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub id: NodeId,
}

/// The local instance of the replication library and the application's
/// interface to it.
pub struct Node {
    id: NodeId,
    notifier: Arc<ErrNotifier>,
    work_input: mpsc::Sender<EventList>,
    debug_in: mpsc::Sender<EventList>,
    engine: Mutex<Option<Engine>>,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node").field("id", &self.id).finish_non_exhaustive()
    }
}

impl Node {
    /// Create a node from the given module set, filling every absent slot
    /// with a default. Fails on duplicate or unknown module ids.
    pub fn new(id: NodeId, config: NodeConfig, modules: ModuleSet) -> Result<Self, NodeError> {
        let registry = Registry::new(modules)?;
        let (chans, recvs) = WorkChans::new(config.work_input_buffer);
        let notifier = Arc::new(ErrNotifier::new());

        let work_input = chans.work_input.clone();
        let debug_in = chans.debug_in.clone();
        let engine = Engine {
            registry,
            work_items: WorkItems::new(),
            chans,
            recvs,
            notifier: Arc::clone(&notifier),
            config,
        };

        Ok(Self { id, notifier, work_input, debug_in, engine: Mutex::new(Some(engine)) })
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Run the node until the token is cancelled or a module fails;
    /// returns the terminal error.
    ///
    /// WAL contents are replayed first, so recovered events sit ahead of
    /// any live input in every module's queue, and a single `Init` event
    /// is handed to the protocol module behind them.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), NodeError> {
        let mut engine = self.take_engine()?;
        self.replay_wal(&mut engine)?;
        if let Err(err) = engine.work_items.add(EventList::from(Event::init())) {
            self.notifier.fail(err.clone());
            self.notifier.set_exit_status(None, NodeError::NotStarted);
            return Err(err);
        }
        info!(node = %self.id, "node starting");
        Err(engine.process(cancel, None).await)
    }

    /// Run in debug mode: only events injected through [`Node::step`] are
    /// routed. Events produced by modules are written to `events_out`
    /// when supplied — the caller must read them — and dropped otherwise;
    /// they never re-enter routing. Incoming network messages are logged
    /// and ignored.
    pub async fn debug(
        &self,
        cancel: CancellationToken,
        events_out: Option<mpsc::Sender<EventList>>,
    ) -> Result<(), NodeError> {
        let mut engine = self.take_engine()?;
        self.replay_wal(&mut engine)?;
        info!(node = %self.id, "node starting in debug mode");
        Err(engine.process(cancel, Some(DebugMode { events_out })).await)
    }

    /// Inject a single event, to be routed as if a module had produced
    /// it. Debug-mode only; stepping a running node is logged and applied
    /// anyway. Never blocks past shutdown.
    pub async fn step(&self, cancel: &CancellationToken, event: Event) -> Result<(), NodeError> {
        tokio::select! {
            biased;
            _ = self.notifier.exited() => Err(self.terminal_err()),
            _ = cancel.cancelled() => Err(NodeError::Stopped),
            sent = self.debug_in.send(EventList::from(event)) => match sent {
                Ok(()) => Ok(()),
                Err(_) => Err(self.terminal_err()),
            },
        }
    }

    /// Submit a new client request. `client_id` and `req_no` identify the
    /// request; `data` is its opaque payload. Safe to call concurrently.
    pub async fn submit_request(
        &self,
        cancel: &CancellationToken,
        client_id: ClientId,
        req_no: ReqNo,
        data: Vec<u8>,
        authenticator: Vec<u8>,
    ) -> Result<(), NodeError> {
        let batch =
            EventList::from(Event::client_request(client_id, req_no, data, authenticator));
        tokio::select! {
            biased;
            _ = self.notifier.exited() => Err(self.terminal_err()),
            _ = cancel.cancelled() => Err(NodeError::Stopped),
            sent = self.work_input.send(batch) => match sent {
                Ok(()) => Ok(()),
                Err(_) => Err(self.terminal_err()),
            },
        }
    }

    /// Request a status snapshot.
    ///
    /// Snapshot collection is not implemented: this resolves once the
    /// node has shut down and reports the terminal error.
    pub async fn status(&self, cancel: &CancellationToken) -> Result<NodeStatus, NodeError> {
        tokio::select! {
            _ = self.notifier.exit_status_set() => match self.notifier.exit_status() {
                Some((Some(status), _)) => Ok(status),
                Some((None, err)) => Err(err),
                None => Err(NodeError::NotStarted),
            },
            _ = cancel.cancelled() => Err(NodeError::Stopped),
        }
    }

    fn take_engine(&self) -> Result<Engine, NodeError> {
        self.engine.lock().take().ok_or(NodeError::AlreadyStarted)
    }

    /// Enqueue all persisted events, wrapped with their durability
    /// metadata, before the dispatcher starts. Fatal on error: the node
    /// is reported as never started.
    fn replay_wal(&self, engine: &mut Engine) -> Result<(), NodeError> {
        let mut replayed = EventList::new();
        let loaded = engine.registry.wal.load_all(&mut |retention_index, event| {
            replayed.push_back(Event::wal_entry(event, retention_index));
        });
        let result = match loaded {
            Ok(()) => {
                if replayed.is_empty() {
                    return Ok(());
                }
                info!(node = %self.id, events = replayed.len(), "replaying WAL");
                engine.work_items.add(replayed)
            }
            Err(err) => Err(NodeError::WalLoad(err)),
        };
        if let Err(err) = result {
            self.notifier.fail(err.clone());
            self.notifier.set_exit_status(None, NodeError::NotStarted);
            return Err(err);
        }
        Ok(())
    }

    fn terminal_err(&self) -> NodeError {
        self.notifier.err().unwrap_or(NodeError::Stopped)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
