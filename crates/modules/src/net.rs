// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transports

use std::collections::HashMap;
use stele_core::{Event, EventList, Message, ModuleError, NodeId, Transport};
use tokio::sync::mpsc;
use tracing::{debug, warn};

const INBOX_BUFFER: usize = 1024;

/// Transport that goes nowhere: sends are discarded and nothing is ever
/// received. The default for nodes without a network.
#[derive(Debug, Default)]
pub struct NullTransport;

impl NullTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for NullTransport {
    fn start(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn connect(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    fn send(&mut self, dest: &NodeId, _message: Message) -> Result<(), ModuleError> {
        debug!(dest = %dest, "discarding outbound message: no transport configured");
        Ok(())
    }

    fn events_out(&mut self) -> Option<mpsc::Receiver<EventList>> {
        None
    }
}

/// In-process transport connecting a fixed mesh of nodes over channels,
/// for tests and local deployments. Lossy under pressure: a full peer
/// inbox drops the message with a warning.
#[derive(Debug)]
pub struct ChannelTransport {
    node: NodeId,
    peers: HashMap<NodeId, mpsc::Sender<EventList>>,
    inbox: Option<mpsc::Receiver<EventList>>,
}

impl ChannelTransport {
    /// Build a fully connected mesh, one transport per node id. Each
    /// transport can send to every id in `ids`, itself included.
    pub fn mesh(ids: &[NodeId]) -> Vec<ChannelTransport> {
        let mut inboxes = HashMap::new();
        let mut transports = Vec::new();
        for id in ids {
            let (tx, rx) = mpsc::channel(INBOX_BUFFER);
            inboxes.insert(id.clone(), tx);
            transports.push(ChannelTransport {
                node: id.clone(),
                peers: HashMap::new(),
                inbox: Some(rx),
            });
        }
        for transport in &mut transports {
            transport.peers = inboxes.clone();
        }
        transports
    }

    pub fn node(&self) -> &NodeId {
        &self.node
    }
}

impl Transport for ChannelTransport {
    fn start(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn connect(&mut self) -> Result<(), ModuleError> {
        // The mesh is wired at construction; nothing to establish.
        Ok(())
    }

    fn send(&mut self, dest: &NodeId, message: Message) -> Result<(), ModuleError> {
        let Some(peer) = self.peers.get(dest) else {
            return Err(ModuleError::new(format!("unknown peer: {dest}")));
        };
        let event = Event::message_received(self.node.clone(), message);
        if peer.try_send(EventList::from(event)).is_err() {
            warn!(dest = %dest, "peer inbox unavailable, dropping message");
        }
        Ok(())
    }

    fn events_out(&mut self) -> Option<mpsc::Receiver<EventList>> {
        self.inbox.take()
    }
}

#[cfg(test)]
#[path = "net_tests.rs"]
mod tests;
