// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel plumbing between the dispatcher, workers, and producers

use stele_core::{EventList, ModuleId};
use tokio::sync::mpsc;

/// Sender side of the engine's channels.
///
/// One capacity-1 channel per worker-driven lane: the dispatcher writes a
/// lane only when it has pending events, so at most one non-empty batch is
/// in flight per module. Lanes owned by active modules (WAL, transport)
/// have no channel — the dispatcher writes into those modules directly.
pub(crate) struct WorkChans {
    pub protocol: mpsc::Sender<EventList>,
    pub client: mpsc::Sender<EventList>,
    pub hash: mpsc::Sender<EventList>,
    pub crypto: mpsc::Sender<EventList>,
    pub timer: mpsc::Sender<EventList>,
    pub app: mpsc::Sender<EventList>,
    pub store: mpsc::Sender<EventList>,
    /// Any producer may push a batch here for routing: workers, request
    /// submission, forwarded active-module output.
    pub work_input: mpsc::Sender<EventList>,
    /// Active-module streams, fanned in and tagged with their source.
    pub active_out: mpsc::Sender<(ModuleId, EventList)>,
    /// Stepped batches from the debug interface.
    pub debug_in: mpsc::Sender<EventList>,
}

/// Receiver side, consumed once when the dispatcher starts.
pub(crate) struct WorkRecvs {
    pub protocol: mpsc::Receiver<EventList>,
    pub client: mpsc::Receiver<EventList>,
    pub hash: mpsc::Receiver<EventList>,
    pub crypto: mpsc::Receiver<EventList>,
    pub timer: mpsc::Receiver<EventList>,
    pub app: mpsc::Receiver<EventList>,
    pub store: mpsc::Receiver<EventList>,
    pub work_input: mpsc::Receiver<EventList>,
    pub active_out: mpsc::Receiver<(ModuleId, EventList)>,
    pub debug_in: mpsc::Receiver<EventList>,
}

impl WorkChans {
    pub fn new(work_input_buffer: usize) -> (WorkChans, WorkRecvs) {
        let buffer = work_input_buffer.max(1);
        let (protocol_tx, protocol_rx) = mpsc::channel(1);
        let (client_tx, client_rx) = mpsc::channel(1);
        let (hash_tx, hash_rx) = mpsc::channel(1);
        let (crypto_tx, crypto_rx) = mpsc::channel(1);
        let (timer_tx, timer_rx) = mpsc::channel(1);
        let (app_tx, app_rx) = mpsc::channel(1);
        let (store_tx, store_rx) = mpsc::channel(1);
        let (work_input_tx, work_input_rx) = mpsc::channel(buffer);
        let (active_out_tx, active_out_rx) = mpsc::channel(buffer);
        let (debug_in_tx, debug_in_rx) = mpsc::channel(1);
        (
            WorkChans {
                protocol: protocol_tx,
                client: client_tx,
                hash: hash_tx,
                crypto: crypto_tx,
                timer: timer_tx,
                app: app_tx,
                store: store_tx,
                work_input: work_input_tx,
                active_out: active_out_tx,
                debug_in: debug_in_tx,
            },
            WorkRecvs {
                protocol: protocol_rx,
                client: client_rx,
                hash: hash_rx,
                crypto: crypto_rx,
                timer: timer_rx,
                app: app_rx,
                store: store_rx,
                work_input: work_input_rx,
                active_out: active_out_rx,
                debug_in: debug_in_rx,
            },
        )
    }
}
