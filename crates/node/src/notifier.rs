// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fail-once latch coordinating shutdown

use crate::error::NodeError;
use crate::node::NodeStatus;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Process-wide fail-once latch.
///
/// Monotonic: the first `fail` wins and signals `exited`; once the exit
/// status is set it is terminal and every reader sees the same snapshot.
/// Workers and the dispatcher select on the signals and stand down.
pub(crate) struct ErrNotifier {
    state: Mutex<State>,
    exit: CancellationToken,
    exit_status: CancellationToken,
}

#[derive(Default)]
struct State {
    err: Option<NodeError>,
    status: Option<(Option<NodeStatus>, NodeError)>,
}

impl ErrNotifier {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            exit: CancellationToken::new(),
            exit_status: CancellationToken::new(),
        }
    }

    /// Record the first failure and signal exit. Later calls are ignored.
    pub fn fail(&self, err: NodeError) {
        let mut state = self.state.lock();
        if state.err.is_none() {
            state.err = Some(err);
            self.exit.cancel();
        }
    }

    pub fn err(&self) -> Option<NodeError> {
        self.state.lock().err.clone()
    }

    /// Record the terminal snapshot and signal status finalization. Later
    /// calls are ignored.
    pub fn set_exit_status(&self, status: Option<NodeStatus>, err: NodeError) {
        let mut state = self.state.lock();
        if state.status.is_none() {
            state.status = Some((status, err));
            self.exit_status.cancel();
        }
    }

    pub fn exit_status(&self) -> Option<(Option<NodeStatus>, NodeError)> {
        self.state.lock().status.clone()
    }

    /// Resolves once the first failure is recorded.
    pub async fn exited(&self) {
        self.exit.cancelled().await;
    }

    /// Resolves once the terminal snapshot is recorded.
    pub async fn exit_status_set(&self) {
        self.exit_status.cancelled().await;
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
