// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node-level error types

use stele_core::{ModuleError, ModuleId};
use thiserror::Error;

/// Terminal and construction-time node errors.
///
/// Clone because the fail-once notifier hands the same terminal error to
/// every caller that observes shutdown: `run`, `submit_request`, `step`,
/// and `status` all report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// The node stopped at the caller's request.
    #[error("stopped at caller request")]
    Stopped,

    /// A module's apply failed or panicked. Terminal: the engine never
    /// retries.
    #[error("module {module} failed: {source}")]
    Module {
        module: ModuleId,
        #[source]
        source: ModuleError,
    },

    /// A routed event named a module that is not registered.
    #[error("no module registered for destination {0}")]
    UnknownDestination(ModuleId),

    /// A module set entry named an id outside the routable lanes.
    #[error("unknown module id: {0}")]
    UnknownModule(ModuleId),

    /// Two module set entries claimed the same id.
    #[error("duplicate module: {0}")]
    DuplicateModule(ModuleId),

    /// WAL replay failed before the dispatcher started.
    #[error("could not load WAL: {0}")]
    WalLoad(ModuleError),

    /// The node never reached its dispatch loop.
    #[error("node not started")]
    NotStarted,

    #[error("node already started")]
    AlreadyStarted,
}
