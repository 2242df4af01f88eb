// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes for nodes, clients, modules, and sequence numbers

use crate::define_name;
use serde::{Deserialize, Serialize};

define_name! {
    /// Protocol-level node identifier, assigned by the embedder.
    pub struct NodeId;
}

define_name! {
    /// Identifier of a client of the replicated service.
    pub struct ClientId;
}

define_name! {
    /// Addressable module identifier. Events are routed on these names;
    /// the well-known lanes have constants below.
    pub struct ModuleId;
}

impl ModuleId {
    pub const fn protocol() -> Self {
        Self::from_static("protocol")
    }

    pub const fn wal() -> Self {
        Self::from_static("wal")
    }

    pub const fn client() -> Self {
        Self::from_static("client")
    }

    pub const fn hash() -> Self {
        Self::from_static("hash")
    }

    pub const fn crypto() -> Self {
        Self::from_static("crypto")
    }

    pub const fn timer() -> Self {
        Self::from_static("timer")
    }

    pub const fn net() -> Self {
        Self::from_static("net")
    }

    pub const fn app() -> Self {
        Self::from_static("app")
    }

    pub const fn store() -> Self {
        Self::from_static("store")
    }
}

/// Client-assigned request sequence number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReqNo(pub u64);

impl std::fmt::Display for ReqNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Protocol-assigned position in the total order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SeqNo(pub u64);

impl std::fmt::Display for SeqNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durability watermark attached to persisted events; entries below the
/// watermark may be truncated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RetentionIndex(pub u64);

impl std::fmt::Display for RetentionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
