// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stele-node: the event-dispatch engine of a replication node.
//!
//! A [`Node`] routes typed events between a fixed set of modules through a
//! single dispatcher loop, preserving a replayable total order of
//! deliveries, replaying the write-ahead log ahead of any live input, and
//! exposing a debug mode where the caller drives event injection.

pub mod error;
pub mod node;
pub mod registry;

mod chans;
mod dispatch;
mod notifier;
mod work_items;
mod worker;

pub use error::NodeError;
pub use node::{DebugOutPolicy, Node, NodeConfig, NodeStatus};
pub use registry::{Module, ModuleSet};
