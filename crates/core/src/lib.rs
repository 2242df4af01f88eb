// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stele-core: event types and module contracts for the stele
//! state-machine-replication engine

pub mod macros;

pub mod event;
pub mod id;
pub mod module;

pub use event::{Event, EventBody, EventList, Message, Origin};
pub use id::{ClientId, ModuleId, NodeId, ReqNo, RetentionIndex, SeqNo};
pub use module::{ActiveModule, Interceptor, ModuleError, PassiveModule, Transport, Wal};
