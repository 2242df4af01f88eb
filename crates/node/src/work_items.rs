// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-module pending-event buffers

use crate::error::NodeError;
use stele_core::{EventList, ModuleId};

/// The routable module lanes, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Lane {
    Protocol,
    Wal,
    Client,
    Hash,
    Crypto,
    Timer,
    Net,
    App,
    Store,
}

impl Lane {
    pub const ALL: [Lane; 9] = [
        Lane::Protocol,
        Lane::Wal,
        Lane::Client,
        Lane::Hash,
        Lane::Crypto,
        Lane::Timer,
        Lane::Net,
        Lane::App,
        Lane::Store,
    ];

    pub fn of(dest: &ModuleId) -> Option<Lane> {
        match dest.as_str() {
            "protocol" => Some(Lane::Protocol),
            "wal" => Some(Lane::Wal),
            "client" => Some(Lane::Client),
            "hash" => Some(Lane::Hash),
            "crypto" => Some(Lane::Crypto),
            "timer" => Some(Lane::Timer),
            "net" => Some(Lane::Net),
            "app" => Some(Lane::App),
            "store" => Some(Lane::Store),
            _ => None,
        }
    }

    pub fn id(self) -> ModuleId {
        match self {
            Lane::Protocol => ModuleId::protocol(),
            Lane::Wal => ModuleId::wal(),
            Lane::Client => ModuleId::client(),
            Lane::Hash => ModuleId::hash(),
            Lane::Crypto => ModuleId::crypto(),
            Lane::Timer => ModuleId::timer(),
            Lane::Net => ModuleId::net(),
            Lane::App => ModuleId::app(),
            Lane::Store => ModuleId::store(),
        }
    }
}

/// Outstanding events awaiting dispatch, one list per destination module.
///
/// Only per-lane FIFO order lives here; the total order across modules is
/// decided by the dispatcher's scheduling.
#[derive(Debug, Default)]
pub(crate) struct WorkItems {
    protocol: EventList,
    wal: EventList,
    client: EventList,
    hash: EventList,
    crypto: EventList,
    timer: EventList,
    net: EventList,
    app: EventList,
    store: EventList,
}

impl WorkItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition a batch by destination, appending each event to its
    /// lane. Fails on the first event whose destination is not a known
    /// lane; events before it stay buffered (the failure is terminal).
    pub fn add(&mut self, batch: EventList) -> Result<(), NodeError> {
        for event in batch {
            let Some(lane) = Lane::of(&event.dest) else {
                return Err(NodeError::UnknownDestination(event.dest));
            };
            self.lane_mut(lane).push_back(event);
        }
        Ok(())
    }

    pub fn get(&self, lane: Lane) -> &EventList {
        match lane {
            Lane::Protocol => &self.protocol,
            Lane::Wal => &self.wal,
            Lane::Client => &self.client,
            Lane::Hash => &self.hash,
            Lane::Crypto => &self.crypto,
            Lane::Timer => &self.timer,
            Lane::Net => &self.net,
            Lane::App => &self.app,
            Lane::Store => &self.store,
        }
    }

    /// Drain a lane, clearing it.
    pub fn take(&mut self, lane: Lane) -> EventList {
        std::mem::take(self.lane_mut(lane))
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut EventList {
        match lane {
            Lane::Protocol => &mut self.protocol,
            Lane::Wal => &mut self.wal,
            Lane::Client => &mut self.client,
            Lane::Hash => &mut self.hash,
            Lane::Crypto => &mut self.crypto,
            Lane::Timer => &mut self.timer,
            Lane::Net => &mut self.net,
            Lane::App => &mut self.app,
            Lane::Store => &mut self.store,
        }
    }
}

#[cfg(test)]
#[path = "work_items_tests.rs"]
mod tests;
