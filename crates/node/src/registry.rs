// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module registry: name→module binding with defaults

use crate::error::NodeError;
use crate::work_items::Lane;
use stele_core::{ActiveModule, Interceptor, ModuleId, PassiveModule, Transport, Wal};
use stele_modules::{
    ClientTracker, InsecureCrypto, LocalOrder, MemStore, NullApp, NullTransport, NullWal,
    Sha256Hasher, TokioTimer,
};

/// A module as supplied by the embedder. The registry classifies each
/// slot by the capability set its module exposes: passive modules get an
/// engine-owned driver, active modules are written to directly.
pub enum Module {
    Passive(Box<dyn PassiveModule>),
    Active(Box<dyn ActiveModule>),
}

impl Module {
    pub fn passive(module: impl PassiveModule + 'static) -> Self {
        Self::Passive(Box::new(module))
    }

    pub fn active(module: impl ActiveModule + 'static) -> Self {
        Self::Active(Box::new(module))
    }
}

/// Modules supplied at node construction. Slots left empty are filled
/// with the defaults from `stele-modules`, so an empty set yields a
/// working single-replica node.
///
/// The WAL, transport, and interceptor have dedicated setters because
/// their contracts extend the plain module surface.
#[derive(Default)]
pub struct ModuleSet {
    modules: Vec<(ModuleId, Module)>,
    wal: Option<Box<dyn Wal>>,
    net: Option<Box<dyn Transport>>,
    interceptor: Option<Box<dyn Interceptor>>,
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a module to one of the routable ids: `protocol`, `app`,
    /// `client`, `hash`, `crypto`, `timer`, or `store`.
    pub fn with_module(mut self, id: impl Into<ModuleId>, module: Module) -> Self {
        self.modules.push((id.into(), module));
        self
    }

    pub fn with_wal(mut self, wal: impl Wal + 'static) -> Self {
        self.wal = Some(Box::new(wal));
        self
    }

    pub fn with_net(mut self, net: impl Transport + 'static) -> Self {
        self.net = Some(Box::new(net));
        self
    }

    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptor = Some(Box::new(interceptor));
        self
    }
}

/// Validated name→module binding with defaults applied. Read-only once
/// built; the dispatcher takes the modules apart at startup.
pub(crate) struct Registry {
    pub protocol: Module,
    pub app: Module,
    pub client: Module,
    pub hash: Module,
    pub crypto: Module,
    pub timer: Module,
    pub store: Module,
    pub net: Box<dyn Transport>,
    pub wal: Box<dyn Wal>,
    pub interceptor: Option<Box<dyn Interceptor>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").finish_non_exhaustive()
    }
}

impl Registry {
    /// Reject duplicate and unknown ids, then fill the remaining slots
    /// with defaults.
    pub fn new(set: ModuleSet) -> Result<Self, NodeError> {
        let mut protocol = None;
        let mut app = None;
        let mut client = None;
        let mut hash = None;
        let mut crypto = None;
        let mut timer = None;
        let mut store = None;

        for (id, module) in set.modules {
            let slot = match Lane::of(&id) {
                Some(Lane::Protocol) => &mut protocol,
                Some(Lane::App) => &mut app,
                Some(Lane::Client) => &mut client,
                Some(Lane::Hash) => &mut hash,
                Some(Lane::Crypto) => &mut crypto,
                Some(Lane::Timer) => &mut timer,
                Some(Lane::Store) => &mut store,
                // wal and net carry their own contracts; see the setters.
                Some(Lane::Wal) | Some(Lane::Net) | None => {
                    return Err(NodeError::UnknownModule(id))
                }
            };
            if slot.is_some() {
                return Err(NodeError::DuplicateModule(id));
            }
            *slot = Some(module);
        }

        Ok(Registry {
            protocol: protocol.unwrap_or_else(|| Module::passive(LocalOrder::new())),
            app: app.unwrap_or_else(|| Module::passive(NullApp::new())),
            client: client.unwrap_or_else(|| Module::passive(ClientTracker::new())),
            hash: hash.unwrap_or_else(|| Module::passive(Sha256Hasher::new())),
            crypto: crypto.unwrap_or_else(|| Module::passive(InsecureCrypto::new())),
            timer: timer.unwrap_or_else(|| Module::active(TokioTimer::new())),
            store: store.unwrap_or_else(|| Module::passive(MemStore::new())),
            net: set.net.unwrap_or_else(|| Box::new(NullTransport::new())),
            wal: set.wal.unwrap_or_else(|| Box::new(NullWal::new())),
            interceptor: set.interceptor,
        })
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
