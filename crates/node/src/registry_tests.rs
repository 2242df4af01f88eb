// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use stele_modules::NullProtocol;

#[test]
fn empty_set_gets_defaults_for_every_slot() {
    let registry = Registry::new(ModuleSet::new()).unwrap();

    assert!(matches!(registry.protocol, Module::Passive(_)));
    assert!(matches!(registry.app, Module::Passive(_)));
    assert!(matches!(registry.client, Module::Passive(_)));
    assert!(matches!(registry.hash, Module::Passive(_)));
    assert!(matches!(registry.crypto, Module::Passive(_)));
    assert!(matches!(registry.store, Module::Passive(_)));
    // The default timer owns its own concurrency.
    assert!(matches!(registry.timer, Module::Active(_)));
    assert!(registry.interceptor.is_none());
}

#[test]
fn supplied_modules_keep_their_classification() {
    let set = ModuleSet::new()
        .with_module("timer", Module::passive(NullProtocol::new()));

    let registry = Registry::new(set).unwrap();

    assert!(matches!(registry.timer, Module::Passive(_)));
}

#[test]
fn duplicate_ids_are_rejected() {
    let set = ModuleSet::new()
        .with_module("protocol", Module::passive(NullProtocol::new()))
        .with_module("protocol", Module::passive(NullProtocol::new()));

    let err = Registry::new(set).unwrap_err();

    assert_eq!(err, NodeError::DuplicateModule(ModuleId::protocol()));
}

#[test]
fn unknown_ids_are_rejected() {
    let set = ModuleSet::new().with_module("sidecar", Module::passive(NullProtocol::new()));

    let err = Registry::new(set).unwrap_err();

    assert_eq!(err, NodeError::UnknownModule(ModuleId::new("sidecar")));
}

#[test]
fn wal_and_net_ids_must_use_their_setters() {
    let set = ModuleSet::new().with_module("wal", Module::passive(NullProtocol::new()));
    assert_eq!(
        Registry::new(set).unwrap_err(),
        NodeError::UnknownModule(ModuleId::wal())
    );

    let set = ModuleSet::new().with_module("net", Module::passive(NullProtocol::new()));
    assert_eq!(
        Registry::new(set).unwrap_err(),
        NodeError::UnknownModule(ModuleId::net())
    );
}
