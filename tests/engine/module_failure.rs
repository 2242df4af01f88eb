// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module failure: terminal, and sticky for every later call

use crate::prelude::*;
use stele_core::ModuleError;

/// Protocol that asks the hash module for a digest as soon as it starts.
struct HashOnInit;

impl stele_core::PassiveModule for HashOnInit {
    fn apply(&mut self, batch: EventList) -> Result<EventList, ModuleError> {
        let mut out = EventList::new();
        for event in batch {
            if matches!(event.body, EventBody::Init) {
                out.push_back(Event::hash_request(
                    vec![b"seed".to_vec()],
                    Origin::new(ModuleId::protocol(), 1),
                ));
            }
        }
        Ok(out)
    }
}

struct FailingHash;

impl stele_core::PassiveModule for FailingHash {
    fn apply(&mut self, _batch: EventList) -> Result<EventList, ModuleError> {
        Err(ModuleError::new("boom"))
    }
}

#[tokio::test]
async fn a_failed_module_takes_the_node_down_with_its_error() {
    let modules = ModuleSet::new()
        .with_module("protocol", Module::passive(HashOnInit))
        .with_module("hash", Module::passive(FailingHash));
    let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();

    let cancel = CancellationToken::new();
    let expected = NodeError::Module {
        module: ModuleId::hash(),
        source: ModuleError::new("boom"),
    };

    let result = node.run(cancel.clone()).await;
    assert_eq!(result, Err(expected.clone()));

    // Every later call reports the same terminal error.
    let submit = node
        .submit_request(&cancel, ClientId::new("c1"), ReqNo(1), b"x".to_vec(), vec![])
        .await;
    assert_eq!(submit, Err(expected.clone()));
    assert_eq!(node.step(&cancel, Event::init()).await, Err(expected.clone()));
    assert_eq!(node.status(&cancel).await, Err(expected));
}
