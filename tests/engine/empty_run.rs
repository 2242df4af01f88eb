// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Empty run: a no-op registry delivers exactly one Init event

use crate::prelude::*;

#[tokio::test]
async fn cancelled_idle_node_returns_stopped_having_seen_only_init() {
    let interceptor = RecordingInterceptor::new();
    let trace = interceptor.trace();
    let modules = ModuleSet::new()
        .with_module("protocol", Module::passive(NullProtocol::new()))
        .with_module("app", Module::passive(NullApp::new()))
        .with_interceptor(interceptor);
    let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();

    let running = Running::start(node);
    wait_for("init delivery", || !trace.is_empty()).await;

    let result = running.stop().await;
    assert_eq!(result, Err(NodeError::Stopped));

    assert_eq!(trace.batches().len(), 1);
    assert_eq!(
        delivered_names(&trace),
        vec![("node:init".to_string(), "protocol".to_string())]
    );
}
