// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single request: verified, stored, ordered, persisted, delivered

use crate::prelude::*;

#[tokio::test]
async fn a_submitted_request_flows_through_every_module_in_order() {
    let interceptor = RecordingInterceptor::new();
    let trace = interceptor.trace();
    let app = CollectingApp::new();
    let deliveries = app.deliveries();
    let modules = ModuleSet::new()
        .with_module("app", Module::passive(app))
        .with_interceptor(interceptor);
    let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();

    let running = Running::start(node);
    wait_for("init delivery", || !trace.is_empty()).await;

    running
        .node
        .submit_request(&running.cancel, ClientId::new("c1"), ReqNo(7), b"x".to_vec(), b"sig".to_vec())
        .await
        .unwrap();
    wait_for("application delivery", || !deliveries.delivered().is_empty()).await;

    running.stop().await.unwrap_err();

    // The application saw exactly one delivery.
    assert_eq!(deliveries.delivered(), vec![(SeqNo(1), b"x".to_vec())]);

    // One request in flight at a time: the intercepted order is the full
    // pipeline, and each module's input order is its subsequence.
    let expected: Vec<(String, String)> = [
        ("node:init", "protocol"),
        ("client:request", "client"),
        ("crypto:verify", "crypto"),
        ("crypto:verified", "client"),
        ("store:put", "store"),
        ("protocol:request_ready", "protocol"),
        ("wal:persist", "wal"),
        ("app:deliver", "app"),
    ]
    .iter()
    .map(|(n, d)| (n.to_string(), d.to_string()))
    .collect();
    assert_eq!(delivered_names(&trace), expected);

    // No batch observed by the interceptor was empty.
    assert!(trace.batches().iter().all(|batch| !batch.is_empty()));
}
