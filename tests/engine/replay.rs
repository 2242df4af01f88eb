// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic replay: the same inputs yield the same trace

use crate::prelude::*;
use stele_modules::Trace;

/// One full request pipeline against the default modules, returning the
/// recorded trace. Submission waits for Init so a single request chain is
/// in flight at a time — the precondition for a deterministic total
/// order.
async fn traced_run() -> Trace {
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

    for (req_no, payload) in [(1u64, b"alpha".to_vec()), (2, b"beta".to_vec())] {
        running
            .node
            .submit_request(
                &running.cancel,
                ClientId::new("c1"),
                ReqNo(req_no),
                payload,
                b"sig".to_vec(),
            )
            .await
            .unwrap();
        wait_for("request delivery", || deliveries.delivered().len() as u64 == req_no).await;
    }

    running.stop().await.unwrap_err();
    trace
}

#[tokio::test]
async fn identical_runs_produce_identical_traces() {
    let first = traced_run().await;
    let second = traced_run().await;

    assert_eq!(first.batches(), second.batches());
    // And the trace is non-trivial: both requests made it through.
    assert!(first.len() > 2);
}
