// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL replay: recovered events precede every live event

use crate::prelude::*;
use stele_modules::JsonWal;

#[tokio::test]
async fn recovery_replays_the_log_ahead_of_init_and_continues_the_order() {
    let dir = tempfile::tempdir().unwrap();
    let wal_path = dir.path().join("events.wal");

    // First life: order two requests, then stop.
    {
        let app = CollectingApp::new();
        let deliveries = app.deliveries();
        let modules = ModuleSet::new()
            .with_module("app", Module::passive(app))
            .with_wal(JsonWal::open(&wal_path).unwrap());
        let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();

        let running = Running::start(node);
        running
            .node
            .submit_request(&running.cancel, ClientId::new("c1"), ReqNo(1), b"a".to_vec(), vec![])
            .await
            .unwrap();
        wait_for("first delivery", || deliveries.delivered().len() == 1).await;
        running
            .node
            .submit_request(&running.cancel, ClientId::new("c1"), ReqNo(2), b"b".to_vec(), vec![])
            .await
            .unwrap();
        wait_for("second delivery", || deliveries.delivered().len() == 2).await;
        running.stop().await.unwrap_err();
    }

    // Second life: the same WAL replays before anything live.
    let interceptor = RecordingInterceptor::new();
    let trace = interceptor.trace();
    let app = CollectingApp::new();
    let deliveries = app.deliveries();
    let modules = ModuleSet::new()
        .with_module("app", Module::passive(app))
        .with_wal(JsonWal::open(&wal_path).unwrap())
        .with_interceptor(interceptor);
    let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();

    let running = Running::start(node);
    wait_for("recovery hand-off", || deliveries.recovered().len() == 2).await;

    // The protocol's first batch holds both replayed entries, then Init.
    let names: Vec<String> =
        delivered_names(&trace).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names[..3], ["wal:entry", "wal:entry", "node:init"]);
    assert_eq!(deliveries.recovered(), vec![b"a".to_vec(), b"b".to_vec()]);

    // Ordering resumes where the recovered log left off.
    running
        .node
        .submit_request(&running.cancel, ClientId::new("c1"), ReqNo(3), b"c".to_vec(), vec![])
        .await
        .unwrap();
    wait_for("post-recovery delivery", || !deliveries.delivered().is_empty()).await;
    assert_eq!(deliveries.delivered(), vec![(SeqNo(3), b"c".to_vec())]);

    running.stop().await.unwrap_err();
}

#[tokio::test]
async fn a_wal_that_fails_to_load_leaves_the_node_unstarted() {
    let dir = tempfile::tempdir().unwrap();
    let wal_path = dir.path().join("events.wal");
    std::fs::write(&wal_path, "garbage\n").unwrap();

    let modules = ModuleSet::new().with_wal(JsonWal::open(&wal_path).unwrap());
    let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();

    let cancel = CancellationToken::new();
    let err = node.run(cancel.clone()).await.unwrap_err();
    assert!(matches!(err, NodeError::WalLoad(_)));

    // The node reports "not started" to status readers.
    assert_eq!(node.status(&cancel).await, Err(NodeError::NotStarted));
}
