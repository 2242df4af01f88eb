// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Back-pressure: a blocked module accumulates work, nothing is lost

use crate::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use stele_core::ModuleError;

const REQUESTS: u64 = 1000;

/// Protocol that stalls on its first batch, then records the request
/// numbers it is handed.
struct SlowCollector {
    stalled: bool,
    seen: Arc<Mutex<Vec<u64>>>,
}

impl SlowCollector {
    fn new() -> (Self, Arc<Mutex<Vec<u64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (Self { stalled: false, seen: Arc::clone(&seen) }, seen)
    }
}

impl stele_core::PassiveModule for SlowCollector {
    fn apply(&mut self, batch: EventList) -> Result<EventList, ModuleError> {
        if !self.stalled {
            self.stalled = true;
            std::thread::sleep(Duration::from_millis(100));
        }
        for event in batch {
            if let EventBody::RequestReady { req_no, .. } = event.body {
                self.seen.lock().push(req_no.0);
            }
        }
        Ok(EventList::new())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn requests_submitted_against_a_blocked_module_arrive_in_order() {
    let (protocol, seen) = SlowCollector::new();
    let modules = ModuleSet::new().with_module("protocol", Module::passive(protocol));
    let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();

    let running = Running::start(node);

    // The first batch (Init) stalls the protocol driver for 100ms while
    // every request below is submitted; they accumulate in the pending
    // buffer and drain afterwards in one or more batches.
    for req_no in 1..=REQUESTS {
        running
            .node
            .submit_request(
                &running.cancel,
                ClientId::new("c1"),
                ReqNo(req_no),
                req_no.to_le_bytes().to_vec(),
                vec![],
            )
            .await
            .unwrap();
    }

    wait_for("all requests to reach the protocol", || {
        seen.lock().len() as u64 == REQUESTS
    })
    .await;

    running.stop().await.unwrap_err();

    let seen = seen.lock();
    let expected: Vec<u64> = (1..=REQUESTS).collect();
    assert_eq!(*seen, expected, "requests lost or reordered");
}
