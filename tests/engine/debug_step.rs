// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Debug mode: stepped events route, module output is diverted

use crate::prelude::*;
use stele_core::Transport;
use stele_modules::ChannelTransport;

#[tokio::test]
async fn stepped_hash_request_surfaces_its_result_on_events_out() {
    let interceptor = RecordingInterceptor::new();
    let trace = interceptor.trace();
    let modules = ModuleSet::new().with_interceptor(interceptor);
    let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();

    let (events_tx, mut events_rx) = mpsc::channel(16);
    let running = Running::start_debug(node, Some(events_tx));

    running
        .node
        .step(
            &running.cancel,
            Event::hash_request(vec![b"abc".to_vec()], Origin::new(ModuleId::client(), 1)),
        )
        .await
        .unwrap();

    // The module's output lands on events_out instead of re-entering
    // routing.
    let diverted = events_rx.recv().await.unwrap();
    assert_eq!(diverted.len(), 1);
    let event = diverted.iter().next().unwrap();
    assert_eq!(event.name(), "hash:result");
    assert!(matches!(
        &event.body,
        EventBody::HashResult { origin, .. } if origin.id == 1
    ));

    // Only the stepped delivery was routed: no Init, no result delivery.
    assert_eq!(
        delivered_names(&trace),
        vec![("hash:request".to_string(), "hash".to_string())]
    );

    assert_eq!(running.stop().await, Err(NodeError::Stopped));
}

#[tokio::test]
async fn timer_releases_surface_on_events_out_in_debug_mode() {
    let node =
        Node::new(NodeId::new("n0"), NodeConfig::default(), ModuleSet::new()).unwrap();

    let (events_tx, mut events_rx) = mpsc::channel(16);
    let running = Running::start_debug(node, Some(events_tx));

    running
        .node
        .step(&running.cancel, Event::timer_delay(10, vec![Event::timer_trigger(9)]))
        .await
        .unwrap();

    let released = events_rx.recv().await.unwrap();
    assert!(matches!(
        released.iter().next().unwrap().body,
        EventBody::TimerTrigger { tick: 9 }
    ));

    running.stop().await.unwrap_err();
}

#[tokio::test]
async fn stepped_send_message_reaches_the_transport() {
    let mut mesh =
        ChannelTransport::mesh(&[NodeId::new("n0"), NodeId::new("n1")]);
    let mut peer = mesh.pop().unwrap();
    let transport = mesh.pop().unwrap();
    let mut peer_inbox = peer.events_out().unwrap();

    let modules = ModuleSet::new().with_net(transport);
    let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();
    let running = Running::start_debug(node, None);

    running
        .node
        .step(
            &running.cancel,
            Event::send_message(
                vec![NodeId::new("n1")],
                stele_core::Message::new(b"ping".to_vec()),
            ),
        )
        .await
        .unwrap();

    let received = peer_inbox.recv().await.unwrap();
    assert!(matches!(
        &received.iter().next().unwrap().body,
        EventBody::MessageReceived { source, message }
            if *source == NodeId::new("n0") && message.payload == b"ping"
    ));

    running.stop().await.unwrap_err();
}
