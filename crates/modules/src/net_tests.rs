// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use stele_core::EventBody;

fn ids(names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|n| NodeId::new(n)).collect()
}

#[tokio::test]
async fn mesh_delivers_to_the_addressed_peer() {
    let mut mesh = ChannelTransport::mesh(&ids(&["n0", "n1", "n2"]));
    let mut inbox1 = mesh[1].events_out().unwrap();

    mesh[0].start().unwrap();
    mesh[0].connect().unwrap();
    mesh[0].send(&NodeId::new("n1"), Message::new(b"hello".to_vec())).unwrap();

    let batch = inbox1.recv().await.unwrap();
    assert_eq!(batch.len(), 1);
    let event = batch.iter().next().unwrap();
    assert!(matches!(
        &event.body,
        EventBody::MessageReceived { source, message }
            if *source == NodeId::new("n0") && message.payload == b"hello"
    ));
}

#[tokio::test]
async fn routed_send_events_fan_out_to_all_targets() {
    let mut mesh = ChannelTransport::mesh(&ids(&["n0", "n1", "n2"]));
    let mut inbox1 = mesh[1].events_out().unwrap();
    let mut inbox2 = mesh[2].events_out().unwrap();

    // The engine hands SendMessage events to the transport through the
    // trait's apply_events translation.
    mesh[0]
        .apply_events(EventList::from(Event::send_message(
            ids(&["n1", "n2"]),
            Message::new(b"m".to_vec()),
        )))
        .unwrap();

    assert_eq!(inbox1.recv().await.unwrap().len(), 1);
    assert_eq!(inbox2.recv().await.unwrap().len(), 1);
}

#[test]
fn sending_to_an_unknown_peer_is_an_error() {
    let mut mesh = ChannelTransport::mesh(&ids(&["n0"]));
    let err = mesh[0].send(&NodeId::new("nope"), Message::new(b"m".to_vec())).unwrap_err();
    assert!(err.to_string().contains("unknown peer"));
}

#[test]
fn null_transport_discards_sends() {
    let mut transport = NullTransport::new();
    transport.start().unwrap();
    transport.send(&NodeId::new("n1"), Message::new(b"m".to_vec())).unwrap();
    assert!(transport.events_out().is_none());
    transport.stop();
}
