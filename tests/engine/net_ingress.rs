// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Network ingress: transport streams merge into routing

use crate::prelude::*;
use stele_core::{Message, Transport};
use stele_modules::ChannelTransport;

#[tokio::test]
async fn inbound_messages_are_routed_to_the_protocol() {
    let mut mesh = ChannelTransport::mesh(&[NodeId::new("n0"), NodeId::new("n1")]);
    let mut peer = mesh.pop().unwrap();
    let transport = mesh.pop().unwrap();

    let interceptor = RecordingInterceptor::new();
    let trace = interceptor.trace();
    let modules = ModuleSet::new().with_net(transport).with_interceptor(interceptor);
    let node = Node::new(NodeId::new("n0"), NodeConfig::default(), modules).unwrap();

    let running = Running::start(node);
    wait_for("init delivery", || !trace.is_empty()).await;

    peer.send(&NodeId::new("n0"), Message::new(b"ping".to_vec())).unwrap();

    wait_for("message delivery", || {
        delivered_names(&trace)
            .iter()
            .any(|(name, dest)| name == "net:received" && dest == "protocol")
    })
    .await;

    running.stop().await.unwrap_err();
}
