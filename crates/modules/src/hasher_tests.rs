// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use stele_core::{ModuleId, Origin};

#[test]
fn hashes_concatenated_chunks() {
    let mut hasher = Sha256Hasher::new();
    let origin = Origin::new(ModuleId::client(), 3);

    let out = hasher
        .apply(EventList::from(Event::hash_request(
            vec![b"ab".to_vec(), b"c".to_vec()],
            origin.clone(),
        )))
        .unwrap();

    let expected = Sha256::digest(b"abc").to_vec();
    assert_eq!(out.len(), 1);
    let event = out.iter().next().unwrap();
    assert_eq!(event.dest, ModuleId::client());
    assert!(
        matches!(&event.body, EventBody::HashResult { digest, origin: o } if *digest == expected && *o == origin)
    );
}

#[test]
fn independent_requests_produce_independent_results() {
    let mut hasher = Sha256Hasher::new();
    let batch = EventList::from(vec![
        Event::hash_request(vec![b"one".to_vec()], Origin::new(ModuleId::protocol(), 1)),
        Event::hash_request(vec![b"two".to_vec()], Origin::new(ModuleId::protocol(), 2)),
    ]);

    let out = hasher.apply(batch).unwrap();

    let origins: Vec<u64> = out
        .iter()
        .filter_map(|e| match &e.body {
            EventBody::HashResult { origin, .. } => Some(origin.id),
            _ => None,
        })
        .collect();
    assert_eq!(origins, vec![1, 2]);
}

#[test]
fn rejects_events_it_does_not_understand() {
    let mut hasher = Sha256Hasher::new();
    let err = hasher.apply(EventList::from(Event::init())).unwrap_err();
    assert!(err.to_string().contains("node:init"));
}
