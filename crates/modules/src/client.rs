// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client request tracking

use std::collections::HashMap;
use stele_core::{
    ClientId, Event, EventBody, EventList, ModuleError, ModuleId, Origin, PassiveModule, ReqNo,
};
use tracing::debug;

/// Tracks client requests, filters duplicates, and admits verified
/// requests into the protocol.
///
/// Authenticators are checked through the crypto module; on a positive
/// verdict the request is handed to the store with the protocol
/// announcement attached as a follow-up, so the announcement cannot
/// overtake the store write.
///
/// Request numbers are expected to increase per client; a request at or
/// below the highest admitted number is treated as a duplicate and
/// dropped.
#[derive(Debug, Default)]
pub struct ClientTracker {
    /// Highest admitted request number per client.
    admitted: HashMap<ClientId, ReqNo>,
    /// Requests awaiting a verification verdict, keyed by origin id.
    pending: HashMap<u64, PendingRequest>,
    next_origin: u64,
}

#[derive(Debug)]
struct PendingRequest {
    client_id: ClientId,
    req_no: ReqNo,
    data: Vec<u8>,
}

impl ClientTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_duplicate(&self, client_id: &ClientId, req_no: ReqNo) -> bool {
        self.admitted.get(client_id).is_some_and(|highest| req_no <= *highest)
    }
}

impl PassiveModule for ClientTracker {
    fn apply(&mut self, batch: EventList) -> Result<EventList, ModuleError> {
        let mut out = EventList::new();
        for event in batch {
            match event.body {
                EventBody::ClientRequest { client_id, req_no, data, authenticator } => {
                    if self.is_duplicate(&client_id, req_no) {
                        debug!(client = %client_id, req_no = %req_no, "dropping duplicate request");
                        continue;
                    }
                    let origin_id = self.next_origin;
                    self.next_origin += 1;
                    self.pending.insert(
                        origin_id,
                        PendingRequest { client_id, req_no, data: data.clone() },
                    );
                    out.push_back(Event::verify_request(
                        data,
                        authenticator,
                        Origin::new(ModuleId::client(), origin_id),
                    ));
                }
                EventBody::VerifyResult { valid, origin } => {
                    let Some(request) = self.pending.remove(&origin.id) else {
                        return Err(ModuleError::new(format!(
                            "verification verdict for unknown request: origin id {}",
                            origin.id
                        )));
                    };
                    if !valid {
                        debug!(
                            client = %request.client_id,
                            req_no = %request.req_no,
                            "rejecting request with bad authenticator"
                        );
                        continue;
                    }
                    self.admitted.insert(request.client_id.clone(), request.req_no);
                    out.push_back(
                        Event::store_request(
                            request.client_id.clone(),
                            request.req_no,
                            request.data.clone(),
                        )
                        .with_follow_up(Event::request_ready(
                            request.client_id,
                            request.req_no,
                            request.data,
                        )),
                    );
                }
                other => {
                    return Err(ModuleError::new(format!(
                        "unexpected event for client tracker: {}",
                        other.name()
                    )))
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
