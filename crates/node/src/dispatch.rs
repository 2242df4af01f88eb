// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatcher: one loop shoveling events between modules.
//!
//! All merges and hand-offs pass through a single task, so the sequence
//! of intercepted batches is a total order: replaying it against the same
//! deterministic modules reproduces the run.

use crate::chans::{WorkChans, WorkRecvs};
use crate::error::NodeError;
use crate::node::{DebugOutPolicy, NodeConfig};
use crate::notifier::ErrNotifier;
use crate::registry::{Module, Registry};
use crate::work_items::{Lane, WorkItems};
use crate::worker::Worker;
use std::sync::Arc;
use stele_core::{ActiveModule, EventList, Interceptor, ModuleError, ModuleId, Transport, Wal};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Debug-mode state: module-produced events are diverted to `events_out`
/// (or dropped) instead of re-entering routing.
pub(crate) struct DebugMode {
    pub events_out: Option<mpsc::Sender<EventList>>,
}

/// Everything the dispatcher owns. Built at node construction, consumed
/// by [`Engine::process`].
pub(crate) struct Engine {
    pub registry: Registry,
    pub work_items: WorkItems,
    pub chans: WorkChans,
    pub recvs: WorkRecvs,
    pub notifier: Arc<ErrNotifier>,
    pub config: NodeConfig,
}

impl Engine {
    /// Route events until cancellation or a failure, then drain the
    /// workers and return the terminal error.
    pub async fn process(self, cancel: CancellationToken, debug: Option<DebugMode>) -> NodeError {
        let Engine { registry, mut work_items, chans, recvs, notifier, config } = self;
        let Registry { protocol, app, client, hash, crypto, timer, store, net, wal, interceptor } =
            registry;
        let WorkRecvs {
            protocol: protocol_rx,
            client: client_rx,
            hash: hash_rx,
            crypto: crypto_rx,
            timer: timer_rx,
            app: app_rx,
            store: store_rx,
            work_input: mut work_input_rx,
            active_out: mut active_rx,
            debug_in: mut debug_rx,
        } = recvs;
        let mut interceptor = interceptor;
        let debug_mode = debug.is_some();

        let mut tasks: JoinSet<()> = JoinSet::new();
        let mut active_lanes = ActiveLanes { modules: Vec::new(), net, wal };

        // One driver per passive module; active modules are written to
        // directly and their output streams forwarded into active_out.
        // TODO: allow several drivers on the hash lane; needs per-driver
        // hasher instances or an apply over &self.
        let worker_lanes = vec![
            (Lane::Protocol, protocol, protocol_rx),
            (Lane::Client, client, client_rx),
            (Lane::Hash, hash, hash_rx),
            (Lane::Crypto, crypto, crypto_rx),
            (Lane::Timer, timer, timer_rx),
            (Lane::App, app, app_rx),
            (Lane::Store, store, store_rx),
        ];
        for (lane, module, rx) in worker_lanes {
            match module {
                Module::Passive(module) => {
                    tasks.spawn(
                        Worker {
                            module_id: lane.id(),
                            module,
                            rx,
                            out: chans.work_input.clone(),
                            notifier: Arc::clone(&notifier),
                        }
                        .run(),
                    );
                }
                Module::Active(mut module) => {
                    if let Some(stream) = module.events_out() {
                        spawn_forwarder(
                            &mut tasks,
                            lane.id(),
                            stream,
                            chans.active_out.clone(),
                            Arc::clone(&notifier),
                        );
                    }
                    active_lanes.modules.push((lane, module));
                }
            }
        }
        if let Some(stream) = active_lanes.net.events_out() {
            spawn_forwarder(
                &mut tasks,
                ModuleId::net(),
                stream,
                chans.active_out.clone(),
                Arc::clone(&notifier),
            );
        }
        if let Some(stream) = active_lanes.wal.events_out() {
            spawn_forwarder(
                &mut tasks,
                ModuleId::wal(),
                stream,
                chans.active_out.clone(),
                Arc::clone(&notifier),
            );
        }

        loop {
            // Lanes owned by active modules never wait on the select:
            // apply_events is non-blocking, so their pending work is
            // handed over before anything else happens.
            deliver_active(&mut work_items, &mut active_lanes, &mut interceptor, &notifier);

            tokio::select! {
                _ = cancel.cancelled() => {
                    notifier.fail(NodeError::Stopped);
                }

                // Write pending lanes to their drivers. A lane joins the
                // select only while it has events, and the capacity-1
                // channel keeps one batch in flight per module, so no
                // empty list is ever transmitted. This is also the only
                // place events are intercepted: the single loop makes the
                // intercepted sequence a replayable total order.
                Ok(permit) = chans.protocol.reserve(), if !work_items.get(Lane::Protocol).is_empty() => {
                    let batch = work_items.take(Lane::Protocol);
                    intercept(&mut interceptor, batch.stripped(), &notifier);
                    permit.send(batch);
                }
                Ok(permit) = chans.client.reserve(), if !work_items.get(Lane::Client).is_empty() => {
                    let batch = work_items.take(Lane::Client);
                    intercept(&mut interceptor, batch.stripped(), &notifier);
                    permit.send(batch);
                }
                Ok(permit) = chans.hash.reserve(), if !work_items.get(Lane::Hash).is_empty() => {
                    let batch = work_items.take(Lane::Hash);
                    intercept(&mut interceptor, batch.stripped(), &notifier);
                    permit.send(batch);
                }
                Ok(permit) = chans.crypto.reserve(), if !work_items.get(Lane::Crypto).is_empty() => {
                    let batch = work_items.take(Lane::Crypto);
                    intercept(&mut interceptor, batch.stripped(), &notifier);
                    permit.send(batch);
                }
                Ok(permit) = chans.timer.reserve(), if !work_items.get(Lane::Timer).is_empty() => {
                    let batch = work_items.take(Lane::Timer);
                    intercept(&mut interceptor, batch.stripped(), &notifier);
                    permit.send(batch);
                }
                Ok(permit) = chans.app.reserve(), if !work_items.get(Lane::App).is_empty() => {
                    let batch = work_items.take(Lane::App);
                    intercept(&mut interceptor, batch.stripped(), &notifier);
                    permit.send(batch);
                }
                Ok(permit) = chans.store.reserve(), if !work_items.get(Lane::Store).is_empty() => {
                    let batch = work_items.take(Lane::Store);
                    intercept(&mut interceptor, batch.stripped(), &notifier);
                    permit.send(batch);
                }

                // Merge batches produced by modules and external
                // submitters; in debug mode they are diverted instead of
                // routed.
                Some(batch) = work_input_rx.recv() => {
                    match &debug {
                        Some(mode) => divert(&config, mode, batch).await,
                        None => {
                            if let Err(err) = work_items.add(batch) {
                                notifier.fail(err);
                            }
                        }
                    }
                }

                // Batches surfacing from active-module streams. Network
                // ingress is ignored in debug mode; other active output
                // follows the diversion rule.
                Some((source, batch)) = active_rx.recv() => {
                    match &debug {
                        Some(_) if source == ModuleId::net() => {
                            warn!(events = batch.len(), "ignoring incoming messages in debug mode");
                        }
                        Some(mode) => divert(&config, mode, batch).await,
                        None => {
                            if let Err(err) = work_items.add(batch) {
                                notifier.fail(err);
                            }
                        }
                    }
                }

                // Stepped events are routed normally. Stepping outside
                // debug mode is a protocol violation: logged, still
                // applied.
                Some(batch) = debug_rx.recv() => {
                    if !debug_mode {
                        warn!(events = batch.len(), "events submitted through the debug interface outside debug mode");
                    }
                    if let Err(err) = work_items.add(batch) {
                        notifier.fail(err);
                    }
                }

                _ = notifier.exited() => break,
            }
        }

        let err = notifier.err().unwrap_or(NodeError::Stopped);
        notifier.set_exit_status(None, err.clone());
        // Workers drop their pending batch on the exit signal; wait for
        // them so no apply is still running when the caller returns.
        while tasks.join_next().await.is_some() {}
        err
    }
}

/// Modules the dispatcher writes into directly instead of through a
/// worker.
struct ActiveLanes {
    modules: Vec<(Lane, Box<dyn ActiveModule>)>,
    net: Box<dyn Transport>,
    wal: Box<dyn Wal>,
}

impl ActiveLanes {
    fn is_active(&self, lane: Lane) -> bool {
        matches!(lane, Lane::Net | Lane::Wal) || self.modules.iter().any(|(l, _)| *l == lane)
    }

    fn apply(&mut self, lane: Lane, batch: EventList) -> Result<(), ModuleError> {
        match lane {
            Lane::Net => self.net.apply_events(batch),
            Lane::Wal => self.wal.apply_events(batch),
            _ => {
                for (l, module) in &mut self.modules {
                    if *l == lane {
                        return module.apply_events(batch);
                    }
                }
                // Unreachable when guarded by is_active.
                Ok(())
            }
        }
    }
}

/// Hand every pending active-lane batch to its module. Follow-ups may
/// land back in an active lane, so sweep until nothing moves.
fn deliver_active(
    work_items: &mut WorkItems,
    active_lanes: &mut ActiveLanes,
    interceptor: &mut Option<Box<dyn Interceptor>>,
    notifier: &ErrNotifier,
) {
    while notifier.err().is_none() {
        let mut delivered = false;
        for lane in Lane::ALL {
            if !active_lanes.is_active(lane) || work_items.get(lane).is_empty() {
                continue;
            }
            let (primaries, follow_ups) = work_items.take(lane).strip();
            intercept(interceptor, primaries.clone(), notifier);
            if let Err(err) = active_lanes.apply(lane, primaries) {
                notifier.fail(NodeError::Module { module: lane.id(), source: err });
            }
            if !follow_ups.is_empty() {
                if let Err(err) = work_items.add(follow_ups) {
                    notifier.fail(err);
                }
            }
            delivered = true;
        }
        if !delivered {
            break;
        }
    }
}

/// Pass a stripped batch to the interceptor, if one is installed.
fn intercept(
    interceptor: &mut Option<Box<dyn Interceptor>>,
    batch: EventList,
    notifier: &ErrNotifier,
) {
    let Some(interceptor) = interceptor else { return };
    if let Err(err) = interceptor.intercept(batch) {
        notifier.fail(NodeError::Module { module: ModuleId::new("interceptor"), source: err });
    }
}

/// Debug-mode diversion of module-produced events.
async fn divert(config: &NodeConfig, mode: &DebugMode, batch: EventList) {
    let Some(out) = &mode.events_out else {
        for event in &batch {
            debug!(event = %event.log_summary(), "dropping internal event in debug mode");
        }
        return;
    };
    match config.debug_out_policy {
        // The caller opted into stalling on a slow consumer.
        DebugOutPolicy::Block => {
            let _ = out.send(batch).await;
        }
        DebugOutPolicy::Drop => {
            if let Err(mpsc::error::TrySendError::Full(batch)) = out.try_send(batch) {
                warn!(events = batch.len(), "debug output full, dropping events");
            }
        }
    }
}

/// Pump one active module's output stream into the shared fan-in channel.
fn spawn_forwarder(
    tasks: &mut JoinSet<()>,
    source: ModuleId,
    mut stream: mpsc::Receiver<EventList>,
    out: mpsc::Sender<(ModuleId, EventList)>,
    notifier: Arc<ErrNotifier>,
) {
    tasks.spawn(async move {
        loop {
            tokio::select! {
                _ = notifier.exited() => return,
                batch = stream.recv() => {
                    let Some(batch) = batch else { return };
                    if batch.is_empty() {
                        continue;
                    }
                    tokio::select! {
                        _ = notifier.exited() => return,
                        sent = out.send((source.clone(), batch)) => {
                            if sent.is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        }
    });
}
