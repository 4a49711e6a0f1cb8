use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use alloy::primitives::Address;
use bevy::log::{error, info};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::{mpsc, oneshot};

use crate::data::model::{GatewayEvent, GatewayRequest, RequestId, VoxelOp};
use crate::data::{GatewayError, VoxelGateway};

const EVENT_CAPACITY: usize = 256;

/// Bevy resource connecting the app to a gateway worker thread.
/// Requests go out on an unbounded tokio channel; events come back on a
/// crossbeam channel that systems drain each frame. Dropping the resource
/// stops the worker and its polling timers.
#[derive(bevy::prelude::Resource)]
pub struct GatewayChannel {
    requests: mpsc::UnboundedSender<GatewayRequest>,
    pub events: Receiver<GatewayEvent>,
    wallet: Option<Address>,
    next_id: AtomicU64,
    shutdown: Option<oneshot::Sender<()>>,
}

/// Worker-side ends of a [`GatewayChannel`].
pub(crate) struct WorkerEnds {
    pub requests: mpsc::UnboundedReceiver<GatewayRequest>,
    pub events: Sender<GatewayEvent>,
    pub shutdown: oneshot::Receiver<()>,
}

impl GatewayChannel {
    pub(crate) fn pair(wallet: Option<Address>) -> (Self, WorkerEnds) {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = crossbeam_channel::bounded(EVENT_CAPACITY);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let channel = Self {
            requests: req_tx,
            events: event_rx,
            wallet,
            next_id: AtomicU64::new(1),
            shutdown: Some(shutdown_tx),
        };
        let ends = WorkerEnds {
            requests: req_rx,
            events: event_tx,
            shutdown: shutdown_rx,
        };
        (channel, ends)
    }

    /// Stop the worker. Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for GatewayChannel {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl VoxelGateway for GatewayChannel {
    fn submit(&self, op: VoxelOp) -> Result<RequestId, GatewayError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.requests
            .send(GatewayRequest { id, op })
            .map_err(|_| GatewayError::Disconnected)?;
        info!("gateway: request {id} queued: {op:?}");
        Ok(id)
    }

    fn wallet_address(&self) -> Option<Address> {
        self.wallet
    }
}

/// Run `worker` to completion on a dedicated thread with its own
/// current-thread tokio runtime.
pub(crate) fn spawn_worker<F>(name: &str, worker: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let name = name.to_string();
    let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                error!("{name}: failed to build tokio runtime: {err}");
                return;
            }
        };
        rt.block_on(worker);
        info!("{name}: stopped");
    });
    if let Err(err) = spawned {
        error!("failed to spawn gateway thread: {err}");
    }
}
