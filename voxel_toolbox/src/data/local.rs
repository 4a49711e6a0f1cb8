//! In-process ledger for offline runs: applies the contract's ownership rules
//! to an in-memory voxel map and reports through the same channel as the EVM
//! gateway.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use alloy::primitives::{keccak256, Address, TxHash};
use alloy_chains::Chain;
use bevy::log::info;
use crossbeam_channel::Sender;

use crate::data::channel::{spawn_worker, GatewayChannel, WorkerEnds};
use crate::data::model::{
    Coordinate, GatewayEvent, GatewayOutcome, NetworkStatus, SeedVoxel, VoxelOp, VoxelRecord,
    WorldEvent,
};

const NETWORK_CHECK_INTERVAL: Duration = Duration::from_secs(1);
/// Simulated confirmation latency.
const CONFIRMATION_DELAY: Duration = Duration::from_millis(50);

/// Read a world fixture: a JSON array of voxels.
pub fn load_world_fixture(path: &Path) -> Result<Vec<SeedVoxel>, std::io::Error> {
    let json = std::fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(std::io::Error::from)
}

/// Create a gateway channel backed by an in-memory ledger seeded with `seed`.
/// Seed voxels are announced as world events before any request is served.
pub fn init_local_channel(
    wallet: Option<Address>,
    chain: Chain,
    seed: Vec<SeedVoxel>,
) -> GatewayChannel {
    let (channel, ends) = GatewayChannel::pair(wallet);
    let ledger = LocalLedger::from_seed(seed);
    spawn_worker("voxel-local-ledger", local_loop(ledger, wallet, chain, ends));
    channel
}

#[derive(Default)]
struct LocalLedger {
    voxels: HashMap<Coordinate, VoxelRecord>,
    tx_count: u64,
}

impl LocalLedger {
    fn from_seed(seed: Vec<SeedVoxel>) -> Self {
        let voxels = seed
            .into_iter()
            .map(|v| {
                let record = VoxelRecord {
                    material: v.material,
                    owner: v.owner,
                };
                (v.at, record)
            })
            .collect();
        Self {
            voxels,
            tx_count: 0,
        }
    }

    /// Apply `op` as `sender`, mirroring the contract's revert conditions.
    fn apply(&mut self, sender: Address, op: VoxelOp) -> Result<(TxHash, WorldEvent), String> {
        let at = op.coordinate();
        let existing = self.voxels.get(&at).copied();
        let event = match (op, existing) {
            (VoxelOp::Place { material, .. }, None) => {
                self.voxels.insert(
                    at,
                    VoxelRecord {
                        material,
                        owner: sender,
                    },
                );
                WorldEvent::Placed {
                    at,
                    material,
                    owner: sender,
                }
            }
            (VoxelOp::Place { .. }, Some(_)) => return Err("execution reverted: occupied".into()),
            (_, None) => return Err("execution reverted: no voxel".into()),
            (_, Some(record)) if record.owner != sender => {
                return Err("execution reverted: not owner".into())
            }
            (VoxelOp::Destroy { .. }, Some(_)) => {
                self.voxels.remove(&at);
                WorldEvent::Destroyed { at }
            }
            (VoxelOp::Repaint { material, .. }, Some(record)) => {
                self.voxels.insert(at, VoxelRecord { material, ..record });
                WorldEvent::Repainted { at, material }
            }
            (VoxelOp::Transfer { to, .. }, Some(record)) => {
                self.voxels.insert(at, VoxelRecord { owner: to, ..record });
                WorldEvent::Transferred { at, to }
            }
        };
        self.tx_count += 1;
        Ok((keccak256(self.tx_count.to_be_bytes()), event))
    }
}

async fn local_loop(
    mut ledger: LocalLedger,
    wallet: Option<Address>,
    chain: Chain,
    ends: WorkerEnds,
) {
    let WorkerEnds {
        mut requests,
        events,
        mut shutdown,
    } = ends;

    info!("local ledger: seeded with {} voxels", ledger.voxels.len());
    for (&at, record) in &ledger.voxels {
        let placed = WorldEvent::Placed {
            at,
            material: record.material,
            owner: record.owner,
        };
        if events.send(GatewayEvent::World(placed)).is_err() {
            return;
        }
    }

    let mut network_tick = tokio::time::interval(NETWORK_CHECK_INTERVAL);
    loop {
        tokio::select! {
            _ = &mut shutdown => return,
            request = requests.recv() => {
                let Some(request) = request else { return };
                tokio::time::sleep(CONFIRMATION_DELAY).await;
                let (result, event) = match wallet {
                    Some(sender) => match ledger.apply(sender, request.op) {
                        Ok((hash, event)) => (Ok(hash), Some(event)),
                        Err(err) => (Err(err), None),
                    },
                    None => (Err("no wallet signer configured".to_string()), None),
                };
                let outcome = GatewayOutcome {
                    id: request.id,
                    op: request.op,
                    result,
                };
                if send_all(&events, outcome, event).is_err() {
                    return;
                }
            }
            _ = network_tick.tick() => {
                let status = NetworkStatus {
                    wallet,
                    chain_id: Some(chain.id()),
                };
                if events.send(GatewayEvent::Network(status)).is_err() {
                    return;
                }
            }
        }
    }
}

fn send_all(
    events: &Sender<GatewayEvent>,
    outcome: GatewayOutcome,
    event: Option<WorldEvent>,
) -> Result<(), ()> {
    if let Some(event) = event {
        events.send(GatewayEvent::World(event)).map_err(|_| ())?;
    }
    events.send(GatewayEvent::Outcome(outcome)).map_err(|_| ())
}
