//! EVM voxel gateway: dedicated thread + alloy → voxel contract.

use std::time::Duration;

use alloy::eips::BlockNumberOrTag;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{Filter, Log};
use alloy::sol;
use alloy::sol_types::SolEvent;
use bevy::log::{info, warn};
use crossbeam_channel::Sender;

use crate::data::channel::{spawn_worker, GatewayChannel, WorkerEnds};
use crate::data::model::{
    Coordinate, GatewayEvent, GatewayOutcome, GatewayRequest, NetworkStatus, VoxelOp, WorldEvent,
};
use crate::data::GatewayConfig;

const NETWORK_CHECK_INTERVAL: Duration = Duration::from_secs(1);
const LOG_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Widest `eth_getLogs` range asked of the node in one call.
const LOG_WINDOW: u64 = 2_000;
/// Windows scanned per poll tick, so a long backfill never starves requests.
const MAX_WINDOWS_PER_POLL: usize = 25;

sol! {
    #[sol(rpc)]
    contract VoxelWorld {
        event VoxelPlaced(address indexed owner, uint8 x, uint8 y, uint8 z, uint8 material);
        event VoxelRepainted(address indexed owner, uint8 x, uint8 y, uint8 z, uint8 material);
        event VoxelDestroyed(address indexed owner, uint8 x, uint8 y, uint8 z);
        event VoxelTransferred(address indexed from, address indexed to, uint8 x, uint8 y, uint8 z);

        function placeVoxel(uint8 x, uint8 y, uint8 z, uint8 material) external;
        function destroyVoxel(uint8 x, uint8 y, uint8 z) external;
        function repaintVoxel(uint8 x, uint8 y, uint8 z, uint8 material) external;
        function transferVoxel(address to, uint8 x, uint8 y, uint8 z) external;
    }
}

/// Voxel gateway backed by an EVM contract reached over JSON-RPC.
pub struct EvmGateway;

impl EvmGateway {
    pub fn spawn(config: GatewayConfig) -> GatewayChannel {
        let wallet = config.signer.as_ref().map(|s| s.address());
        let (channel, ends) = GatewayChannel::pair(wallet);
        spawn_worker("voxel-gateway", gateway_loop(config, ends));
        channel
    }
}

async fn gateway_loop(config: GatewayConfig, ends: WorkerEnds) {
    let WorkerEnds {
        mut requests,
        events,
        mut shutdown,
    } = ends;
    let wallet = config.signer.as_ref().map(|s| s.address());
    let provider = match config.signer {
        Some(signer) => ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(config.rpc_url.clone())
            .erased(),
        None => ProviderBuilder::new()
            .connect_http(config.rpc_url.clone())
            .erased(),
    };
    info!(
        "gateway: contract {} on {} via {}",
        config.contract, config.chain, config.rpc_url
    );

    let mut network_tick = tokio::time::interval(NETWORK_CHECK_INTERVAL);
    let mut log_tick = tokio::time::interval(LOG_POLL_INTERVAL);
    let mut next_block = config.start_block;

    loop {
        tokio::select! {
            _ = &mut shutdown => return,
            request = requests.recv() => {
                let Some(request) = request else { return };
                dispatch(&provider, config.contract, wallet, request, events.clone());
            }
            _ = network_tick.tick() => {
                let status = NetworkStatus {
                    wallet,
                    chain_id: provider.get_chain_id().await.ok(),
                };
                if events.send(GatewayEvent::Network(status)).is_err() {
                    return;
                }
            }
            _ = log_tick.tick() => {
                match poll_world_events(&provider, config.contract, next_block, &events).await {
                    Ok(Some(last)) => next_block = last + 1,
                    Ok(None) => {}
                    Err(()) => return,
                }
            }
        }
    }
}

/// Run one request on its own task so slow confirmations never stall the loop.
/// Requests race freely; outcomes arrive in completion order.
fn dispatch(
    provider: &DynProvider,
    contract: Address,
    wallet: Option<Address>,
    request: GatewayRequest,
    events: Sender<GatewayEvent>,
) {
    let provider = provider.clone();
    tokio::spawn(async move {
        let GatewayRequest { id, op } = request;
        let result = match wallet {
            Some(_) => execute(provider, contract, op).await,
            None => Err("no wallet signer configured".to_string()),
        };
        match &result {
            Ok(hash) => info!("gateway: request {id} mined in {hash}"),
            Err(err) => warn!("gateway: request {id} failed: {err}"),
        }
        if events
            .send(GatewayEvent::Outcome(GatewayOutcome { id, op, result }))
            .is_err()
        {
            warn!("gateway: request {id} finished after the app closed");
        }
    });
}

async fn execute(provider: DynProvider, contract: Address, op: VoxelOp) -> Result<TxHash, String> {
    let contract = VoxelWorld::new(contract, provider);
    let pending = match op {
        VoxelOp::Place { at, material } => {
            contract
                .placeVoxel(at.x, at.y, at.z, material)
                .send()
                .await
        }
        VoxelOp::Destroy { at } => contract.destroyVoxel(at.x, at.y, at.z).send().await,
        VoxelOp::Repaint { at, material } => {
            contract
                .repaintVoxel(at.x, at.y, at.z, material)
                .send()
                .await
        }
        VoxelOp::Transfer { to, at } => contract.transferVoxel(to, at.x, at.y, at.z).send().await,
    }
    .map_err(|err| err.to_string())?;
    pending.watch().await.map_err(|err| err.to_string())
}

/// Fetch voxel events from `from` towards the tip in bounded windows and
/// forward them. Returns the last fully scanned block, `None` when nothing
/// was scanned, and `Err(())` once the receiver is gone.
async fn poll_world_events(
    provider: &DynProvider,
    contract: Address,
    from: u64,
    events: &Sender<GatewayEvent>,
) -> Result<Option<u64>, ()> {
    let tip = match provider.get_block_number().await {
        Ok(n) => n,
        Err(err) => {
            warn!("gateway: poll error: {err}");
            return Ok(None);
        }
    };

    let mut scanned = None;
    for (start, end) in log_windows(from, tip, LOG_WINDOW).take(MAX_WINDOWS_PER_POLL) {
        let filter = Filter::new()
            .address(contract)
            .from_block(BlockNumberOrTag::Number(start))
            .to_block(BlockNumberOrTag::Number(end));
        let logs = match provider.get_logs(&filter).await {
            Ok(logs) => logs,
            Err(err) => {
                warn!("gateway: failed to fetch logs {start}..={end}: {err}");
                break;
            }
        };

        if !logs.is_empty() {
            info!("gateway: {} voxel events in {start}..={end}", logs.len());
        }
        for event in logs.iter().filter_map(log_to_event) {
            events.send(GatewayEvent::World(event)).map_err(|_| ())?;
        }
        scanned = Some(end);
    }
    if let Some(end) = scanned.filter(|&end| end < tip) {
        info!("gateway: backfilled to block {end} of {tip}");
    }
    Ok(scanned)
}

/// Split `from..=tip` into inclusive ranges at most `span` blocks wide.
fn log_windows(from: u64, tip: u64, span: u64) -> impl Iterator<Item = (u64, u64)> {
    let span = span.max(1);
    let mut next = (from <= tip).then_some(from);
    std::iter::from_fn(move || {
        let start = next?;
        let end = start.saturating_add(span - 1).min(tip);
        next = (end < tip).then(|| end + 1);
        Some((start, end))
    })
}

fn log_to_event(log: &Log) -> Option<WorldEvent> {
    let topic = *log.topics().first()?;
    let event = if topic == VoxelWorld::VoxelPlaced::SIGNATURE_HASH {
        let ev = log.log_decode::<VoxelWorld::VoxelPlaced>().ok()?.inner.data;
        WorldEvent::Placed {
            at: Coordinate::new(ev.x, ev.y, ev.z),
            material: ev.material,
            owner: ev.owner,
        }
    } else if topic == VoxelWorld::VoxelRepainted::SIGNATURE_HASH {
        let ev = log.log_decode::<VoxelWorld::VoxelRepainted>().ok()?.inner.data;
        WorldEvent::Repainted {
            at: Coordinate::new(ev.x, ev.y, ev.z),
            material: ev.material,
        }
    } else if topic == VoxelWorld::VoxelDestroyed::SIGNATURE_HASH {
        let ev = log.log_decode::<VoxelWorld::VoxelDestroyed>().ok()?.inner.data;
        WorldEvent::Destroyed {
            at: Coordinate::new(ev.x, ev.y, ev.z),
        }
    } else if topic == VoxelWorld::VoxelTransferred::SIGNATURE_HASH {
        let ev = log.log_decode::<VoxelWorld::VoxelTransferred>().ok()?.inner.data;
        WorldEvent::Transferred {
            at: Coordinate::new(ev.x, ev.y, ev.z),
            to: ev.to,
        }
    } else {
        return None;
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc_log(data: alloy::primitives::LogData) -> Log {
        Log {
            inner: alloy::primitives::Log {
                address: Address::with_last_byte(0xee),
                data,
            },
            ..Default::default()
        }
    }

    #[test]
    fn decodes_placed_event() {
        let owner = Address::with_last_byte(7);
        let data = VoxelWorld::VoxelPlaced {
            owner,
            x: 10,
            y: 11,
            z: 12,
            material: 3,
        }
        .encode_log_data();

        let event = log_to_event(&rpc_log(data));

        assert_eq!(
            event,
            Some(WorldEvent::Placed {
                at: Coordinate::new(10, 11, 12),
                material: 3,
                owner,
            })
        );
    }

    #[test]
    fn decodes_transfer_event() {
        let to = Address::with_last_byte(9);
        let data = VoxelWorld::VoxelTransferred {
            from: Address::with_last_byte(1),
            to,
            x: 1,
            y: 2,
            z: 3,
        }
        .encode_log_data();

        assert_eq!(
            log_to_event(&rpc_log(data)),
            Some(WorldEvent::Transferred {
                at: Coordinate::new(1, 2, 3),
                to,
            })
        );
    }

    #[test]
    fn log_windows_cover_the_range_without_gaps() {
        let windows: Vec<_> = log_windows(0, 4_500, 2_000).collect();

        assert_eq!(windows, vec![(0, 1_999), (2_000, 3_999), (4_000, 4_500)]);
    }

    #[test]
    fn log_windows_respect_the_span_on_a_long_chain() {
        let tip = 20_000_000;
        let mut expected_start = 0;

        for (start, end) in log_windows(0, tip, LOG_WINDOW) {
            assert_eq!(start, expected_start);
            assert!(end - start < LOG_WINDOW);
            expected_start = end + 1;
        }
        assert_eq!(expected_start, tip + 1);
    }

    #[test]
    fn log_windows_are_empty_past_the_tip() {
        assert_eq!(log_windows(11, 10, LOG_WINDOW).count(), 0);
        assert_eq!(log_windows(10, 10, LOG_WINDOW).collect::<Vec<_>>(), vec![(10, 10)]);
    }

    #[tokio::test]
    async fn poll_advances_window_by_window_from_genesis() {
        let asserter = alloy::transports::mock::Asserter::new();
        let provider = ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased();
        let (events, _rx) = crossbeam_channel::bounded(16);

        asserter.push_success(&alloy::primitives::U64::from(20_000_000u64));
        for _ in 0..MAX_WINDOWS_PER_POLL {
            asserter.push_success(&Vec::<Log>::new());
        }
        let scanned = poll_world_events(&provider, Address::ZERO, 0, &events).await;
        assert_eq!(
            scanned,
            Ok(Some(MAX_WINDOWS_PER_POLL as u64 * LOG_WINDOW - 1))
        );

        // A rejected window keeps the blocks scanned before it.
        asserter.push_success(&alloy::primitives::U64::from(20_000_000u64));
        asserter.push_success(&Vec::<Log>::new());
        asserter.push_failure_msg("query exceeds max block range");
        let scanned = poll_world_events(&provider, Address::ZERO, 50_000, &events).await;
        assert_eq!(scanned, Ok(Some(50_000 + LOG_WINDOW - 1)));
    }

    #[test]
    fn ignores_unknown_topics() {
        let data = alloy::primitives::LogData::new_unchecked(
            vec![alloy::primitives::B256::repeat_byte(0xab)],
            Default::default(),
        );
        assert_eq!(log_to_event(&rpc_log(data)), None);
    }
}
