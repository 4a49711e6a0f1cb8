mod channel;
pub mod evm;
pub mod local;
mod model;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy_chains::Chain;
use url::Url;

pub use channel::GatewayChannel;
pub use local::init_local_channel;
pub use model::{
    Coordinate, GatewayEvent, GatewayOutcome, GatewayRequest, NetworkStatus, OpKind, RequestId,
    SeedVoxel, VoxelOp, VoxelRecord, WorldEvent, MATERIAL_COUNT,
};
pub(crate) use model::raw_to_u8;

/// Configuration for spawning the on-chain gateway.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Network the voxel contract lives on; any other chain id is reported as wrong.
    pub chain: Chain,
    pub rpc_url: Url,
    pub contract: Address,
    pub signer: Option<PrivateKeySigner>,
    /// First block scanned for voxel events.
    pub start_block: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway worker has stopped")]
    Disconnected,
}

/// Non-blocking access to the voxel ledger.
///
/// `submit` returns as soon as the request is queued; the outcome arrives later
/// as a [`GatewayEvent::Outcome`] carrying the same [`RequestId`].
pub trait VoxelGateway {
    fn submit(&self, op: VoxelOp) -> Result<RequestId, GatewayError>;
    fn wallet_address(&self) -> Option<Address>;
}
