//! Voxel toolbox: place, repaint, destroy and transfer ledger-owned voxels
//! in a 3D world.
//!
//! Library root: toolbox state machine, chain gateway, world map, config and
//! the Bevy app builder.

mod camera;
pub mod config;
pub mod data;
mod scene;
pub mod toolbox;
mod ui;
pub mod world;

pub mod prelude;
pub mod sdk;

pub use data::evm::EvmGateway;
pub use data::{
    init_local_channel, Coordinate, GatewayChannel, GatewayConfig, GatewayEvent, GatewayOutcome,
    NetworkStatus, VoxelGateway, VoxelOp, VoxelRecord, WorldEvent,
};
pub use toolbox::{InteractionMode, Toolbox, ToolboxError};
pub use world::VoxelWorld;
