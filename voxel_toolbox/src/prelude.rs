//! Minimal prelude for SDK consumers.

pub use crate::config::{app_config, AppConfig};
pub use crate::data::{Coordinate, GatewayChannel, VoxelGateway, VoxelOp};
pub use crate::sdk::VoxelAppBuilder;
pub use crate::toolbox::{InteractionMode, Toolbox, ToolboxError};
pub use crate::world::VoxelWorld;
