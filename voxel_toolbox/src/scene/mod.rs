pub(crate) mod materials;
pub(crate) mod selection;
pub(crate) mod voxels;

pub use materials::{setup_palette, PALETTE};
pub use selection::{spawn_toolbox_voxel, update_toolbox_voxel};
pub use voxels::{
    draw_world_bounds, ingest_gateway_events, setup_scene, sync_voxel_entities,
};
