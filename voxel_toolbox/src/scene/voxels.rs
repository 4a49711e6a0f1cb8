//! Voxel cubes: gateway event ingestion and entity reconciliation with VoxelWorld.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::data::{Coordinate, GatewayChannel, GatewayEvent};
use crate::scene::materials::VoxelPalette;
use crate::toolbox::Toolbox;
use crate::ui::HudState;
use crate::world::VoxelWorld;

const MAX_EVENTS_PER_FRAME: usize = 64;

/// Marker + data for voxel entities.
#[derive(Component, Debug)]
pub struct VoxelCube {
    pub at: Coordinate,
    pub material: u8,
}

pub fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-12., 16., -12.).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(40., 80., 20.).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
}

/// Drain gateway events: ledger changes update the world, outcomes and
/// network checks update the toolbox status.
pub fn ingest_gateway_events(
    channel: Res<GatewayChannel>,
    mut world: ResMut<VoxelWorld>,
    mut toolbox: ResMut<Toolbox>,
    mut hud: Option<ResMut<HudState>>,
) {
    for event in channel.events.try_iter().take(MAX_EVENTS_PER_FRAME) {
        if let Some(hud) = hud.as_mut() {
            hud.update_from_event(&event);
        }
        match event {
            GatewayEvent::World(change) => world.apply(change),
            GatewayEvent::Outcome(outcome) => toolbox.apply_outcome(&outcome),
            GatewayEvent::Network(status) => {
                let _ = toolbox.check_network(&status);
            }
        }
    }
}

/// Spawn, recolour and despawn cubes so entities mirror `VoxelWorld`.
pub fn sync_voxel_entities(
    mut commands: Commands,
    world: Res<VoxelWorld>,
    palette: Res<VoxelPalette>,
    cubes: Query<(Entity, &VoxelCube)>,
) {
    if !world.is_changed() {
        return;
    }

    let mut stale: HashMap<Coordinate, (Entity, u8)> = cubes
        .iter()
        .map(|(entity, cube)| (cube.at, (entity, cube.material)))
        .collect();

    for (&at, record) in world.iter() {
        let cube = VoxelCube {
            at,
            material: record.material,
        };
        match stale.remove(&at) {
            Some((_, material)) if material == record.material => {}
            Some((entity, _)) => {
                commands
                    .entity(entity)
                    .insert((cube, MeshMaterial3d(palette.solid(record.material))));
            }
            None => {
                commands.spawn((
                    Mesh3d(palette.mesh.clone()),
                    MeshMaterial3d(palette.solid(record.material)),
                    Transform::from_translation(voxel_translation(at)),
                    cube,
                ));
            }
        }
    }

    for (entity, _) in stale.into_values() {
        commands.entity(entity).despawn();
    }
}

/// World-space centre of the cube at `at`.
pub fn voxel_translation(at: Coordinate) -> Vec3 {
    Vec3::new(f32::from(at.x), f32::from(at.y), f32::from(at.z))
}

/// Outline the buildable volume.
pub fn draw_world_bounds(mut gizmos: Gizmos, toolbox: Res<Toolbox>) {
    let size = f32::from(toolbox.world_size());
    let center = Vec3::splat(size / 2.0 - 0.5);
    gizmos.cuboid(
        Transform::from_translation(center).with_scale(Vec3::splat(size)),
        Color::srgba(0.5, 0.7, 0.9, 0.4),
    );
}
