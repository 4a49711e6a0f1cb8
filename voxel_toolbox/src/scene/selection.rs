//! Toolbox voxel: translucent cube marking the slot a placement would fill.

use bevy::prelude::*;

use crate::camera::CameraTarget;
use crate::scene::materials::VoxelPalette;
use crate::scene::voxels::voxel_translation;
use crate::toolbox::{Preview, Toolbox};

/// Offset from the previewed voxel to where the camera settles.
const FOCUS_OFFSET: Vec3 = Vec3::splat(3.0);

#[derive(Component)]
pub struct ToolboxVoxel;

pub fn spawn_toolbox_voxel(mut commands: Commands, palette: Res<VoxelPalette>) {
    commands.spawn((
        ToolboxVoxel,
        Mesh3d(palette.mesh.clone()),
        MeshMaterial3d(palette.ghost(0)),
        Transform::default(),
        Visibility::Hidden,
    ));
}

/// Show the ghost cube at the toolbox preview and focus the camera on it.
#[allow(clippy::type_complexity)]
pub fn update_toolbox_voxel(
    toolbox: Res<Toolbox>,
    palette: Res<VoxelPalette>,
    mut camera_target: ResMut<CameraTarget>,
    mut last: Local<Option<Preview>>,
    mut ghost: Query<
        (
            &mut Transform,
            &mut MeshMaterial3d<StandardMaterial>,
            &mut Visibility,
        ),
        With<ToolboxVoxel>,
    >,
) {
    let preview = toolbox.preview();
    if preview == *last {
        return;
    }
    *last = preview;

    let Ok((mut transform, mut material, mut visibility)) = ghost.get_single_mut() else {
        return;
    };
    match preview {
        Some(preview) => {
            let center = voxel_translation(preview.at);
            transform.translation = center;
            material.0 = palette.ghost(preview.material);
            *visibility = Visibility::Visible;
            focus_camera(&mut camera_target, center);
        }
        None => *visibility = Visibility::Hidden,
    }
}

fn focus_camera(camera_target: &mut CameraTarget, center: Vec3) {
    camera_target.target = Some(center + FOCUS_OFFSET);
    camera_target.look_at = Some(center);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_sits_diagonally_above_target() {
        let mut target = CameraTarget::default();
        focus_camera(&mut target, Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(target.target, Some(Vec3::splat(13.0)));
        assert_eq!(target.look_at, Some(Vec3::splat(10.0)));
    }
}
