//! Camera glide: eases the main camera toward a requested viewpoint.

use bevy::prelude::*;

/// Glide speed, in fractions of the remaining distance per second.
const GLIDE_RATE: f32 = 4.0;
const ARRIVAL_EPSILON: f32 = 0.01;

/// Where the camera should move and what it should look at.
#[derive(Resource, Default, Debug)]
pub struct CameraTarget {
    pub target: Option<Vec3>,
    pub look_at: Option<Vec3>,
}

pub fn camera_plugin(app: &mut App) {
    app.init_resource::<CameraTarget>()
        .add_systems(Update, camera_glide_system);
}

fn camera_glide_system(
    time: Res<Time>,
    mut camera_target: ResMut<CameraTarget>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Some(target) = camera_target.target else {
        return;
    };
    let Ok(mut transform) = cameras.get_single_mut() else {
        return;
    };

    let t = (GLIDE_RATE * time.delta_secs()).min(1.0);
    transform.translation = transform.translation.lerp(target, t);
    if let Some(look_at) = camera_target.look_at {
        transform.look_at(look_at, Vec3::Y);
    }

    if transform.translation.distance(target) < ARRIVAL_EPSILON {
        transform.translation = target;
        camera_target.target = None;
    }
}
