//! Voxel palette: one mesh, one solid and one translucent material per colour.

use bevy::prelude::*;

use crate::data::MATERIAL_COUNT;

/// Display colour for each material index.
pub const PALETTE: [u32; MATERIAL_COUNT as usize] = [
    0xffffff, 0x9d9d9d, 0x3f3f3f, 0x1b1b1b, 0xbe2633, 0xe06f8b, 0x493c2b, 0xa46422, 0xeb8931,
    0xf7e26b, 0x2f484e, 0x44891a, 0xa3ce27, 0x1b2632, 0x005784, 0x31a2f2,
];

const GHOST_ALPHA: f32 = 0.9;

/// Palette colour for `material`, wrapping out-of-range indices.
pub fn palette_color(material: u8) -> Color {
    let hex = PALETTE[material as usize % PALETTE.len()];
    let [_, r, g, b] = hex.to_be_bytes();
    Color::srgb_u8(r, g, b)
}

#[derive(Resource)]
pub struct VoxelPalette {
    pub mesh: Handle<Mesh>,
    solid: Vec<Handle<StandardMaterial>>,
    ghost: Vec<Handle<StandardMaterial>>,
}

impl VoxelPalette {
    pub fn solid(&self, material: u8) -> Handle<StandardMaterial> {
        self.solid[material as usize % self.solid.len()].clone()
    }

    pub fn ghost(&self, material: u8) -> Handle<StandardMaterial> {
        self.ghost[material as usize % self.ghost.len()].clone()
    }
}

pub fn setup_palette(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let solid = (0..MATERIAL_COUNT)
        .map(|m| {
            materials.add(StandardMaterial {
                base_color: palette_color(m),
                perceptual_roughness: 0.8,
                ..default()
            })
        })
        .collect();
    let ghost = (0..MATERIAL_COUNT)
        .map(|m| {
            materials.add(StandardMaterial {
                base_color: palette_color(m).with_alpha(GHOST_ALPHA),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })
        })
        .collect();
    commands.insert_resource(VoxelPalette { mesh, solid, ghost });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_color_decodes_hex() {
        assert_eq!(palette_color(0), Color::srgb_u8(0xff, 0xff, 0xff));
        assert_eq!(palette_color(4), Color::srgb_u8(0xbe, 0x26, 0x33));
    }

    #[test]
    fn palette_color_wraps() {
        assert_eq!(palette_color(MATERIAL_COUNT), palette_color(0));
    }
}
