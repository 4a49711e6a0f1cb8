//! Confirmed voxel map, mutated only by ledger events.

use std::collections::HashMap;

use bevy::prelude::Resource;

use crate::data::{Coordinate, VoxelRecord, WorldEvent};

/// Every voxel currently present in the world, keyed by grid coordinate.
#[derive(Resource, Default, Debug)]
pub struct VoxelWorld {
    voxels: HashMap<Coordinate, VoxelRecord>,
}

impl VoxelWorld {
    pub fn get(&self, at: Coordinate) -> Option<&VoxelRecord> {
        self.voxels.get(&at)
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        self.voxels.contains_key(&at)
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Coordinate, &VoxelRecord)> {
        self.voxels.iter()
    }

    /// Apply a confirmed ledger change. Events for slots in an unexpected
    /// state (e.g. a repaint of an unknown voxel) are ignored.
    pub fn apply(&mut self, event: WorldEvent) {
        match event {
            WorldEvent::Placed {
                at,
                material,
                owner,
            } => {
                self.voxels.insert(at, VoxelRecord { material, owner });
            }
            WorldEvent::Repainted { at, material } => {
                if let Some(record) = self.voxels.get_mut(&at) {
                    record.material = material;
                }
            }
            WorldEvent::Destroyed { at } => {
                self.voxels.remove(&at);
            }
            WorldEvent::Transferred { at, to } => {
                if let Some(record) = self.voxels.get_mut(&at) {
                    record.owner = to;
                }
            }
        }
    }
}

impl FromIterator<(Coordinate, VoxelRecord)> for VoxelWorld {
    fn from_iter<I: IntoIterator<Item = (Coordinate, VoxelRecord)>>(iter: I) -> Self {
        Self {
            voxels: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    const AT: Coordinate = Coordinate::new(3, 4, 5);

    fn placed(world: &mut VoxelWorld) {
        world.apply(WorldEvent::Placed {
            at: AT,
            material: 1,
            owner: Address::with_last_byte(1),
        });
    }

    #[test]
    fn lifecycle_follows_events() {
        let mut world = VoxelWorld::default();
        placed(&mut world);
        assert!(world.contains(AT));

        world.apply(WorldEvent::Repainted {
            at: AT,
            material: 9,
        });
        assert_eq!(world.get(AT).unwrap().material, 9);

        world.apply(WorldEvent::Transferred {
            at: AT,
            to: Address::with_last_byte(2),
        });
        assert_eq!(world.get(AT).unwrap().owner, Address::with_last_byte(2));

        world.apply(WorldEvent::Destroyed { at: AT });
        assert!(world.is_empty());
    }

    #[test]
    fn repaint_of_missing_voxel_does_not_create_it() {
        let mut world = VoxelWorld::default();
        world.apply(WorldEvent::Repainted {
            at: AT,
            material: 2,
        });
        assert!(!world.contains(AT));
    }
}
