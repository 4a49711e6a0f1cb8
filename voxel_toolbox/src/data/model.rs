// Chain-agnostic voxel requests, outcomes and world events.
// Alloy contract types stay in evm.rs; conversion happens there.

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

/// Number of palette entries; material indices are `0..MATERIAL_COUNT`.
pub const MATERIAL_COUNT: u8 = 16;

/// Correlates a submitted operation with its outcome in logs.
pub type RequestId = u64;

/// Integer grid position of a voxel. Doubles as the world map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Coordinate {
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Keys raw user input. Returns `None` when any component is not an
    /// integer in `0..=255`, since such a slot can never hold a voxel.
    pub fn from_raw(x: f64, y: f64, z: f64) -> Option<Self> {
        Some(Self {
            x: raw_to_u8(x)?,
            y: raw_to_u8(y)?,
            z: raw_to_u8(z)?,
        })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

pub(crate) fn raw_to_u8(v: f64) -> Option<u8> {
    if v.fract() == 0.0 && (0.0..=255.0).contains(&v) {
        Some(v as u8)
    } else {
        None
    }
}

/// Confirmed on-chain state of one voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxelRecord {
    pub material: u8,
    pub owner: Address,
}

/// A voxel in a world fixture file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedVoxel {
    #[serde(flatten)]
    pub at: Coordinate,
    pub material: u8,
    pub owner: Address,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    Place,
    Destroy,
    Repaint,
    Transfer,
}

impl OpKind {
    /// Verb phrase used in status messages.
    pub fn phrase(self) -> &'static str {
        match self {
            OpKind::Place => "placed on",
            OpKind::Destroy => "removed from",
            OpKind::Repaint => "repainted on",
            OpKind::Transfer => "transferred on",
        }
    }
}

/// A validated voxel mutation, ready to be sent to the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoxelOp {
    Place { at: Coordinate, material: u8 },
    Destroy { at: Coordinate },
    Repaint { at: Coordinate, material: u8 },
    Transfer { to: Address, at: Coordinate },
}

impl VoxelOp {
    pub fn kind(&self) -> OpKind {
        match self {
            VoxelOp::Place { .. } => OpKind::Place,
            VoxelOp::Destroy { .. } => OpKind::Destroy,
            VoxelOp::Repaint { .. } => OpKind::Repaint,
            VoxelOp::Transfer { .. } => OpKind::Transfer,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        match *self {
            VoxelOp::Place { at, .. }
            | VoxelOp::Destroy { at }
            | VoxelOp::Repaint { at, .. }
            | VoxelOp::Transfer { at, .. } => at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GatewayRequest {
    pub id: RequestId,
    pub op: VoxelOp,
}

/// Completion of a submitted operation: the mined transaction or the error detail.
#[derive(Clone, Debug)]
pub struct GatewayOutcome {
    pub id: RequestId,
    pub op: VoxelOp,
    pub result: Result<TxHash, String>,
}

/// A confirmed change to the ledger's voxel map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    Placed {
        at: Coordinate,
        material: u8,
        owner: Address,
    },
    Repainted {
        at: Coordinate,
        material: u8,
    },
    Destroyed {
        at: Coordinate,
    },
    Transferred {
        at: Coordinate,
        to: Address,
    },
}

/// Result of one periodic wallet/network check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkStatus {
    pub wallet: Option<Address>,
    /// `None` when the node could not be reached.
    pub chain_id: Option<u64>,
}

/// Everything the gateway worker reports back to the app.
#[derive(Clone, Debug)]
pub enum GatewayEvent {
    Outcome(GatewayOutcome),
    World(WorldEvent),
    Network(NetworkStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_accepts_byte_range() {
        assert_eq!(
            Coordinate::from_raw(0.0, 128.0, 255.0),
            Some(Coordinate::new(0, 128, 255))
        );
    }

    #[test]
    fn from_raw_rejects_non_bytes() {
        assert_eq!(Coordinate::from_raw(-1.0, 0.0, 0.0), None);
        assert_eq!(Coordinate::from_raw(0.0, 256.0, 0.0), None);
        assert_eq!(Coordinate::from_raw(0.0, 0.0, 1.5), None);
        assert_eq!(Coordinate::from_raw(f64::NAN, 0.0, 0.0), None);
    }

    #[test]
    fn seed_voxel_reads_flat_json() {
        let json = r#"{"x":1,"y":2,"z":3,"material":4,"owner":"0x0000000000000000000000000000000000000001"}"#;
        let seed: SeedVoxel = serde_json::from_str(json).unwrap();
        assert_eq!(seed.at, Coordinate::new(1, 2, 3));
        assert_eq!(seed.material, 4);
        assert_eq!(seed.owner, Address::with_last_byte(1));
    }
}
