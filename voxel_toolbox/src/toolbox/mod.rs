//! Toolbox: interaction mode, input validation, ownership checks and
//! dispatch of voxel operations to the ledger gateway.
//!
//! Every action updates the [`StatusLine`] and also returns a typed result,
//! so UI code can ignore the return value while tests can match on it.

mod error;
mod mode;
mod status;
mod validate;

use alloy::primitives::Address;
use alloy_chains::Chain;
use bevy::log::{info, warn};
use bevy::prelude::Resource;

use crate::data::{
    Coordinate, GatewayOutcome, NetworkStatus, OpKind, RequestId, VoxelGateway, VoxelOp,
    MATERIAL_COUNT,
};
use crate::world::VoxelWorld;

pub use error::ToolboxError;
pub use mode::{InteractionMode, ModeFlags};
pub use status::StatusLine;
pub use validate::{valid_uint8, validate_coords};

/// True iff `wallet` is the voxel's owner. A missing wallet owns nothing.
pub fn check_ownership(owner: Address, wallet: Option<Address>) -> bool {
    wallet == Some(owner)
}

/// Raw values currently entered in the toolbox inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub material: f64,
    pub destination: String,
}

/// Translucent highlight marking where a voxel would be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preview {
    pub at: Coordinate,
    pub material: u8,
}

#[derive(Resource, Debug)]
pub struct Toolbox {
    world_size: u16,
    expected_chain: Chain,
    mode: InteractionMode,
    pub status: StatusLine,
    pub cursor: Cursor,
    preview: Option<Preview>,
}

impl Toolbox {
    pub fn new(world_size: u16, expected_chain: Chain) -> Self {
        Self {
            world_size,
            expected_chain,
            mode: InteractionMode::default(),
            status: StatusLine::default(),
            cursor: Cursor::default(),
            preview: None,
        }
    }

    pub fn world_size(&self) -> u16 {
        self.world_size
    }

    pub fn expected_chain(&self) -> Chain {
        self.expected_chain
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn mode_flags(&self) -> ModeFlags {
        self.mode.into()
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub fn preview(&self) -> Option<Preview> {
        self.preview
    }

    pub fn clear_preview(&mut self) {
        self.preview = None;
    }

    /// One-time startup check that a wallet signer is available.
    pub fn check_wallet_presence(&mut self, wallet: Option<Address>) -> Result<(), ToolboxError> {
        match wallet {
            Some(_) => Ok(()),
            None => self.report(Err(ToolboxError::MissingWallet)),
        }
    }

    /// Periodic check of wallet availability and network. Raises an error
    /// message on violation; a healthy status leaves the message untouched.
    pub fn check_network(&mut self, status: &NetworkStatus) -> Result<(), ToolboxError> {
        let mut verdict = Ok(());
        if status.wallet.is_none() {
            verdict = Err(ToolboxError::WalletLocked);
        }
        if let Some(id) = status.chain_id {
            if id != self.expected_chain.id() {
                verdict = Err(ToolboxError::WrongNetwork {
                    expected: self.expected_chain.to_string(),
                    actual: Some(id),
                });
            }
        }
        match verdict {
            Ok(()) => Ok(()),
            Err(err) => {
                self.status.error(err.to_string());
                Err(err)
            }
        }
    }

    /// Move the placement highlight to the given slot. Invalid slots are
    /// ignored; occupied ones raise "already exists".
    pub fn update_preview(
        &mut self,
        world: &VoxelWorld,
        x: f64,
        y: f64,
        z: f64,
        material: f64,
    ) -> Option<Preview> {
        let at = Coordinate::from_raw(x, y, z);
        if at.is_some_and(|at| world.contains(at)) {
            let _ = self.report::<()>(Err(ToolboxError::AlreadyExists));
            return None;
        }
        if !validate_coords(x, y, z, self.world_size) {
            return None;
        }
        let material = self.material(material)?;
        let preview = Preview { at: at?, material };
        self.preview = Some(preview);
        Some(preview)
    }

    pub fn place(
        &mut self,
        world: &VoxelWorld,
        gateway: &impl VoxelGateway,
        x: f64,
        y: f64,
        z: f64,
        material: f64,
    ) -> Result<RequestId, ToolboxError> {
        let result = self.try_place(world, gateway, x, y, z, material);
        self.report(result)
    }

    pub fn destroy(
        &mut self,
        world: &VoxelWorld,
        gateway: &impl VoxelGateway,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<RequestId, ToolboxError> {
        let result = self
            .coordinate(x, y, z)
            .ok_or(ToolboxError::WrongParameters)
            .and_then(|at| owned_by_caller(world, gateway, at).map(|()| at))
            .and_then(|at| submit(gateway, VoxelOp::Destroy { at }));
        self.report(result)
    }

    pub fn repaint(
        &mut self,
        world: &VoxelWorld,
        gateway: &impl VoxelGateway,
        x: f64,
        y: f64,
        z: f64,
        material: f64,
    ) -> Result<RequestId, ToolboxError> {
        let result = self
            .coordinate(x, y, z)
            .zip(self.material(material))
            .ok_or(ToolboxError::WrongParameters)
            .and_then(|(at, material)| {
                owned_by_caller(world, gateway, at)?;
                submit(gateway, VoxelOp::Repaint { at, material })
            });
        self.report(result)
    }

    pub fn transfer(
        &mut self,
        world: &VoxelWorld,
        gateway: &impl VoxelGateway,
        to: &str,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<RequestId, ToolboxError> {
        let result = self
            .coordinate(x, y, z)
            .zip(parse_destination(to))
            .ok_or(ToolboxError::WrongParameters)
            .and_then(|(at, to)| {
                owned_by_caller(world, gateway, at)?;
                submit(gateway, VoxelOp::Transfer { to, at })
            });
        self.report(result)
    }

    /// Run the active mode's operation on the current cursor values.
    pub fn submit_cursor(
        &mut self,
        world: &VoxelWorld,
        gateway: &impl VoxelGateway,
    ) -> Result<RequestId, ToolboxError> {
        let Cursor {
            x, y, z, material, ..
        } = self.cursor;
        match self.mode {
            InteractionMode::Place => self.place(world, gateway, x, y, z, material),
            InteractionMode::Repaint => self.repaint(world, gateway, x, y, z, material),
            InteractionMode::Destroy => self.destroy(world, gateway, x, y, z),
            InteractionMode::Transfer => {
                let destination = self.cursor.destination.clone();
                self.transfer(world, gateway, &destination, x, y, z)
            }
        }
    }

    /// Show the result of a completed gateway call. Outcomes are not matched
    /// against pending requests; the latest one to arrive is what the user sees.
    pub fn apply_outcome(&mut self, outcome: &GatewayOutcome) {
        let kind = outcome.op.kind();
        if kind == OpKind::Place {
            self.clear_preview();
        }
        match &outcome.result {
            Ok(hash) => {
                info!("toolbox: request {} confirmed in {hash}", outcome.id);
                self.status.success(format!(
                    "Voxel has been successfully {} the blockchain.",
                    kind.phrase()
                ));
            }
            Err(detail) => {
                let err = ToolboxError::Gateway {
                    kind,
                    detail: detail.clone(),
                };
                self.status.error(err.to_string());
            }
        }
    }

    fn try_place(
        &self,
        world: &VoxelWorld,
        gateway: &impl VoxelGateway,
        x: f64,
        y: f64,
        z: f64,
        material: f64,
    ) -> Result<RequestId, ToolboxError> {
        if Coordinate::from_raw(x, y, z).is_some_and(|at| world.contains(at)) {
            return Err(ToolboxError::AlreadyExists);
        }
        let (at, material) = self
            .coordinate(x, y, z)
            .zip(self.material(material))
            .ok_or(ToolboxError::WrongParameters)?;
        submit(gateway, VoxelOp::Place { at, material })
    }

    /// Coordinates inside the world and encodable as bytes.
    fn coordinate(&self, x: f64, y: f64, z: f64) -> Option<Coordinate> {
        if !(validate_coords(x, y, z, self.world_size) && valid_uint8(&[x, y, z])) {
            return None;
        }
        Coordinate::from_raw(x, y, z)
    }

    fn material(&self, material: f64) -> Option<u8> {
        if !(material < f64::from(MATERIAL_COUNT) && valid_uint8(&[material])) {
            return None;
        }
        crate::data::raw_to_u8(material)
    }

    fn report<T>(&mut self, result: Result<T, ToolboxError>) -> Result<T, ToolboxError> {
        if let Err(err) = &result {
            warn!("toolbox: {err}");
            self.status.error(err.to_string());
        }
        result
    }
}

/// Existence strictly precedes the ownership check.
fn owned_by_caller(
    world: &VoxelWorld,
    gateway: &impl VoxelGateway,
    at: Coordinate,
) -> Result<(), ToolboxError> {
    let record = world.get(at).ok_or(ToolboxError::DoesNotExist)?;
    if !check_ownership(record.owner, gateway.wallet_address()) {
        return Err(ToolboxError::NotOwner);
    }
    Ok(())
}

fn submit(gateway: &impl VoxelGateway, op: VoxelOp) -> Result<RequestId, ToolboxError> {
    gateway
        .submit(op)
        .map_err(|err| ToolboxError::gateway(op.kind(), err))
}

fn parse_destination(to: &str) -> Option<Address> {
    let to = to.trim();
    if to.is_empty() {
        return None;
    }
    to.parse().ok()
}
