//! Env parsing and defaults.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy_chains::Chain;
use url::Url;

use crate::data::{local, GatewayConfig, SeedVoxel};

const DEFAULT_RPC: &str = "http://127.0.0.1:8545";
pub const DEFAULT_WORLD_SIZE: u16 = 256;
/// Coordinates travel as `uint8`, so the world can never be wider than this.
pub const MAX_WORLD_SIZE: u16 = 256;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("invalid {var} {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to read world fixture {}: {source}", .path.display())]
    Fixture {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything the app needs from the environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub world_size: u16,
    /// Run against the in-process ledger instead of an RPC node.
    pub offline: bool,
    /// Seed for the in-process ledger.
    pub fixture: Option<PathBuf>,
}

impl AppConfig {
    pub fn wallet(&self) -> Option<Address> {
        self.gateway.signer.as_ref().map(|s| s.address())
    }

    /// Read the world fixture, if one is configured.
    pub fn seed(&self) -> Result<Vec<SeedVoxel>, ConfigError> {
        let Some(path) = &self.fixture else {
            return Ok(Vec::new());
        };
        local::load_world_fixture(path).map_err(|source| ConfigError::Fixture {
            path: path.clone(),
            source,
        })
    }
}

/// Build the full configuration from environment variables.
pub fn app_config() -> Result<AppConfig, ConfigError> {
    let offline = offline();
    let contract = match parse_var::<Address>("VOXEL_CONTRACT")? {
        Some(address) => address,
        None if offline => Address::ZERO,
        None => return Err(ConfigError::Missing("VOXEL_CONTRACT")),
    };
    Ok(AppConfig {
        gateway: GatewayConfig {
            chain: chain()?,
            rpc_url: rpc_url()?,
            contract,
            signer: wallet_signer()?,
            start_block: parse_var("VOXEL_START_BLOCK")?.unwrap_or(0),
        },
        world_size: world_size()?,
        offline,
        fixture: std::env::var_os("VOXEL_FIXTURE").map(PathBuf::from),
    })
}

/// `RPC_URL`, falling back to a local node.
pub fn rpc_url() -> Result<Url, ConfigError> {
    match parse_var("RPC_URL")? {
        Some(url) => Ok(url),
        None => Url::parse(DEFAULT_RPC).map_err(|err| ConfigError::Invalid {
            var: "RPC_URL",
            value: DEFAULT_RPC.to_string(),
            reason: err.to_string(),
        }),
    }
}

/// `VOXEL_CHAIN`: a chain name ("mainnet", "sepolia") or numeric id. Defaults to mainnet.
pub fn chain() -> Result<Chain, ConfigError> {
    Ok(parse_var("VOXEL_CHAIN")?.unwrap_or_else(Chain::mainnet))
}

pub fn wallet_signer() -> Result<Option<PrivateKeySigner>, ConfigError> {
    parse_var::<PrivateKeySigner>("WALLET_PRIVATE_KEY").map_err(|err| match err {
        // Never echo key material.
        ConfigError::Invalid { var, reason, .. } => ConfigError::Invalid {
            var,
            value: "<redacted>".to_string(),
            reason,
        },
        other => other,
    })
}

/// `VOXEL_WORLD_SIZE` in `1..=256`.
pub fn world_size() -> Result<u16, ConfigError> {
    let size = parse_var::<u16>("VOXEL_WORLD_SIZE")?.unwrap_or(DEFAULT_WORLD_SIZE);
    if size == 0 || size > MAX_WORLD_SIZE {
        return Err(ConfigError::Invalid {
            var: "VOXEL_WORLD_SIZE",
            value: size.to_string(),
            reason: format!("must be between 1 and {MAX_WORLD_SIZE}"),
        });
    }
    Ok(size)
}

pub fn offline() -> bool {
    std::env::var("VOXEL_OFFLINE")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn parse_var<T>(var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|err: T::Err| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        reason: err.to_string(),
    })
}
