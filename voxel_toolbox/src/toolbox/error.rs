use crate::data::{GatewayError, OpKind};

/// Every way a toolbox action can fail. The display text is what the user sees.
#[derive(Debug, thiserror::Error)]
pub enum ToolboxError {
    #[error("Error. Make sure a wallet key is configured (WALLET_PRIVATE_KEY) & restart.")]
    MissingWallet,
    #[error("Error. Unlock your wallet & restart.")]
    WalletLocked,
    #[error("Error. You are not on the {expected}.")]
    WrongNetwork { expected: String, actual: Option<u64> },
    #[error("There is already a voxel there.")]
    AlreadyExists,
    #[error("Wrong parameters.")]
    WrongParameters,
    #[error("There is no voxel there.")]
    DoesNotExist,
    #[error("You don't own that voxel.")]
    NotOwner,
    #[error("Unknown mode {0:?}.")]
    UnknownMode(String),
    #[error("Error. Voxel has not been {} the blockchain. Error: {detail}", .kind.phrase())]
    Gateway { kind: OpKind, detail: String },
}

impl ToolboxError {
    pub(crate) fn gateway(kind: OpKind, err: GatewayError) -> Self {
        ToolboxError::Gateway {
            kind,
            detail: err.to_string(),
        }
    }
}
