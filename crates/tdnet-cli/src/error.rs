use tdnet_client::TdnetError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tdnet(#[from] TdnetError),

    #[error("{0:#}")]
    Setup(#[from] anyhow::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// 2 for usage errors, 1 for everything else
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Tdnet(e) if e.is_invalid_argument() => 2,
            _ => 1,
        }
    }
}
