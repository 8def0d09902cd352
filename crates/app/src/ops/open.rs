use clap::Args;

use common::crypto::PublicKey;
use common::envelope::open_text;
use common::error::SealError;

use crate::op::arg_or_stdin;
use crate::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Open {
    /// Sender public key (hex, compressed or uncompressed SEC1)
    #[arg(long)]
    pub from: String,

    /// Salt agreed with the sender (defaults to the salt in config.toml)
    #[arg(long)]
    pub salt: Option<String>,

    /// Base64 envelope to open (read from stdin if omitted)
    pub envelope: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("failed to open envelope: {0}")]
    Open(#[from] SealError),
    #[error("failed to read envelope: {0}")]
    Io(#[from] std::io::Error),
}

impl crate::op::Op for Open {
    type Error = OpenError;
    type Output = String;

    fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let own = state.load_key()?;
        let sender = PublicKey::from_hex(&self.from).map_err(SealError::from)?;
        let salt = state.salt(self.salt.as_deref())?;

        let envelope = arg_or_stdin(self.envelope.as_deref())?;
        tracing::debug!("opening envelope from {}", sender.to_hex());

        Ok(open_text(envelope.trim(), &own, &sender, salt)?)
    }
}
