use clap::Args;

use common::crypto::PublicKey;
use common::envelope::seal_text;
use common::error::SealError;

use crate::op::arg_or_stdin;
use crate::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Seal {
    /// Recipient public key (hex, compressed or uncompressed SEC1)
    #[arg(long)]
    pub to: String,

    /// Salt agreed with the recipient (defaults to the salt in config.toml)
    #[arg(long)]
    pub salt: Option<String>,

    /// Message to seal (read from stdin if omitted)
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SealOpError {
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("failed to seal message: {0}")]
    Seal(#[from] SealError),
    #[error("failed to read message: {0}")]
    Io(#[from] std::io::Error),
}

impl crate::op::Op for Seal {
    type Error = SealOpError;
    type Output = String;

    fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let own = state.load_key()?;
        let recipient = PublicKey::from_hex(&self.to).map_err(SealError::from)?;
        let salt = state.salt(self.salt.as_deref())?;

        let message = arg_or_stdin(self.message.as_deref())?;
        tracing::debug!("sealing message for {}", recipient.to_hex());

        Ok(seal_text(&message, &own, &recipient, salt)?)
    }
}
