use clap::Args;

use crate::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Pubkey {
    /// Print the uncompressed SEC1 encoding instead of the compressed one
    #[arg(long)]
    pub uncompressed: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PubkeyError {
    #[error("failed to load key: {0}")]
    State(#[from] StateError),
}

impl crate::op::Op for Pubkey {
    type Error = PubkeyError;
    type Output = String;

    fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let public_key = state.load_key()?.public();

        if self.uncompressed {
            Ok(hex::encode(public_key.to_uncompressed_bytes()))
        } else {
            Ok(public_key.to_hex())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Op;
    use crate::ops::testkit::init_party;
    use common::crypto::PublicKey;

    #[test]
    fn test_pubkey_encodings_name_the_same_key() {
        let temp = tempfile::tempdir().unwrap();
        let (ctx, compressed) = init_party(temp.path(), "alice", None);

        let uncompressed = Pubkey { uncompressed: true }.execute(&ctx).unwrap();
        assert_eq!(compressed.len(), 66);
        assert_eq!(uncompressed.len(), 130);
        assert!(uncompressed.starts_with("04"));
        assert_eq!(
            PublicKey::from_hex(&compressed).unwrap(),
            PublicKey::from_hex(&uncompressed).unwrap()
        );

        let state = AppState::load(ctx.config_path.clone()).unwrap();
        assert_eq!(state.load_key().unwrap().public().to_hex(), compressed);
    }

    #[test]
    fn test_pubkey_before_init_fails() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = crate::op::OpContext::new(Some(temp.path().join("missing")));

        assert!(matches!(
            Pubkey { uncompressed: false }.execute(&ctx),
            Err(PubkeyError::State(StateError::NotInitialized))
        ));
    }
}
