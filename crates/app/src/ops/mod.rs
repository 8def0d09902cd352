pub mod init;
pub mod open;
pub mod pubkey;
pub mod seal;

pub use init::Init;
pub use open::Open;
pub use pubkey::Pubkey;
pub use seal::Seal;

#[cfg(test)]
pub(crate) mod testkit {
    use std::path::Path;

    use super::{Init, Pubkey};
    use crate::op::{Op, OpContext};

    /// Initialize a party's state directory under `root`
    ///
    /// Returns the party's context and compressed public key hex.
    pub fn init_party(root: &Path, name: &str, salt: Option<&str>) -> (OpContext, String) {
        let ctx = OpContext::new(Some(root.join(name)));
        Init {
            salt: salt.map(str::to_string),
            default_log_level: "info".to_string(),
        }
        .execute(&ctx)
        .unwrap();
        let public = Pubkey {
            uncompressed: false,
        }
        .execute(&ctx)
        .unwrap();
        (ctx, public)
    }
}
