use clap::Args;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Default salt to store in config.toml
    #[arg(long)]
    pub salt: Option<String>,

    /// Default log level to store in config.toml
    #[arg(long, default_value = "info")]
    pub default_log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            log_level: self.default_log_level.clone(),
            salt: self.salt.clone(),
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;
        let public_key = state.load_key()?.public();

        let output = format!(
            "Initialized sealtext directory at: {}\n\
             - Key: {}\n\
             - Config: {}\n\
             - Public key: {}",
            state.dir.display(),
            state.key_path.display(),
            state.config_path.display(),
            public_key.to_hex()
        );

        Ok(output)
    }
}
