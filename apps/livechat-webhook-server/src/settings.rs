//! Server configuration

use anyhow::{bail, Context, Result};
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use livechat_webhooks::Action;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Environment variable prefix, e.g. `LIVECHAT__PORT=9000`
pub const ENV_PREFIX: &str = "LIVECHAT";

/// Webhook server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path of the webhook endpoint
    pub path: String,
    /// Secret used for actions without an entry in `secrets`
    #[serde(default)]
    pub default_secret: Option<String>,
    /// Action name to secret key
    #[serde(default)]
    pub secrets: HashMap<String, String>,
}

impl ServerConfig {
    /// Load defaults, then the optional file, then `LIVECHAT__*` variables
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::defaults()?;
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("path", "/webhooks")?)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            bail!("webhook path must start with '/', got '{}'", self.path);
        }
        for name in self.secrets.keys() {
            name.parse::<Action>()
                .with_context(|| format!("Invalid secrets entry '{name}'"))?;
        }
        Ok(())
    }

    /// Secret key expected for `action`, if any
    pub fn secret_for(&self, action: Action) -> Option<String> {
        self.secrets
            .get(action.as_str())
            .or(self.default_secret.as_ref())
            .cloned()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
