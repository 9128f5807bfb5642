//! Application wiring

use anyhow::Result;
use livechat_webhooks::{Action, Configuration, WebhookHandler};
use std::sync::Arc;
use tracing::info;

use crate::cli::Args;
use crate::handler::LoggingHandler;
use crate::server::Server;
use crate::settings::ServerConfig;

/// Main application
pub struct App {
    config: ServerConfig,
}

impl App {
    /// Load configuration, applying command-line overrides
    pub fn build(args: &Args) -> Result<Self> {
        let mut config = ServerConfig::load(args.config.as_deref())?;
        if let Some(port) = args.port {
            config.port = port;
        }

        info!(
            address = %config.bind_address(),
            path = %config.path,
            secured_actions = config.secrets.len(),
            "Configuration loaded"
        );

        Ok(Self { config })
    }

    pub async fn run(self) -> Result<()> {
        let webhooks = webhook_configuration(&self.config);
        Server::new(self.config, webhooks).run().await
    }
}

/// Register the logging handler for every action
pub fn webhook_configuration(config: &ServerConfig) -> Configuration {
    let handler: Arc<dyn WebhookHandler> = Arc::new(LoggingHandler);
    let mut webhooks = Configuration::new();
    for action in Action::ALL {
        webhooks.register(action, handler.clone(), config.secret_for(action));
    }
    webhooks
}
