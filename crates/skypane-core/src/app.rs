use anyhow::Result;
use std::sync::Arc;

use crate::Config;

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
}

impl App {
    /// Create a new application instance from the validated on-disk config
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;
        tracing::debug!(
            "Configuration loaded with {} warning(s)",
            validation.warnings.len()
        );
        Ok(Self::with_config(config))
    }

    /// Create an application around an already loaded config
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the config for service construction
    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }
}
