//! Shared plumbing for Skypane: configuration, the error hierarchy and
//! logging setup.

pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    Config, GeocodingConfig, LocationConfig, UiConfig, ValidationIssue, ValidationResult,
    WeatherConfig,
};
pub use error::{AppError, NetworkError, RenderFailure, ReqwestErrorExt, WeatherError};

use anyhow::Result;

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// default `info` filter.
///
/// # Errors
/// When a subscriber is already installed.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::info!("Skypane core initialized");
    Ok(())
}
