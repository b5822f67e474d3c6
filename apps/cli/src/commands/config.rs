//! # Config Command
//!
//! Prints the resolved configuration.

use tracing::debug;

use crate::state::AppConfig;

/// Returns the configuration in effect after flags, environment and
/// config file were merged.
pub fn get_config(config: &AppConfig) -> AppConfig {
    debug!("config command");
    config.clone()
}

pub fn render_config(config: &AppConfig) -> String {
    let catalog = config
        .catalog
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<bundled seed catalog>".to_string());

    [
        format!("catalog         = {}", catalog),
        format!("export_dir      = {}", config.export_dir.display()),
        format!("log             = {}", config.log.as_deref().unwrap_or("<default>")),
        format!("currency_suffix = {}", config.currency_suffix),
    ]
    .join("\n")
}
