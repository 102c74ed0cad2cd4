pub mod commands;
pub mod play;
pub mod render;
pub mod validate;

pub use commands::{Cli, Commands};

use std::path::PathBuf;
use crate::config::{self, ShopConfig};
use crate::errors::ShopError;

/// Load the configuration and apply global CLI overrides.
pub async fn resolve_config(cli_config: Option<&str>, cli_catalog: Option<&str>) -> Result<ShopConfig, ShopError> {
    let explicit = cli_config.map(PathBuf::from);
    let mut config = config::load_config(explicit.as_deref()).await?;
    if let Some(catalog) = cli_catalog {
        config.catalog = Some(PathBuf::from(catalog));
    }
    Ok(config)
}
