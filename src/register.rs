//! Kernel assembly for the CLI.

use std::path::Path;

use tracing::info;

use extensa_config::{ConfigLoader, KernelConfig};
use extensa_core::{Kernel, KernelBuilder};

use crate::user_service;

/// Build the kernel: bundled resources first, then the configured search paths.
pub(crate) fn build_kernel(config_path: Option<&Path>) -> Result<Kernel, Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ConfigLoader::load(path)?
        }
        None => KernelConfig::default(),
    };

    let kernel = KernelBuilder::new()
        .locator(user_service::bundled_resources())
        .configure(&config)
        .implementations(user_service::register)
        .build();

    Ok(kernel)
}
