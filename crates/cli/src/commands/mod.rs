pub mod build;
pub mod config;
pub mod init;
pub mod patch;

pub use build::build_command;
pub use config::config_command;
pub use init::init_command;
pub use patch::patch_command;

use anyhow::{Context, Result};
use wasmbuild_core::{BuildContext, Config};

/// Resolve the build root, defaulting to the current directory
pub(crate) fn resolve_context(root: Option<&str>) -> Result<BuildContext> {
    let location = match root {
        Some(root) => root.to_string(),
        None => std::env::current_dir()
            .context("Failed to get current directory")?
            .to_string_lossy()
            .into_owned(),
    };

    Ok(BuildContext::detect(&location)?)
}

/// Resolve the build root and its configuration
pub(crate) fn load(root: Option<&str>) -> Result<(BuildContext, Config)> {
    let ctx = resolve_context(root)?;
    let cfg = Config::load_for_root(&ctx.root)
        .with_context(|| format!("Failed to load configuration for {}", ctx.root.display()))?;
    Ok((ctx, cfg))
}
