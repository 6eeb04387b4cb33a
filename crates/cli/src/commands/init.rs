use anyhow::{Context, Result};
use tracing::info;
use wasmbuild_core::{Config, config::CONFIG_FILE_NAME};

use super::resolve_context;

pub fn init_command(root: Option<&str>, force: bool) -> Result<()> {
    let ctx = resolve_context(root)?;

    let config_path = ctx.path(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    info!("Wrote default configuration");

    println!("✅ Created config: {}", config_path.display());
    Ok(())
}
