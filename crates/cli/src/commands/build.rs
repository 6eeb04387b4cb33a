use anyhow::{Context, Result};
use tracing::debug;
use wasmbuild_core::{Pipeline, ProcessExecutor};

use super::load;
use crate::display::{print_command_breakdown, print_report};

pub fn build_command(root: Option<&str>, dry_run: bool, allow_unmatched: bool) -> Result<()> {
    let (ctx, cfg) = load(root)?;
    debug!("Build context: {:?}", ctx);

    let pipeline = Pipeline::new(&ctx, &cfg, ProcessExecutor)
        .strict_anchors(cfg.strict_anchors && !allow_unmatched);

    if dry_run {
        println!("🔍 Build plan for {} ({})", cfg.crate_name, ctx.root.display());
        println!("{}", "=".repeat(80));
        for command in pipeline.plan() {
            print_command_breakdown(&command);
        }
        return Ok(());
    }

    let report = pipeline.run().context("Build aborted")?;
    print_report(&report);
    Ok(())
}
