use anyhow::{Context, Result};
use wasmbuild_core::{Pipeline, ProcessExecutor};

use super::load;
use crate::display::print_report;

pub fn patch_command(root: Option<&str>, allow_unmatched: bool) -> Result<()> {
    let (ctx, cfg) = load(root)?;

    let generated = ctx.path(cfg.generated_js());
    if !generated.exists() {
        anyhow::bail!(
            "No generated bindings at {}, run `wasmbuild build` first",
            generated.display()
        );
    }

    let report = Pipeline::new(&ctx, &cfg, ProcessExecutor)
        .strict_anchors(cfg.strict_anchors && !allow_unmatched)
        .run_post_build()
        .context("Patch aborted")?;
    print_report(&report);
    Ok(())
}
