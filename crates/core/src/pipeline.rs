//! The fixed build sequence
//!
//! format → compile → bindgen → stage → patch → format bindings. Every step
//! runs only after the previous one succeeded; the first failure ends the run.

use std::path::PathBuf;

use tracing::info;

use crate::command::{Stage, StageCommand};
use crate::config::Config;
use crate::context::BuildContext;
use crate::error::Result;
use crate::patcher::{AnchorReport, BindingPatcher};
use crate::runner::{StageExecutor, run_stage};
use crate::stager::{ArtifactStager, StagedArtifacts};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub staged: StagedArtifacts,
    pub bindings: PathBuf,
    pub anchors: Vec<AnchorReport>,
}

pub struct Pipeline<'a, E> {
    ctx: &'a BuildContext,
    cfg: &'a Config,
    executor: E,
    strict_anchors: bool,
}

impl<'a, E: StageExecutor> Pipeline<'a, E> {
    pub fn new(ctx: &'a BuildContext, cfg: &'a Config, executor: E) -> Self {
        Self {
            ctx,
            cfg,
            executor,
            strict_anchors: cfg.strict_anchors,
        }
    }

    pub fn strict_anchors(mut self, strict: bool) -> Self {
        self.strict_anchors = strict;
        self
    }

    /// Every external command a full run would execute, in order
    pub fn plan(&self) -> Vec<StageCommand> {
        Stage::BUILD_ORDER
            .iter()
            .chain(std::iter::once(&Stage::FormatBindings))
            .map(|stage| stage.command(self.ctx, self.cfg))
            .collect()
    }

    pub fn run(&self) -> Result<BuildReport> {
        info!("Building {} in {}", self.cfg.crate_name, self.ctx.root.display());

        for stage in Stage::BUILD_ORDER {
            run_stage(&self.executor, &stage.command(self.ctx, self.cfg))?;
        }

        self.run_post_build()
    }

    /// Stage, patch and format against existing bindgen output
    pub fn run_post_build(&self) -> Result<BuildReport> {
        let staged = ArtifactStager::new(self.ctx, self.cfg).stage()?;

        let (bindings, anchors) = BindingPatcher::new(self.ctx, self.cfg)
            .strict(self.strict_anchors)
            .patch_file()?;

        run_stage(
            &self.executor,
            &Stage::FormatBindings.command(self.ctx, self.cfg),
        )?;

        info!("Build of {} finished", self.cfg.crate_name);
        Ok(BuildReport {
            staged,
            bindings,
            anchors,
        })
    }
}
