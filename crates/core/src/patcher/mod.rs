//! Retrofits permission requests into the generated JS bindings
//!
//! The generated module loads its wasm either from disk or over the network.
//! Each of those lines gets a guard in front of it that asks the host for the
//! matching permission when the host has a permission API. The guard text
//! comes from [`PermissionTemplate`]; nothing here ever evaluates it.

mod header;
mod rules;

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use tracing::{debug, warn};

use crate::config::{Config, PermissionTemplate};
use crate::context::BuildContext;
use crate::error::{Error, Result};

pub use header::{COPYRIGHT_START_YEAR, DEBUG_EXPORTS, GENERATED_BANNER, copyright_header};
pub use rules::{FETCH_ANCHOR, READ_ANCHOR, Rewrite, RewriteRule, fetch_path_rule, read_path_rule};

/// How many lines a rewrite rule matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorReport {
    pub rule: &'static str,
    pub matches: usize,
}

impl AnchorReport {
    pub fn is_exact(&self) -> bool {
        self.matches == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedBindings {
    pub text: String,
    pub reports: Vec<AnchorReport>,
}

impl PatchedBindings {
    /// First rule that did not match exactly one line
    pub fn first_mismatch(&self) -> Option<&AnchorReport> {
        self.reports.iter().find(|r| !r.is_exact())
    }
}

/// Apply both rewrites and wrap the result in header, banner and debug
/// exports. Pure: the caller decides what to do with mismatches.
pub fn patch_bindings(
    generated: &str,
    year: i32,
    perms: &PermissionTemplate,
) -> Result<PatchedBindings> {
    let rules = [read_path_rule(perms)?, fetch_path_rule(perms)?];

    let mut body = generated.to_string();
    let mut reports = Vec::with_capacity(rules.len());
    for rule in &rules {
        let rewrite = rule.apply(&body);
        debug!("Rewrite {} matched {} line(s)", rule.name, rewrite.matches);
        reports.push(AnchorReport {
            rule: rule.name,
            matches: rewrite.matches,
        });
        body = rewrite.text;
    }

    let header = copyright_header(year);
    let mut text =
        String::with_capacity(header.len() + GENERATED_BANNER.len() + body.len() + DEBUG_EXPORTS.len() + 2);
    text.push_str(&header);
    text.push('\n');
    text.push_str(GENERATED_BANNER);
    text.push_str(&body);
    if !body.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(DEBUG_EXPORTS);

    Ok(PatchedBindings { text, reports })
}

pub struct BindingPatcher<'a> {
    ctx: &'a BuildContext,
    cfg: &'a Config,
    strict: bool,
}

impl<'a> BindingPatcher<'a> {
    pub fn new(ctx: &'a BuildContext, cfg: &'a Config) -> Self {
        Self {
            ctx,
            cfg,
            strict: cfg.strict_anchors,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Read the generated module, patch it and write the library entry point.
    ///
    /// In strict mode nothing is written when a rule misses its anchor.
    pub fn patch_file(&self) -> Result<(PathBuf, Vec<AnchorReport>)> {
        let source = self.ctx.path(self.cfg.generated_js());
        let generated = fs::read_to_string(&source).map_err(|e| Error::io(&source, e))?;

        let patched = patch_bindings(&generated, self.ctx.year, &self.cfg.permissions)?;

        if let Some(report) = patched.first_mismatch() {
            if self.strict {
                return Err(Error::AnchorMismatch {
                    rule: report.rule,
                    count: report.matches,
                });
            }
            for report in patched.reports.iter().filter(|r| !r.is_exact()) {
                warn!(
                    "Rewrite {} matched {} line(s) in {}, module written without that guard",
                    report.rule,
                    report.matches,
                    source.display()
                );
            }
        }

        let dest = self.ctx.path(self.cfg.lib_js());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&dest, &patched.text).map_err(|e| Error::io(&dest, e))?;
        println!("{} {}", "Write".green().bold(), dest.display());

        Ok((dest, patched.reports))
    }
}
