//! Copies generator output into the library tree

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::Config;
use crate::context::BuildContext;
use crate::error::{Error, Result};

/// What ended up in the library tree after staging
#[derive(Debug, Clone, PartialEq)]
pub struct StagedArtifacts {
    pub wasm: PathBuf,
    pub snippets_dir: PathBuf,
    /// Snippet files relative to `snippets_dir`, sorted
    pub snippets: Vec<PathBuf>,
}

pub struct ArtifactStager<'a> {
    ctx: &'a BuildContext,
    cfg: &'a Config,
}

impl<'a> ArtifactStager<'a> {
    pub fn new(ctx: &'a BuildContext, cfg: &'a Config) -> Self {
        Self { ctx, cfg }
    }

    /// Copy the wasm binary and replace the snippets directory wholesale.
    ///
    /// Any filesystem failure aborts staging; there is no rollback.
    pub fn stage(&self) -> Result<StagedArtifacts> {
        let from = self.ctx.path(self.cfg.generated_wasm());
        let wasm = self.ctx.path(self.cfg.lib_wasm());
        copy_file(&from, &wasm)?;
        println!("{} {}", "Copy".green().bold(), wasm.display());

        let generated = self.ctx.path(self.cfg.generated_snippets());
        let snippets_dir = self.ctx.path(self.cfg.lib_snippets());
        clear_dir(&snippets_dir)?;
        println!("{} {}", "Clear".green().bold(), snippets_dir.display());

        let snippets = if generated.is_dir() {
            copy_dir_recursive(&generated, &snippets_dir)?
        } else {
            debug!(
                "No snippets generated at {}, leaving {} empty",
                generated.display(),
                snippets_dir.display()
            );
            Vec::new()
        };
        println!("{} {}", "Copy".green().bold(), snippets_dir.display());

        Ok(StagedArtifacts {
            wasm,
            snippets_dir,
            snippets,
        })
    }
}

/// Copy a file, creating the destination's parent and overwriting any
/// existing file
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::copy(from, to).map_err(|e| Error::io(from, e))?;
    Ok(())
}

/// Leave `dir` existing and empty
pub fn clear_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(dir, e)),
    }
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    Ok(())
}

/// Copy the contents of `from` into `to`, overwriting name collisions.
/// Returns the copied files relative to `to`, sorted.
pub fn copy_dir_recursive(from: &Path, to: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
        } else {
            copy_file(entry.path(), &target)?;
            debug!("Copied {}", target.display());
            copied.push(relative.to_path_buf());
        }
    }

    Ok(copied)
}
