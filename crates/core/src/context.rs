//! Build context and the reproducible compile environment

use crate::config::ReproducibleConfig;
use crate::error::{Error, Result};
use chrono::Datelike;
use std::path::{Path, PathBuf};
use url::Url;

/// Immutable facts about one pipeline run.
///
/// Every stage receives this by reference and derives its own paths and
/// environment from it. Nothing in the pipeline touches the process working
/// directory or environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub root: PathBuf,
    pub home: Option<PathBuf>,
    pub year: i32,
}

impl BuildContext {
    /// Resolve a context from the real process environment and clock
    pub fn detect(location: &str) -> Result<Self> {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from);
        Self::resolve(location, home, chrono::Local::now().year())
    }

    /// Resolve a context from explicit inputs, with relative locations
    /// taken from the process working directory.
    pub fn resolve(location: &str, home: Option<PathBuf>, year: i32) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        Self::resolve_from(location, &cwd, home, year)
    }

    /// Resolve a context with relative locations taken from `cwd`.
    ///
    /// `location` is either a filesystem path or a `file://` URL. Any other
    /// URL scheme is rejected: remote or embedded build roots cannot produce
    /// a trustworthy local build.
    pub fn resolve_from(
        location: &str,
        cwd: &Path,
        home: Option<PathBuf>,
        year: i32,
    ) -> Result<Self> {
        let path = local_path(location, cwd)?;

        if !path.is_dir() {
            return Err(Error::InvalidInvocation(format!(
                "build root {} is not a directory",
                path.display()
            )));
        }
        let root = path.canonicalize().map_err(|e| Error::io(&path, e))?;

        let home = home.filter(|h| !h.as_os_str().is_empty());
        if home.is_none() {
            tracing::debug!("No home directory known, build paths will not be redacted");
        }

        Ok(Self { root, home, year })
    }

    /// Absolute path of something relative to the build root
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

fn local_path(location: &str, cwd: &Path) -> Result<PathBuf> {
    if location.is_empty() {
        return Err(Error::InvalidInvocation("empty build root".to_string()));
    }

    // An existing path wins over a URL reading of the same string (`out:v1`)
    let as_path = cwd.join(location);
    if as_path.exists() {
        return Ok(as_path);
    }

    match Url::parse(location) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().map_err(|()| {
            Error::InvalidInvocation(format!("{location} does not name a local file path"))
        }),
        // Single letter schemes are Windows drive prefixes
        Ok(url) if url.scheme().len() > 1 => Err(Error::InvalidInvocation(format!(
            "build must run from a local file path, not a {}: location",
            url.scheme()
        ))),
        _ => Ok(as_path),
    }
}

/// Environment overlay for the compile stage.
///
/// Pins the embedded build time, timezone and locale, and remaps the build
/// root and home directory so that debug info carries no machine-specific
/// absolute paths.
pub fn reproducible_env(ctx: &BuildContext, cfg: &ReproducibleConfig) -> Vec<(String, String)> {
    let mut rustflags = format!(
        "--remap-path-prefix={}={}",
        ctx.root.display(),
        cfg.root_marker
    );
    if let Some(home) = &ctx.home {
        rustflags.push_str(&format!(
            " --remap-path-prefix={}={}",
            home.display(),
            cfg.home_marker
        ));
    }

    vec![
        ("SOURCE_DATE_EPOCH".to_string(), cfg.source_date_epoch.clone()),
        ("TZ".to_string(), cfg.timezone.clone()),
        ("LC_ALL".to_string(), cfg.locale.clone()),
        ("RUSTFLAGS".to_string(), rustflags),
    ]
}
