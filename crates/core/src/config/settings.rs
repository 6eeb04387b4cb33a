use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".wasmbuild.json";
const ALT_CONFIG_FILE_NAME: &str = "wasmbuild.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Name of the library crate; also names the compiled binary and the
    /// generated binding files.
    pub crate_name: String,
    pub features: Vec<String>,
    pub target: String,
    pub bindgen_target: String,
    pub bindgen_out_dir: PathBuf,
    pub weak_refs: bool,
    pub lib_dir: PathBuf,
    pub reproducible: ReproducibleConfig,
    pub permissions: PermissionTemplate,
    /// Abort when a binding rewrite does not match exactly one line
    pub strict_anchors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crate_name: "deno_graph".to_string(),
            features: vec!["wasm".to_string()],
            target: "wasm32-unknown-unknown".to_string(),
            bindgen_target: "deno".to_string(),
            bindgen_out_dir: PathBuf::from("target/wasm32-bindgen-deno-js"),
            weak_refs: true,
            lib_dir: PathBuf::from("lib"),
            reproducible: ReproducibleConfig::default(),
            permissions: PermissionTemplate::default(),
            strict_anchors: true,
        }
    }
}

/// Values pinned in the compile stage environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ReproducibleConfig {
    pub source_date_epoch: String,
    pub timezone: String,
    pub locale: String,
    pub root_marker: String,
    pub home_marker: String,
}

impl Default for ReproducibleConfig {
    fn default() -> Self {
        Self {
            source_date_epoch: "1600000000".to_string(),
            timezone: "UTC".to_string(),
            locale: "C".to_string(),
            root_marker: ".".to_string(),
            home_marker: "~".to_string(),
        }
    }
}

/// JS snippets used when emitting permission guards into the bindings.
///
/// The pipeline never evaluates these; they are only spliced into the
/// generated module and run by the host that later loads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PermissionTemplate {
    pub presence_check: String,
    pub request_fn: String,
}

impl Default for PermissionTemplate {
    fn default() -> Self {
        Self {
            presence_check: "\"permissions\" in Deno".to_string(),
            request_fn: "Deno.permissions.request".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| Error::io(path, e))?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            let config_path = current.join(ALT_CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config file above `root`, or the defaults if none exists
    pub fn load_for_root(root: &Path) -> Result<Self> {
        match Self::find_config_file(root) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                let config = Self::load_from_file(&path)?;
                config.validate()?;
                Ok(config)
            }
            None => {
                tracing::debug!("No config file found above {}, using defaults", root.display());
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.crate_name.trim().is_empty() {
            return Err(Error::ConfigError("crate_name must not be empty".to_string()));
        }
        if self.target.trim().is_empty() {
            return Err(Error::ConfigError("target must not be empty".to_string()));
        }
        for dir in [&self.bindgen_out_dir, &self.lib_dir] {
            if dir.is_absolute() {
                return Err(Error::ConfigError(format!(
                    "{} must be relative to the build root",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// `target/<target>/release/<crate>.wasm`
    pub fn compiled_wasm(&self) -> PathBuf {
        PathBuf::from("target")
            .join(&self.target)
            .join("release")
            .join(format!("{}.wasm", self.crate_name))
    }

    pub fn generated_wasm(&self) -> PathBuf {
        self.bindgen_out_dir
            .join(format!("{}_bg.wasm", self.crate_name))
    }

    pub fn generated_js(&self) -> PathBuf {
        self.bindgen_out_dir.join(format!("{}.js", self.crate_name))
    }

    pub fn generated_snippets(&self) -> PathBuf {
        self.bindgen_out_dir.join("snippets")
    }

    pub fn lib_wasm(&self) -> PathBuf {
        self.lib_dir.join(format!("{}_bg.wasm", self.crate_name))
    }

    pub fn lib_js(&self) -> PathBuf {
        self.lib_dir.join(format!("{}.js", self.crate_name))
    }

    /// Hand-maintained companion loader; formatted but never generated
    pub fn lib_wasm_js(&self) -> PathBuf {
        self.lib_dir.join(format!("{}.wasm.js", self.crate_name))
    }

    pub fn lib_snippets(&self) -> PathBuf {
        self.lib_dir.join("snippets")
    }
}
