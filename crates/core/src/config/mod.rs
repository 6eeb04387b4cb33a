//! Configuration management for wasmbuild

mod settings;

// Re-export main types
pub use settings::{CONFIG_FILE_NAME, Config, PermissionTemplate, ReproducibleConfig};
