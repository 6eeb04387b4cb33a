//! wasmbuild - Reproducible wasm builds with permission-aware JS bindings
//!
//! This crate provides functionality to:
//! - Drive `cargo fmt`, `cargo build` and `wasm-bindgen` as a fail-fast pipeline
//! - Pin the compile environment so the produced binary is reproducible
//! - Stage the generated binary and snippets into a library directory
//! - Patch the generated bindings to request permissions before loading wasm
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod patcher;
pub mod pipeline;
pub mod runner;
pub mod stager;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use command::{Stage, StageCommand};
pub use config::Config;
pub use context::BuildContext;
pub use pipeline::{BuildReport, Pipeline};
pub use runner::{ProcessExecutor, StageExecutor, StageStatus};
