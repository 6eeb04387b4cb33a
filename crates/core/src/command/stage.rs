use std::fmt;
use std::path::Path;

use super::StageCommand;
use crate::config::Config;
use crate::context::{BuildContext, reproducible_env};

/// The external tool invocations of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// `cargo fmt` over the crate sources
    Format,
    /// `cargo build` for the wasm target with a pinned environment
    Compile,
    /// `wasm-bindgen` over the compiled binary
    BindGen,
    /// `deno fmt` over the patched binding files
    FormatBindings,
}

impl Stage {
    pub const BUILD_ORDER: [Stage; 3] = [Stage::Format, Stage::Compile, Stage::BindGen];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Format => "format",
            Stage::Compile => "compile",
            Stage::BindGen => "bindgen",
            Stage::FormatBindings => "format-bindings",
        }
    }

    /// Label shown to the operator when the stage starts
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Format => "Format",
            Stage::Compile => "Compile",
            Stage::BindGen => "Bindgen",
            Stage::FormatBindings => "Format bindings",
        }
    }

    pub fn command(&self, ctx: &BuildContext, cfg: &Config) -> StageCommand {
        let command = match self {
            Stage::Format => StageCommand::new(*self, "cargo", args(&["fmt", "--all"])),
            Stage::Compile => {
                let mut args = args(&["build", "--release", "--no-default-features"]);
                if !cfg.features.is_empty() {
                    args.push("--features".to_string());
                    args.push(cfg.features.join(","));
                }
                args.push("--target".to_string());
                args.push(cfg.target.clone());

                StageCommand::new(*self, "cargo", args)
                    .with_envs(reproducible_env(ctx, &cfg.reproducible))
            }
            Stage::BindGen => {
                let mut args = vec![
                    relative(&cfg.compiled_wasm()),
                    "--target".to_string(),
                    cfg.bindgen_target.clone(),
                ];
                if cfg.weak_refs {
                    args.push("--weak-refs".to_string());
                }
                args.push("--out-dir".to_string());
                args.push(relative(&cfg.bindgen_out_dir));

                StageCommand::new(*self, "wasm-bindgen", args)
            }
            Stage::FormatBindings => StageCommand::new(
                *self,
                "deno",
                vec![
                    "fmt".to_string(),
                    "--quiet".to_string(),
                    relative(&cfg.lib_js()),
                    relative(&cfg.lib_wasm_js()),
                ],
            ),
        };

        command.with_working_dir(ctx.root.clone())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Render a root-relative path the way the tools expect it: `./a/b`
fn relative(path: &Path) -> String {
    format!("./{}", path.display())
}
