use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands::{build_command, config_command, init_command, patch_command};

#[derive(Parser, Debug)]
#[command(name = "wasmbuild")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging\n    HOME              Redacted from paths embedded in the compiled binary"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct RootArgs {
    /// Build root as a path or file:// URL (defaults to the current directory)
    #[arg(long)]
    pub root: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format, compile, generate bindings, stage and patch the library
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        root: RootArgs,

        /// Print the stage commands without executing anything
        #[arg(short, long)]
        dry_run: bool,

        /// Write the bindings even if a permission guard finds no anchor line
        #[arg(long)]
        allow_unmatched: bool,
    },
    /// Stage and patch existing wasm-bindgen output without recompiling
    #[command(visible_alias = "p")]
    Patch {
        #[command(flatten)]
        root: RootArgs,

        /// Write the bindings even if a permission guard finds no anchor line
        #[arg(long)]
        allow_unmatched: bool,
    },
    /// Write a default .wasmbuild.json to the build root
    Init {
        #[command(flatten)]
        root: RootArgs,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        root: RootArgs,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Build {
                root,
                dry_run,
                allow_unmatched,
            } => build_command(root.root.as_deref(), dry_run, allow_unmatched),
            Commands::Patch {
                root,
                allow_unmatched,
            } => patch_command(root.root.as_deref(), allow_unmatched),
            Commands::Init { root, force } => init_command(root.root.as_deref(), force),
            Commands::Config { root } => config_command(root.root.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from([
            "wasmbuild",
            "build",
            "--root",
            "file:///tmp/x",
            "--dry-run",
            "--allow-unmatched",
        ]);
        match cli.command {
            Commands::Build {
                root,
                dry_run,
                allow_unmatched,
            } => {
                assert_eq!(root.root.as_deref(), Some("file:///tmp/x"));
                assert!(dry_run);
                assert!(allow_unmatched);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
