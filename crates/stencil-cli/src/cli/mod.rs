//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stencil_core::domain::ArtifactKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Entity-driven feature and test scaffolding",
    long_about = "Stencil reads a domain manifest describing your entities and \
                  generates delete features, their integration tests, update \
                  tests and fakers with consistent names and namespaces.",
    after_help = "EXAMPLES:\n\
        \x20 stencil generate domain.toml\n\
        \x20 stencil generate domain.toml --solution ./Shop --project Shop\n\
        \x20 stencil generate domain.json --only delete-command-test --dry-run\n\
        \x20 stencil list\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate artifacts for every entity in a domain manifest.
    #[command(
        visible_alias = "g",
        about = "Generate artifacts from a domain manifest",
        after_help = "EXAMPLES:\n\
            \x20 stencil generate domain.toml\n\
            \x20 stencil generate domain.toml --src ./src --test ./tests\n\
            \x20 stencil generate domain.toml --only delete-feature,delete-command-test"
    )]
    Generate(GenerateArgs),

    /// List the artifact kinds Stencil can generate.
    #[command(
        visible_alias = "ls",
        about = "List artifact kinds",
        after_help = "EXAMPLES:\n\
            \x20 stencil list\n\
            \x20 stencil list --output-format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Domain manifest (`.toml` or `.json`).
    #[arg(value_name = "DOMAIN_FILE", help = "Domain manifest describing the entities")]
    pub domain_file: PathBuf,

    /// Solution root; overrides the manifest and the config file.
    #[arg(long = "solution", value_name = "DIR", help = "Solution directory")]
    pub solution: Option<PathBuf>,

    /// Source root (default: `<solution>/src`).
    #[arg(long = "src", value_name = "DIR", help = "Source directory")]
    pub src: Option<PathBuf>,

    /// Test root (default: `<solution>/tests`).
    #[arg(long = "test", value_name = "DIR", help = "Test directory")]
    pub test: Option<PathBuf>,

    /// Project base name every namespace starts with.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "NAME",
        help = "Project base name, e.g. Shop"
    )]
    pub project: Option<String>,

    /// Restrict generation to these kinds.
    #[arg(
        long = "only",
        value_name = "KIND",
        value_delimiter = ',',
        num_args = 1..,
        help = "Only generate these artifact kinds (see `stencil list`)"
    )]
    pub only: Vec<ArtifactKind>,

    /// Render everything and report the paths without writing.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show file names for this entity instead of the `{Name}` pattern.
    #[arg(
        long = "entity",
        value_name = "NAME",
        help = "Show concrete file names for an entity"
    )]
    pub entity: Option<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from(["stencil", "generate", "domain.toml", "--project", "Shop"]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.domain_file, PathBuf::from("domain.toml"));
                assert_eq!(args.project.as_deref(), Some("Shop"));
                assert!(args.only.is_empty());
                assert!(!args.dry_run);
            }
            other => panic!("expected Generate, got {other:?}"),
        }
    }

    #[test]
    fn only_accepts_comma_separated_kinds() {
        let cli = Cli::parse_from([
            "stencil",
            "g",
            "domain.toml",
            "--only",
            "delete-feature,delete_command_test",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate");
        };
        assert_eq!(
            args.only,
            vec![ArtifactKind::DeleteFeature, ArtifactKind::DeleteCommandTest]
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = Cli::try_parse_from(["stencil", "generate", "d.toml", "--only", "controller"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["stencil", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["stencil", "list", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }
}
