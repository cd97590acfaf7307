//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "catalog",
    bin_name = "catalog",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate and submit product drafts",
    long_about = "catalog checks product drafts (JSON or TOML) against the \
                  catalog ruleset and submits the valid ones with fresh ids.",
    after_help = "EXAMPLES:\n\
        \x20 catalog validate drafts/\n\
        \x20 catalog submit lamp.json --json\n\
        \x20 catalog rules --field colors.price\n\
        \x20 catalog completions bash > /usr/share/bash-completion/completions/catalog",
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
    /// Check drafts without submitting them.
    #[command(
        visible_alias = "check",
        about = "Validate product drafts",
        after_help = "EXAMPLES:\n\
            \x20 catalog validate lamp.json\n\
            \x20 catalog validate drafts/ batch.toml\n\
            \x20 catalog validate lamp.json --max-quantity 9999"
    )]
    Validate(ValidateArgs),

    /// Validate drafts and submit the valid ones.
    #[command(
        about = "Submit product drafts",
        after_help = "EXAMPLES:\n\
            \x20 catalog submit lamp.json\n\
            \x20 catalog submit drafts/ --json > accepted.json\n\
            \x20 catalog submit lamp.json --seed 42   # reproducible ids"
    )]
    Submit(SubmitArgs),

    /// Show the validation rules.
    #[command(
        visible_alias = "ls",
        about = "List validation rules",
        after_help = "EXAMPLES:\n\
            \x20 catalog rules\n\
            \x20 catalog rules --field name\n\
            \x20 catalog rules --format csv"
    )]
    Rules(RulesArgs),

    /// Create a configuration file with the defaults.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 catalog init                     # default location\n\
            \x20 catalog init --config ./cat.toml # explicit path\n\
            \x20 catalog init --force             # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 catalog completions bash > ~/.local/share/bash-completion/completions/catalog\n\
            \x20 catalog completions zsh  > ~/.zfunc/_catalog\n\
            \x20 catalog completions fish > ~/.config/fish/completions/catalog.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 catalog config get validation.max_quantity\n\
            \x20 catalog config list\n\
            \x20 catalog config path"
    )]
    Config(ConfigCommands),
}

// ── validate / submit ─────────────────────────────────────────────────────────

/// Arguments for `catalog validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Draft files or directories.
    #[arg(value_name = "PATH", required = true, help = "Draft files or directories")]
    pub paths: Vec<PathBuf>,

    /// Override `validation.max_quantity` for this run.
    #[arg(
        long = "max-quantity",
        value_name = "UNITS",
        help = "Maximum quantity per product or color"
    )]
    pub max_quantity: Option<u32>,
}

/// Arguments for `catalog submit`.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Draft files or directories.
    #[arg(value_name = "PATH", required = true, help = "Draft files or directories")]
    pub paths: Vec<PathBuf>,

    /// Print accepted products as JSON on stdout.
    #[arg(long = "json", help = "Print accepted products as JSON")]
    pub json: bool,

    /// Generate ids deterministically from this seed.
    #[arg(
        long = "seed",
        value_name = "N",
        help = "Seed for reproducible ids"
    )]
    pub seed: Option<u64>,

    /// Override `validation.max_quantity` for this run.
    #[arg(
        long = "max-quantity",
        value_name = "UNITS",
        help = "Maximum quantity per product or color"
    )]
    pub max_quantity: Option<u32>,
}

// ── rules ─────────────────────────────────────────────────────────────────────

/// Arguments for `catalog rules`.
#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Only show one field, e.g. `price` or `colors.price`.
    #[arg(
        short = 'f',
        long = "field",
        value_name = "FIELD",
        help = "Show rules for one field"
    )]
    pub field: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: RulesFormat,
}

/// Output format for the `rules` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RulesFormat {
    /// Human-readable table.
    Table,
    /// One `field code` pair per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `catalog init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `catalog completions`.
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

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `catalog config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `validation.max_quantity`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_validate_with_several_paths() {
        let cli = Cli::parse_from(["catalog", "validate", "a.json", "drafts/"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.paths, [PathBuf::from("a.json"), PathBuf::from("drafts/")]);
        assert_eq!(args.max_quantity, None);
    }

    #[test]
    fn validate_requires_a_path() {
        assert!(Cli::try_parse_from(["catalog", "validate"]).is_err());
    }

    #[test]
    fn parse_submit_flags() {
        let cli = Cli::parse_from([
            "catalog", "submit", "lamp.toml", "--json", "--seed", "42", "--max-quantity", "9999",
        ]);
        let Commands::Submit(args) = cli.command else {
            panic!("expected Submit command");
        };
        assert!(args.json);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.max_quantity, Some(9999));
    }

    #[test]
    fn rules_alias_and_format() {
        let cli = Cli::parse_from(["catalog", "ls", "--format", "csv", "-f", "price"]);
        let Commands::Rules(args) = cli.command else {
            panic!("expected Rules command");
        };
        assert_eq!(args.format, RulesFormat::Csv);
        assert_eq!(args.field.as_deref(), Some("price"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["catalog", "rules", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["catalog", "--quiet", "--verbose", "rules"]);
        assert!(result.is_err());
    }
}
