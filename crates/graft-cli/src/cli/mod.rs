//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "graft",
    bin_name = "graft",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold new operations into a generated app tree",
    long_about = "Graft renders new files from templates and splices fragments \
                  into existing generated files at marker lines.",
    after_help = "EXAMPLES:\n\
        \x20 graft scaffold query show_post id:uint --module blog --response post:Post\n\
        \x20 graft scaffold query list_post --module blog --paginated --dry-run\n\
        \x20 graft templates\n\
        \x20 graft completions bash > /usr/share/bash-completion/completions/graft",
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
    /// Scaffold a new operation into an existing app.
    #[command(
        visible_alias = "s",
        about = "Scaffold a new operation",
        subcommand
    )]
    Scaffold(ScaffoldCommands),

    /// List the templates that would be rendered.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 graft templates\n\
            \x20 graft templates --format json"
    )]
    Templates(TemplatesArgs),

    /// Initialise a Graft configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 graft init           # platform config directory\n\
            \x20 graft init --local   # .graft.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 graft completions bash > ~/.local/share/bash-completion/completions/graft\n\
            \x20 graft completions zsh  > ~/.zfunc/_graft\n\
            \x20 graft completions fish > ~/.config/fish/completions/graft.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Graft configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 graft config get defaults.module\n\
            \x20 graft config list\n\
            \x20 graft config path"
    )]
    Config(ConfigCommands),
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// Kinds of operation `graft scaffold` can add.
#[derive(Debug, Subcommand)]
pub enum ScaffoldCommands {
    /// Add a query: RPC, messages, CLI command, and keeper handler.
    #[command(
        visible_alias = "q",
        after_help = "FIELDS:\n\
            \x20 name            string field\n\
            \x20 name:uint       string | bool | int | uint | coin\n\
            \x20 name:uints      array.string | array.int | array.uint | array.coin (or strings, ints, uints, coins)\n\
            \x20 name:Post       custom message type, imported from {app}/{module}/post.proto\n\n\
        EXAMPLES:\n\
            \x20 graft scaffold query show_post id:uint --module blog --response post:Post\n\
            \x20 graft scaffold query list_post --module blog --paginated --response posts:Posts"
    )]
    Query(QueryArgs),
}

/// Arguments for `graft scaffold query`.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Operation name, in any case style (`ShowPost`, `showPost`, `show_post`).
    #[arg(value_name = "NAME", help = "Query name")]
    pub name: String,

    /// Request fields as `name[:type]`.
    #[arg(value_name = "REQ_FIELDS", help = "Request fields (name[:type])")]
    pub req_fields: Vec<String>,

    /// Module the query belongs to. Falls back to `[defaults] module`.
    #[arg(short = 'm', long = "module", value_name = "MODULE", help = "Target module")]
    pub module: Option<String>,

    /// Response fields as `name[:type]`, comma separated or repeated.
    #[arg(
        short = 'r',
        long = "response",
        value_name = "FIELDS",
        value_delimiter = ',',
        help = "Response fields (name[:type],...)"
    )]
    pub response: Vec<String>,

    /// Add pagination to both messages.
    #[arg(long = "paginated", help = "Define a paginated query")]
    pub paginated: bool,

    /// One-line description used in the CLI command.
    #[arg(short = 'd', long = "desc", value_name = "TEXT", help = "Query description")]
    pub desc: Option<String>,

    /// App root. Falls back to `[defaults] path`, then the current directory.
    #[arg(short = 'p', long = "path", value_name = "APP_ROOT", help = "App root directory")]
    pub path: Option<PathBuf>,

    /// Go module path. Read from `go.mod` at the app root when omitted.
    #[arg(long = "module-path", value_name = "PATH", help = "Go module path")]
    pub module_path: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation prompt")]
    pub yes: bool,

    /// Show what would change without writing anything.
    #[arg(long = "dry-run", help = "Show planned changes without writing")]
    pub dry_run: bool,
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `graft templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Listing style.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `templates` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One path per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `graft init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.graft.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `graft completions`.
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

/// Subcommands for `graft config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.module`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the configuration file path.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn query_collects_request_and_response_fields() {
        let cli = parse(&[
            "graft", "scaffold", "query", "show_post", "id:uint", "slug", "--module", "blog",
            "--response", "post:Post,author", "--paginated",
        ]);

        let Commands::Scaffold(ScaffoldCommands::Query(args)) = cli.command else {
            panic!("expected scaffold query");
        };
        assert_eq!(args.name, "show_post");
        assert_eq!(args.req_fields, vec!["id:uint", "slug"]);
        assert_eq!(args.response, vec!["post:Post", "author"]);
        assert_eq!(args.module.as_deref(), Some("blog"));
        assert!(args.paginated);
        assert!(!args.dry_run);
    }

    #[test]
    fn repeated_response_flags_accumulate() {
        let cli = parse(&[
            "graft", "s", "q", "x", "-m", "blog", "-r", "a", "-r", "b:uint",
        ]);
        let Commands::Scaffold(ScaffoldCommands::Query(args)) = cli.command else {
            panic!("expected scaffold query");
        };
        assert_eq!(args.response, vec!["a", "b:uint"]);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = parse(&["graft", "templates", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["graft", "-q", "-v", "templates"]).is_err());
    }
}
