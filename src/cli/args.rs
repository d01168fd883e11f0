//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Look for `.kiroku-nav.toml` in that directory
//! - `--debug`: Enable debug logging
//! - `--json`: Machine-readable output
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::{Layout, LinkType};

/// kiroku-nav - Resolve Kiroku deep links and plan navigator actions
#[derive(Parser, Debug)]
#[command(name = "kiroku-nav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Look for project configuration in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse and adapt a path
    #[command(
        name = "resolve",
        long_about = "Parse a path against the route table and adapt it.\n\n\
            Prints the raw tree the path parses to, the adapted state a navigator \
            would end up in and whether its bottom tab and central pane were \
            dictated by the path or defaulted.",
        after_help = "\
EXAMPLES:
    # Where does a settings link lead on a phone?
    kiroku-nav resolve /settings/account

    # The same on a tablet, as JSON
    kiroku-nav resolve /day/2024-05-01 --layout wide --json"
    )]
    Resolve {
        /// Path to resolve, e.g. /day/2024-05-01
        path: String,

        /// Screen layout (narrow or wide)
        #[arg(long)]
        layout: Option<Layout>,
    },

    /// Plan the actions that take a live state to a path
    #[command(
        name = "plan",
        long_about = "Plan the primitive actions that move a live navigator to a path.\n\n\
            The live root state is read from a JSON file (use - for stdin). Without \
            --apply only the plan is printed; with --apply the plan is run against an \
            in-memory navigator and the resulting state is printed too.",
        after_help = "\
EXAMPLES:
    # Open settings from the home tab
    kiroku-nav plan /settings --current state.json

    # Go up from a nested settings screen
    kiroku-nav plan /settings --current state.json --up

    # Show the state after the plan ran
    kiroku-nav plan /statistics --current state.json --layout wide --apply"
    )]
    Plan {
        /// Target path
        path: String,

        /// JSON file with the live root state, or - for stdin
        #[arg(long, value_name = "FILE")]
        current: PathBuf,

        /// Follow the link as an "up" navigation
        #[arg(long, conflicts_with = "push")]
        up: bool,

        /// Always push
        #[arg(long)]
        push: bool,

        /// Screen layout (narrow or wide)
        #[arg(long)]
        layout: Option<Layout>,

        /// Run the plan against an in-memory navigator and print the result
        #[arg(long)]
        apply: bool,
    },

    /// Print the path of a state
    #[command(name = "href")]
    Href {
        /// JSON file with a state, or - for stdin
        #[arg(value_name = "FILE")]
        state: PathBuf,
    },

    /// List route patterns in match order
    #[command(name = "routes")]
    Routes,

    /// Show configuration
    #[command(
        name = "config",
        long_about = "Show kiroku-nav configuration.\n\n\
            Configuration is read from the user file ($KIROKU_NAV_CONFIG, else \
            $XDG_CONFIG_HOME/kiroku-nav/config.toml, else ~/.kiroku-nav/config.toml) \
            and .kiroku-nav.toml in the working directory, which wins."
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell.",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    kiroku-nav completion bash >> ~/.bashrc

    # Fish
    kiroku-nav completion fish > ~/.config/fish/completions/kiroku-nav.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Command {
    /// Link type requested by `plan` flags.
    pub fn link_type(up: bool, push: bool) -> LinkType {
        if up {
            LinkType::Up
        } else if push {
            LinkType::Push
        } else {
            LinkType::Navigate
        }
    }
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the merged configuration as TOML
    Show,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
