//! Library interface for the `ltr` CLI.
//!
//! Exposes the argument parser and commands so `xtask` can render man pages
//! and completions, and so tests can reach them. The entry point is in
//! `main.rs`.

pub mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use ltr_core::UnitKind;
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Whether diagnostics on stderr should carry ANSI styling.
    pub fn use_ansi(self) -> bool {
        use std::io::IsTerminal;

        match self {
            Self::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
            }
            Self::Always => true,
            Self::Never => false,
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, ltr_core=trace)
    LTR_LOG_PATH           Explicit log file path
    LTR_LOG_DIR            Log directory
    LTR_DEFAULTS__LOCALE   Default locale for segmentation and sorting
    LC_ALL, LC_COLLATE, LANG
                           Locale used when none is configured
";

const OPERANDS_HELP: &str = "\
Operands are files. '-' reads standard input; with no operands, standard input is read.
Each operand gets its own report; reports are printed in operand order.";

/// Command-line interface definition for ltr.
#[derive(Parser)]
#[command(name = "ltr")]
#[command(about = "Segment text into characters, words, or sentences", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize diagnostics
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// One line per user-perceived character (grapheme cluster)
    #[command(after_help = OPERANDS_HELP)]
    Chars(commands::segment::SegmentArgs),

    /// One line per word; punctuation and spacing are skipped
    #[command(after_help = OPERANDS_HELP)]
    Words(commands::segment::SegmentArgs),

    /// One line per sentence
    #[command(after_help = OPERANDS_HELP)]
    Sentences(commands::segment::SegmentArgs),
}

impl Commands {
    /// Split into the unit kind and the shared arguments.
    pub fn into_parts(self) -> (UnitKind, commands::segment::SegmentArgs) {
        match self {
            Self::Chars(args) => (UnitKind::Grapheme, args),
            Self::Words(args) => (UnitKind::Word, args),
            Self::Sentences(args) => (UnitKind::Sentence, args),
        }
    }
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
