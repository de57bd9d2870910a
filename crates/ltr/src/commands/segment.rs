//! The `chars`, `words`, and `sentences` commands.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use ltr_core::{AggregationOptions, Pipeline, UnitKind};

use super::{STDIN_OPERAND, read_input};

/// Arguments shared by every segmentation command.
#[derive(Args, Debug)]
pub struct SegmentArgs {
    /// Aggregation flags for this run.
    #[command(flatten)]
    pub options: AggregationOptions,

    /// Files to read. `-` reads standard input; no files reads standard input.
    #[arg(value_name = "FILE")]
    pub files: Vec<Utf8PathBuf>,
}

impl SegmentArgs {
    /// The operands to read, defaulting to stdin.
    pub fn operands(&self) -> Vec<Utf8PathBuf> {
        if self.files.is_empty() {
            vec![Utf8PathBuf::from(STDIN_OPERAND)]
        } else {
            self.files.clone()
        }
    }
}

/// Segment every input, aggregate each, and print the joined reports.
#[instrument(name = "cmd_segment", skip_all, fields(kind = %kind))]
pub fn cmd_segment(
    kind: UnitKind,
    args: SegmentArgs,
    defaults: AggregationOptions,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let operands = args.operands();
    let options = defaults.overlay(args.options);
    debug!(operands = ?operands, options = ?options, "executing segment command");

    // Resolve the locale before touching any input.
    let pipeline = Pipeline::new(kind, options).context("invalid options")?;

    let sources = operands
        .iter()
        .map(|operand| read_input(operand, max_input_bytes))
        .collect::<anyhow::Result<Vec<String>>>()?;

    let report = pipeline
        .run(&sources)
        .with_context(|| format!("failed to segment {kind}"))?;

    println!("{report}");
    Ok(())
}
