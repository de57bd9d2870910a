//! One invocation: segment every source, aggregate each, join the reports.

use icu::locale::Locale;
use rayon::prelude::*;

use crate::aggregate::{AggregationOptions, Aggregator};
use crate::error::Result;
use crate::locale::resolve_locale;
use crate::segment::Segmenter;
use crate::unit::UnitKind;

/// Separator between per-source reports.
pub const REPORT_SEPARATOR: &str = "\n";

/// A resolved segmentation + aggregation configuration.
///
/// The locale is resolved once in [`Pipeline::new`] and shared read-only by
/// every source, for both segmentation and collation.
#[derive(Debug, Clone)]
pub struct Pipeline {
    kind: UnitKind,
    locale: Locale,
    options: AggregationOptions,
}

impl Pipeline {
    /// Resolve the locale and validate the configuration.
    ///
    /// Fails with [`LtrError::InvalidLocale`](crate::LtrError::InvalidLocale)
    /// before any text is processed.
    pub fn new(kind: UnitKind, options: AggregationOptions) -> Result<Self> {
        let locale = resolve_locale(options.locale.as_deref())?;
        tracing::debug!(%kind, %locale, ?options, "pipeline configured");
        Ok(Self {
            kind,
            locale,
            options,
        })
    }

    /// The unit kind being produced.
    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// The locale used for segmentation and collation.
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Segment and aggregate a single source.
    pub fn report(&self, text: &str) -> Result<String> {
        let segmenter = Segmenter::new(self.kind, &self.locale)?;
        let aggregator = Aggregator::new(self.options.clone(), &self.locale)?;
        Ok(aggregator.aggregate(segmenter.segment(text)))
    }

    /// Process all sources in parallel and join their reports in source order.
    ///
    /// The first failing source aborts the whole run; no partial output is
    /// returned.
    #[tracing::instrument(skip_all, fields(kind = %self.kind, sources = sources.len()))]
    pub fn run<S>(&self, sources: &[S]) -> Result<String>
    where
        S: AsRef<str> + Sync,
    {
        let reports = sources
            .par_iter()
            .map(|text| self.report(text.as_ref()))
            .collect::<Result<Vec<String>>>()?;

        Ok(reports.join(REPORT_SEPARATOR))
    }
}

/// Validate `command`, then run the pipeline over `sources`.
pub fn run<S>(command: &str, options: AggregationOptions, sources: &[S]) -> Result<String>
where
    S: AsRef<str> + Sync,
{
    let kind = UnitKind::from_command(command)?;
    Pipeline::new(kind, options)?.run(sources)
}
