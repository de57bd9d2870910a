//! Unit aggregation: folding, sorting, counting, deduplication, reversal.
//!
//! Stages run in a fixed order, each one optional:
//!
//! 1. accent folding (`ignore_accents`)
//! 2. case folding (`ignore_case`)
//! 3. collation sort, only when `sort` is set and `count` is not
//! 4. counting (`count`, frequency-sorted when `sort` is set), otherwise
//!    deduplication (`unique`), otherwise pass-through
//! 5. reversal (`reverse`), always last
//! 6. newline join

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::Locale;
use serde::{Deserialize, Serialize};

use crate::error::{LtrError, Result};
use crate::fold::{fold_accents, fold_case};

/// Aggregation flags, all off by default.
///
/// Deserialized from the `defaults` table of a config file, where unknown
/// keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct AggregationOptions {
    /// Keep only the first occurrence of each unit
    #[cfg_attr(feature = "clap", arg(short, long))]
    pub unique: bool,

    /// Lowercase units before comparing
    #[cfg_attr(feature = "clap", arg(short, long))]
    pub ignore_case: bool,

    /// Strip diacritics before comparing
    #[cfg_attr(feature = "clap", arg(short = 'I', long))]
    pub ignore_accents: bool,

    /// Annotate each distinct unit with its number of occurrences
    #[cfg_attr(feature = "clap", arg(short, long))]
    pub count: bool,

    /// Sort by collation order, or by descending count with --count
    #[cfg_attr(feature = "clap", arg(short, long))]
    pub sort: bool,

    /// Reverse the final order
    #[cfg_attr(feature = "clap", arg(short, long))]
    pub reverse: bool,

    /// Locale for segmentation and collation (BCP-47, e.g. sv-SE)
    #[cfg_attr(feature = "clap", arg(short, long, value_name = "LOCALE"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl AggregationOptions {
    /// Lay `other` over `self`: flags enabled in either stay enabled, and
    /// `other`'s locale wins when present.
    #[must_use]
    pub fn overlay(self, other: Self) -> Self {
        Self {
            unique: self.unique || other.unique,
            ignore_case: self.ignore_case || other.ignore_case,
            ignore_accents: self.ignore_accents || other.ignore_accents,
            count: self.count || other.count,
            sort: self.sort || other.sort,
            reverse: self.reverse || other.reverse,
            locale: other.locale.or(self.locale),
        }
    }

    /// Whether stage 3 (collation sort) runs.
    pub const fn sorts_by_collation(&self) -> bool {
        self.sort && !self.count
    }
}

/// A distinct unit and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountEntry {
    /// The unit value.
    pub unit: String,
    /// Number of occurrences.
    pub count: usize,
}

impl CountEntry {
    /// Render as `<unit>\t<count>`.
    pub fn render(&self) -> String {
        format!("{}\t{}", self.unit, self.count)
    }
}

/// Apply accent folding, then case folding, to every unit.
pub fn fold_units(units: Vec<String>, ignore_accents: bool, ignore_case: bool) -> Vec<String> {
    if !ignore_accents && !ignore_case {
        return units;
    }
    units
        .into_iter()
        .map(|unit| {
            let unit = if ignore_accents {
                fold_accents(&unit)
            } else {
                unit
            };
            if ignore_case { fold_case(&unit) } else { unit }
        })
        .collect()
}

/// Stable sort by locale collation.
pub fn sort_units(units: &mut [String], collator: &CollatorBorrowed<'_>) {
    units.sort_by(|a, b| collator.compare(a, b));
}

/// Group equal units, in first-occurrence order.
pub fn count_units(units: Vec<String>) -> Vec<CountEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<CountEntry> = Vec::new();

    for unit in units {
        if let Some(&i) = index.get(&unit) {
            entries[i].count += 1;
        } else {
            index.insert(unit.clone(), entries.len());
            entries.push(CountEntry { unit, count: 1 });
        }
    }

    entries
}

/// Order by descending count; ties keep first-occurrence order.
pub fn sort_by_count(entries: &mut [CountEntry]) {
    entries.sort_by_key(|entry| Reverse(entry.count));
}

/// Drop repeated units, keeping each first occurrence in place.
pub fn unique_units(units: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    units
        .into_iter()
        .filter(|unit| seen.insert(unit.clone()))
        .collect()
}

/// Reverse the sequence.
pub fn reverse_units<T>(mut units: Vec<T>) -> Vec<T> {
    units.reverse();
    units
}

/// Turns a unit sequence into a report string according to [`AggregationOptions`].
pub struct Aggregator {
    options: AggregationOptions,
    collator: Option<CollatorBorrowed<'static>>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("options", &self.options)
            .field("collates", &self.collator.is_some())
            .finish()
    }
}

impl Aggregator {
    /// Build an aggregator. A collator for `locale` is loaded only when a
    /// collation sort will run.
    pub fn new(options: AggregationOptions, locale: &Locale) -> Result<Self> {
        let collator = if options.sorts_by_collation() {
            let collator = Collator::try_new(locale.clone().into(), CollatorOptions::default())
                .map_err(|e| LtrError::InvalidLocale {
                    locale: locale.to_string(),
                    reason: e.to_string(),
                })?;
            Some(collator)
        } else {
            None
        };

        Ok(Self { options, collator })
    }

    /// The options this aggregator applies.
    pub const fn options(&self) -> &AggregationOptions {
        &self.options
    }

    /// Run every enabled stage over `units` and join the result.
    #[tracing::instrument(skip_all, fields(units = units.len()))]
    pub fn aggregate(&self, units: Vec<String>) -> String {
        let opts = &self.options;

        let mut units = fold_units(units, opts.ignore_accents, opts.ignore_case);

        if let Some(ref collator) = self.collator {
            sort_units(&mut units, collator);
        }

        let lines: Vec<String> = if opts.count {
            let mut entries = count_units(units);
            if opts.sort {
                sort_by_count(&mut entries);
            }
            tracing::debug!(distinct = entries.len(), "counted units");
            entries.iter().map(CountEntry::render).collect()
        } else if opts.unique {
            unique_units(units)
        } else {
            units
        };

        let lines = if opts.reverse {
            reverse_units(lines)
        } else {
            lines
        };

        lines.join("\n")
    }
}
