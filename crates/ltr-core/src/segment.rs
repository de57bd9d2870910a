//! Unicode text segmentation.
//!
//! Boundary detection is delegated to ICU4X (UAX #29 rules, tailored by the
//! content locale for words and sentences). This module only layers the
//! per-kind filter policy on top:
//!
//! - graphemes and sentences: drop blank segments, trim the rest
//! - words: keep only segments the word rules classify as word-like

use icu::locale::Locale;
use icu::segmenter::options::{SentenceBreakOptions, WordBreakOptions};
use icu::segmenter::{GraphemeClusterSegmenter, SentenceSegmenter, WordSegmenter};

use crate::error::{LtrError, Result};
use crate::unit::UnitKind;

/// Segmentation engine for one unit kind.
enum Engine {
    Grapheme,
    Word(WordSegmenter),
    Sentence(SentenceSegmenter),
}

/// Splits text into trimmed, non-empty units of a single [`UnitKind`].
pub struct Segmenter {
    kind: UnitKind,
    engine: Engine,
}

impl std::fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segmenter")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Segmenter {
    /// Build a segmenter for `kind` using `locale` as the content locale.
    ///
    /// Grapheme cluster rules do not depend on the locale.
    pub fn new(kind: UnitKind, locale: &Locale) -> Result<Self> {
        let data_error = |e: &dyn std::fmt::Display| LtrError::InvalidLocale {
            locale: locale.to_string(),
            reason: e.to_string(),
        };

        let engine = match kind {
            UnitKind::Grapheme => Engine::Grapheme,
            UnitKind::Word => {
                let mut options = WordBreakOptions::default();
                options.content_locale = Some(&locale.id);
                let segmenter = WordSegmenter::try_new_auto(options).map_err(|e| data_error(&e))?;
                Engine::Word(segmenter)
            }
            UnitKind::Sentence => {
                let mut options = SentenceBreakOptions::default();
                options.content_locale = Some(&locale.id);
                let segmenter = SentenceSegmenter::try_new(options).map_err(|e| data_error(&e))?;
                Engine::Sentence(segmenter)
            }
        };

        Ok(Self { kind, engine })
    }

    /// The unit kind this segmenter produces.
    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Split `text` into units, in text order.
    #[tracing::instrument(skip_all, fields(kind = %self.kind, text_len = text.len()))]
    pub fn segment(&self, text: &str) -> Vec<String> {
        let units: Vec<String> = match &self.engine {
            Engine::Grapheme => {
                let breaks = GraphemeClusterSegmenter::new().segment_str(text);
                keep_non_blank(segments(text, breaks))
            }
            Engine::Sentence(segmenter) => {
                let breaks = segmenter.as_borrowed().segment_str(text);
                keep_non_blank(segments(text, breaks))
            }
            Engine::Word(segmenter) => {
                let mut start = 0;
                let mut units = Vec::new();
                for (end, word_type) in segmenter
                    .as_borrowed()
                    .segment_str(text)
                    .iter_with_word_type()
                {
                    let segment = text.get(start..end).unwrap_or_default();
                    start = end;
                    if word_type.is_word_like() && !is_blank(segment) {
                        units.push(segment.trim().to_string());
                    }
                }
                units
            }
        };

        tracing::debug!(units = units.len(), "segmented text");
        units
    }
}

/// Segment `text` in one call.
pub fn segment(kind: UnitKind, locale: &Locale, text: &str) -> Result<Vec<String>> {
    Ok(Segmenter::new(kind, locale)?.segment(text))
}

/// True for empty strings and strings made only of whitespace.
fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// Turn a breakpoint sequence (starting at 0) into the slices between breakpoints.
fn segments<'t>(
    text: &'t str,
    breaks: impl Iterator<Item = usize>,
) -> impl Iterator<Item = &'t str> {
    let mut start = 0;
    breaks.filter_map(move |end| {
        let segment = text.get(start..end);
        start = end;
        segment.filter(|s| !s.is_empty())
    })
}

fn keep_non_blank<'t>(segments: impl Iterator<Item = &'t str>) -> Vec<String> {
    segments
        .filter(|s| !is_blank(s))
        .map(|s| s.trim().to_string())
        .collect()
}
