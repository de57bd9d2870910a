//! Unit kinds selected by the command name.

use std::fmt;
use std::str::FromStr;

use crate::error::{LtrError, Result};

/// Granularity of segmentation.
///
/// Each kind maps 1:1 to a command: `chars`, `words`, `sentences`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// User-perceived characters (extended grapheme clusters).
    Grapheme,
    /// Word-like segments; punctuation and whitespace runs are dropped.
    Word,
    /// Sentences.
    Sentence,
}

impl UnitKind {
    /// All kinds, in command order.
    pub const ALL: [Self; 3] = [Self::Grapheme, Self::Word, Self::Sentence];

    /// Map a command name to its unit kind.
    pub fn from_command(command: &str) -> Result<Self> {
        match command {
            "chars" => Ok(Self::Grapheme),
            "words" => Ok(Self::Word),
            "sentences" => Ok(Self::Sentence),
            other => Err(LtrError::InvalidUnitKind(other.to_string())),
        }
    }

    /// The command name for this kind.
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Grapheme => "chars",
            Self::Word => "words",
            Self::Sentence => "sentences",
        }
    }
}

impl FromStr for UnitKind {
    type Err = LtrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_command(s)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}
