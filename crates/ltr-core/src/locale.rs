//! Locale resolution.
//!
//! A single [`Locale`] is resolved per invocation and shared by segmentation
//! and collation, so the two never disagree.

use icu::locale::Locale;

use crate::error::{LtrError, Result};

/// Environment variables consulted for the process default, highest precedence first.
const LOCALE_ENV_VARS: &[&str] = &["LC_ALL", "LC_COLLATE", "LANG"];

/// Parse a BCP-47 locale identifier.
pub fn parse_locale(tag: &str) -> Result<Locale> {
    tag.trim()
        .parse::<Locale>()
        .map_err(|e| LtrError::InvalidLocale {
            locale: tag.to_string(),
            reason: e.to_string(),
        })
}

/// Resolve an explicit locale, or fall back to the environment default.
///
/// An explicit identifier is parsed strictly. The environment fallback never
/// fails; see [`environment_locale`].
#[tracing::instrument(level = "debug")]
pub fn resolve_locale(explicit: Option<&str>) -> Result<Locale> {
    match explicit {
        Some(tag) => parse_locale(tag),
        None => Ok(environment_locale()),
    }
}

/// The process default locale.
///
/// Reads `LC_ALL`, `LC_COLLATE`, then `LANG`. Unset, `C`/`POSIX`, or
/// unparsable values resolve to the root locale (`und`).
pub fn environment_locale() -> Locale {
    locale_from_vars(|name| std::env::var(name).ok())
}

/// [`environment_locale`] over an arbitrary variable lookup.
fn locale_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Locale {
    let value = LOCALE_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty());

    let Some(value) = value else {
        return Locale::UNKNOWN;
    };

    posix_to_locale(&value).unwrap_or_else(|| {
        tracing::debug!(value = %value, "unusable environment locale, using root");
        Locale::UNKNOWN
    })
}

/// Convert a POSIX locale string (`en_US.UTF-8`, `de_DE@euro`) to a [`Locale`].
///
/// Returns `None` for `C`, `POSIX`, and values the parser rejects.
fn posix_to_locale(value: &str) -> Option<Locale> {
    let name = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    name.replace('_', "-").parse::<Locale>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bcp47_tags() {
        let locale = parse_locale("sv-SE").unwrap();
        assert_eq!(locale.to_string(), "sv-SE");
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_locale("not a locale!!").unwrap_err();
        match err {
            LtrError::InvalidLocale { locale, .. } => assert_eq!(locale, "not a locale!!"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn explicit_locale_wins() {
        let locale = resolve_locale(Some("de")).unwrap();
        assert_eq!(locale.to_string(), "de");
    }

    #[test]
    fn explicit_invalid_locale_is_an_error() {
        assert!(resolve_locale(Some("12345678901")).is_err());
    }

    #[test]
    fn posix_values_convert() {
        assert_eq!(
            posix_to_locale("en_US.UTF-8").map(|l| l.to_string()),
            Some("en-US".to_string())
        );
        assert_eq!(
            posix_to_locale("de_DE@euro").map(|l| l.to_string()),
            Some("de-DE".to_string())
        );
    }

    #[test]
    fn posix_c_locale_has_no_tag() {
        assert!(posix_to_locale("C").is_none());
        assert!(posix_to_locale("C.UTF-8").is_none());
        assert!(posix_to_locale("POSIX").is_none());
        assert!(posix_to_locale("").is_none());
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn lc_all_beats_lc_collate_beats_lang() {
        let all = vars(&[
            ("LC_ALL", "sv_SE.UTF-8"),
            ("LC_COLLATE", "de_DE"),
            ("LANG", "fr_FR"),
        ]);
        assert_eq!(locale_from_vars(all).to_string(), "sv-SE");

        let collate = vars(&[("LC_COLLATE", "de_DE"), ("LANG", "fr_FR")]);
        assert_eq!(locale_from_vars(collate).to_string(), "de-DE");

        let lang = vars(&[("LANG", "fr_FR.UTF-8")]);
        assert_eq!(locale_from_vars(lang).to_string(), "fr-FR");
    }

    #[test]
    fn blank_variables_are_skipped() {
        let lookup = vars(&[("LC_ALL", " "), ("LANG", "en_GB")]);
        assert_eq!(locale_from_vars(lookup).to_string(), "en-GB");
    }

    #[test]
    fn unset_or_c_locale_falls_back_to_root() {
        assert_eq!(locale_from_vars(vars(&[])), Locale::UNKNOWN);
        assert_eq!(locale_from_vars(vars(&[("LC_ALL", "C")])).to_string(), "und");
        assert_eq!(locale_from_vars(vars(&[("LANG", "POSIX")])), Locale::UNKNOWN);
        assert_eq!(locale_from_vars(vars(&[("LANG", "%%%")])), Locale::UNKNOWN);
    }

    #[test]
    fn root_locale_still_segments_and_collates() {
        let words =
            crate::segment::segment(crate::UnitKind::Word, &Locale::UNKNOWN, "a b").unwrap();
        assert_eq!(words, vec!["a", "b"]);
        let options = crate::AggregationOptions {
            sort: true,
            ..Default::default()
        };
        assert!(crate::Aggregator::new(options, &Locale::UNKNOWN).is_ok());
    }
}
