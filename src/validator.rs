//! Cross-language consistency checks.
//!
//! Every non-English dictionary is measured against the English source of
//! truth. Missing keys and empty values are warnings that mark the run
//! invalid; extra keys are informational; placeholder-token mismatches are
//! errors, the one check that fails validation outright.

use std::{collections::BTreeSet, sync::LazyLock};

use anyhow::{Result, bail};
use regex::Regex;

use crate::dictionary::{LanguageDictionary, TranslationSet};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex"));

/// The unordered set of `{name}` tokens in a translation value.
pub fn placeholder_tokens(value: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(value)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// A shared key whose translated value carries a different set of
/// placeholder tokens than the English source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatch {
    pub key: String,
    pub expected: BTreeSet<String>,
    pub found: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct LanguageReport {
    pub locale: String,
    /// Present in English, absent here. Warning; marks the run invalid.
    pub missing_keys: Vec<String>,
    /// Present here, absent in English. Warning only.
    pub extra_keys: Vec<String>,
    /// Keys with empty values. Warning; marks the run invalid.
    pub empty_keys: Vec<String>,
    /// Placeholder-token mismatches. Errors.
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
    /// Percentage of English keys present here with a non-empty value.
    pub completion: f64,
}

impl LanguageReport {
    pub fn is_valid(&self) -> bool {
        self.missing_keys.is_empty() && self.empty_keys.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.completion >= 100.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub languages: Vec<LanguageReport>,
}

impl ValidationReport {
    /// Valid only if no language has missing keys or empty values.
    /// Placeholder errors are tracked separately via `error_count`.
    pub fn is_valid(&self) -> bool {
        self.languages.iter().all(LanguageReport::is_valid)
    }

    /// Total placeholder-mismatch errors across all languages.
    pub fn error_count(&self) -> usize {
        self.languages
            .iter()
            .map(|lang| lang.placeholder_mismatches.len())
            .sum()
    }
}

fn check_language(locale: &str, en: &LanguageDictionary, dict: &LanguageDictionary) -> LanguageReport {
    let missing_keys: Vec<String> = en
        .keys()
        .filter(|key| !dict.contains_key(*key))
        .cloned()
        .collect();

    let extra_keys: Vec<String> = dict
        .keys()
        .filter(|key| !en.contains_key(*key))
        .cloned()
        .collect();

    let empty_keys: Vec<String> = dict
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key.clone())
        .collect();

    let placeholder_mismatches: Vec<PlaceholderMismatch> = en
        .iter()
        .filter_map(|(key, en_value)| {
            let translated = dict.get(key)?;
            let expected = placeholder_tokens(en_value);
            let found = placeholder_tokens(translated);
            (expected != found).then(|| PlaceholderMismatch {
                key: key.clone(),
                expected,
                found,
            })
        })
        .collect();

    let complete = en
        .keys()
        .filter(|key| dict.get(*key).is_some_and(|value| !value.is_empty()))
        .count();
    let completion = if en.is_empty() {
        0.0
    } else {
        (complete as f64 / en.len() as f64) * 100.0
    };

    LanguageReport {
        locale: locale.to_string(),
        missing_keys,
        extra_keys,
        empty_keys,
        placeholder_mismatches,
        completion,
    }
}

/// Validate every non-English dictionary against the English source.
///
/// Languages are reported in lexicographic order.
pub fn validate(translations: &TranslationSet, primary_locale: &str) -> Result<ValidationReport> {
    let Some(en) = translations.get(primary_locale) else {
        bail!("Source dictionary '{}' not found", primary_locale);
    };

    let languages = translations
        .iter()
        .filter(|(locale, _)| locale.as_str() != primary_locale)
        .map(|(locale, dict)| check_language(locale, en, dict))
        .collect();

    Ok(ValidationReport { languages })
}
