//! Merge engine: compares scanned keys against the English dictionary and
//! derives suggested display values for new keys.
//!
//! Unused keys are only flagged, never removed; they might be referenced
//! from commented-out code.

use std::{io::BufRead, sync::LazyLock};

use anyhow::{Context, Result};
use regex::Regex;

use crate::{dictionary::LanguageDictionary, scanner::UsageMap};

/// How the extract pipeline applies new keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Report only, no mutation.
    DryRun,
    /// Accept every suggested value without prompting.
    Auto,
    /// Prompt for each new key; empty input accepts the suggestion.
    Interactive,
}

/// Outcome of comparing scanned keys with the existing dictionary.
/// `new_keys` and `unused_keys` are sorted and disjoint by construction.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergePlan {
    /// Scanned in QML but absent from the dictionary.
    pub new_keys: Vec<String>,
    /// Present in the dictionary but never scanned.
    pub unused_keys: Vec<String>,
}

pub fn plan(scanned: &UsageMap, existing: &LanguageDictionary) -> MergePlan {
    let new_keys = scanned
        .keys()
        .filter(|key| !existing.contains_key(*key))
        .cloned()
        .collect();
    let unused_keys = existing
        .keys()
        .filter(|key| !scanned.contains_key(*key))
        .cloned()
        .collect();

    MergePlan {
        new_keys,
        unused_keys,
    }
}

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("camel boundary regex"));

/// Derive a human-readable default value from a camel-case key.
///
/// ```
/// use lingo::merge::suggest_value;
///
/// assert_eq!(suggest_value("pressAnyKey"), "Press any key");
/// assert_eq!(suggest_value("noKeyboardLayoutsConfigured"), "No keyboard layouts configured");
/// assert_eq!(suggest_value("username"), "Username");
/// ```
pub fn suggest_value(key: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(key, "$1 $2").to_lowercase();

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Read one value from the operator. Empty input means "use the suggestion";
/// anything else is taken literally.
pub fn read_value(suggested: &str, input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read from input")?;

    let response = line.trim();
    if response.is_empty() {
        Ok(suggested.to_string())
    } else {
        Ok(response.to_string())
    }
}
