//! Per-language translation dictionaries.
//!
//! Each language is one JSON file (`<locale>.json`) mapping translation key
//! to localized text. English (`en.json` by default) is the source of truth.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result, bail};

/// A single language's key → text mapping. `BTreeMap` keeps keys sorted so
/// saved files and generated output are deterministic.
pub type LanguageDictionary = BTreeMap<String, String>;

/// All loaded dictionaries, keyed by language code.
pub type TranslationSet = BTreeMap<String, LanguageDictionary>;

#[derive(Debug, Default)]
pub struct LoadAllResult {
    pub translations: TranslationSet,
    /// Per-file parse failures. The offending file is skipped, not fatal.
    pub warnings: Vec<String>,
}

/// Extracts the locale code from a dictionary file name.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "fr_FR.json" -> Some("fr_FR")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

pub fn load_dictionary(path: &Path) -> Result<LanguageDictionary> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dictionary file: {:?}", path))?;
    let dict: LanguageDictionary = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse dictionary file: {:?}", path))?;
    Ok(dict)
}

/// Load every `*.json` dictionary in the translations directory.
///
/// Files that fail to parse are recorded as warnings and skipped.
pub fn load_all(translations_dir: &Path) -> Result<LoadAllResult> {
    if !translations_dir.exists() {
        bail!(
            "Translations directory '{}' does not exist.\n\
             Hint: Check your .lingorc.json 'translationsDir' setting.",
            translations_dir.display()
        );
    }

    if !translations_dir.is_dir() {
        bail!("'{}' is not a directory.", translations_dir.display());
    }

    let mut result = LoadAllResult::default();

    for entry in fs::read_dir(translations_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(locale) = extract_locale(&path)
        {
            match load_dictionary(&path) {
                Ok(dict) => {
                    result.translations.insert(locale, dict);
                }
                Err(e) => {
                    result
                        .warnings
                        .push(format!("Failed to parse {:?}: {:#}", path, e));
                }
            }
        }
    }

    Ok(result)
}

/// Path of the rotating backup sibling for a file (`en.json` -> `en.json.bak`).
pub fn backup_path(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(".bak");
    path.with_file_name(name)
}

/// Save a dictionary: back up the existing file first (overwriting any prior
/// backup), then write keys in sorted order with 2-space indentation,
/// non-ASCII verbatim, and a single trailing newline.
///
/// The backup exists before the new content replaces the original, so a
/// failed write leaves the operator a copy to recover from.
pub fn save_dictionary(path: &Path, dict: &LanguageDictionary) -> Result<Option<std::path::PathBuf>> {
    let backup = if path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup)
            .with_context(|| format!("Failed to back up {:?} to {:?}", path, backup))?;
        Some(backup)
    } else {
        None
    };

    let mut content = serde_json::to_string_pretty(dict)
        .with_context(|| format!("Failed to serialize dictionary for {:?}", path))?;
    content.push('\n');

    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_extract_locale() {
        assert_eq!(extract_locale(Path::new("en.json")), Some("en".to_string()));
        assert_eq!(
            extract_locale(Path::new("fr_FR.json")),
            Some("fr_FR".to_string())
        );
        assert_eq!(
            extract_locale(Path::new("/path/to/translations/he.json")),
            Some("he".to_string())
        );
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.json");

        let mut dict = LanguageDictionary::new();
        dict.insert("username".to_string(), "Username".to_string());
        dict.insert("pressAnyKey".to_string(), "Press any key".to_string());
        dict.insert("promptUser".to_string(), "¿Quién eres?".to_string());

        save_dictionary(&path, &dict).unwrap();
        let loaded = load_dictionary(&path).unwrap();
        assert_eq!(loaded, dict);
    }

    #[test]
    fn test_save_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.json");

        let mut dict = LanguageDictionary::new();
        dict.insert("zeta".to_string(), "Z".to_string());
        dict.insert("alpha".to_string(), "Où?".to_string());

        save_dictionary(&path, &dict).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        // Sorted keys, 2-space indent, non-ASCII verbatim, trailing newline
        assert_eq!(content, "{\n  \"alpha\": \"Où?\",\n  \"zeta\": \"Z\"\n}\n");
    }

    #[test]
    fn test_save_creates_backup_of_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, "{\"old\": \"Old\"}").unwrap();

        let mut dict = LanguageDictionary::new();
        dict.insert("new".to_string(), "New".to_string());

        let backup = save_dictionary(&path, &dict).unwrap().unwrap();
        assert_eq!(backup, dir.path().join("en.json.bak"));
        assert!(fs::read_to_string(&backup).unwrap().contains("old"));
        assert!(fs::read_to_string(&path).unwrap().contains("new"));
    }

    #[test]
    fn test_save_no_backup_for_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.json");

        let dict = LanguageDictionary::new();
        let backup = save_dictionary(&path, &dict).unwrap();
        assert!(backup.is_none());
        assert!(!dir.path().join("en.json.bak").exists());
    }

    #[test]
    fn test_load_all() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"login": "Log in"}"#).unwrap();
        fs::write(dir.path().join("fr.json"), r#"{"login": "Connexion"}"#).unwrap();
        fs::write(dir.path().join("README.md"), "not json").unwrap();

        let result = load_all(dir.path()).unwrap();
        assert_eq!(result.translations.len(), 2);
        assert_eq!(result.translations["fr"]["login"], "Connexion");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_load_all_with_invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"login": "Log in"}"#).unwrap();
        fs::write(dir.path().join("he.json"), "{ invalid json }").unwrap();

        let result = load_all(dir.path()).unwrap();
        assert_eq!(result.translations.len(), 1);
        assert!(result.translations.contains_key("en"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("he.json"));
    }

    #[test]
    fn test_load_all_nonexistent_dir() {
        let result = load_all(Path::new("/nonexistent/translations"));
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("does not exist"));
        assert!(err.contains("translationsDir"));
    }

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("/a/en.json")),
            Path::new("/a/en.json.bak")
        );
        assert_eq!(
            backup_path(Path::new("/a/TranslationManager.qml")),
            Path::new("/a/TranslationManager.qml.bak")
        );
    }
}
