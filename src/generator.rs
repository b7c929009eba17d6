//! Generated QML module emission.
//!
//! SDDM cannot load external translation files at runtime, so every
//! language's dictionary is embedded directly in one QML singleton and
//! selected via `Qt.locale().name`. The file is fully derived: regenerated
//! wholesale on every update run, never hand-patched.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result, bail};

use crate::{
    config::Category,
    dictionary::{LanguageDictionary, TranslationSet, backup_path},
};

/// Escape a translation value for embedding in a QML double-quoted string.
fn escape_qml(value: &str) -> String {
    value.replace('"', "\\\"").replace('\n', "\\n")
}

/// Split the English key set into the configured category blocks plus an
/// implicit "Other strings" bucket for everything uncategorized.
///
/// Category keys missing from the English dictionary are dropped; key order
/// within a named category follows the configuration.
pub fn categorize<'a>(
    en: &'a LanguageDictionary,
    categories: &'a [Category],
) -> Vec<(String, Vec<&'a str>)> {
    let mut blocks: Vec<(String, Vec<&str>)> = Vec::new();
    let mut categorized: Vec<&str> = Vec::new();

    for category in categories {
        let keys: Vec<&str> = category
            .keys
            .iter()
            .filter(|key| en.contains_key(*key))
            .map(|key| key.as_str())
            .collect();
        categorized.extend(category.keys.iter().map(|k| k.as_str()));
        if !keys.is_empty() {
            blocks.push((category.name.clone(), keys));
        }
    }

    let other: Vec<&str> = en
        .keys()
        .map(|k| k.as_str())
        .filter(|key| !categorized.contains(key))
        .collect();
    if !other.is_empty() {
        blocks.push(("Other strings".to_string(), other));
    }

    blocks
}

/// Generate the QML singleton embedding all translations.
///
/// Output is fully deterministic: languages and keys are emitted in
/// lexicographic order. The primary (English) dictionary must be present.
pub fn generate_qml(
    translations: &TranslationSet,
    categories: &[Category],
    primary_locale: &str,
) -> Result<String> {
    let Some(en) = translations.get(primary_locale) else {
        bail!("Source dictionary '{}' not found", primary_locale);
    };

    let mut out = String::new();
    let mut line = |s: &str| {
        out.push_str(s);
        out.push('\n');
    };

    line("pragma Singleton");
    line("");
    line("import QtQuick");
    line("");
    line("QtObject {");
    line("    id: translationManager");
    line("");
    line("    // Embedded translations for SDDM");
    line("    // SDDM cannot load external .qm files, so all translations live here");
    line("    // and are selected by Qt.locale().name at runtime");
    line("");
    line("    readonly property string currentLocale: Qt.locale().name");
    line("");
    line("    readonly property var translations: ({");
    // BTreeMap iteration keeps both levels lexicographic.
    for (lang_code, dict) in translations {
        line(&format!("        '{}': {{", lang_code));
        for (key, value) in dict {
            line(&format!("            '{}': \"{}\",", key, escape_qml(value)));
        }
        line("        },");
    }
    line("    })");
    line("");
    line("    // Get translation for current locale, fallback to English");
    line("    function tr(key) {");
    line("        // Try full locale (e.g., 'es_ES')");
    line("        if (translations[currentLocale] && translations[currentLocale][key]) {");
    line("            return translations[currentLocale][key]");
    line("        }");
    line("");
    line("        // Try language code only (e.g., 'es' from 'es_ES')");
    line("        var langCode = currentLocale.split('_')[0]");
    line("        if (translations[langCode] && translations[langCode][key]) {");
    line("            return translations[langCode][key]");
    line("        }");
    line("");
    line(&format!(
        "        // Fallback to {}",
        primary_locale
    ));
    line(&format!(
        "        if (translations['{}'] && translations['{}'][key]) {{",
        primary_locale, primary_locale
    ));
    line(&format!(
        "            return translations['{}'][key]",
        primary_locale
    ));
    line("        }");
    line("");
    line("        // Last resort: return key itself");
    line("        return key");
    line("    }");
    line("");

    for (name, keys) in categorize(en, categories) {
        line(&format!("    // {}", name));
        for key in keys {
            line(&format!(
                "    readonly property string {}: tr('{}')",
                key, key
            ));
        }
        line("");
    }

    line("    // Parameterized strings");
    line("    function selectUserNamed(name) {");
    line("        return tr('selectUserNamed').replace('%1', name).replace('{name}', name)");
    line("    }");
    out.push_str("}\n");

    Ok(out)
}

/// Write the generated module, rotating any existing file to a `.bak`
/// sibling first.
pub fn write_generated(path: &Path, content: &str) -> Result<Option<PathBuf>> {
    let backup = if path.exists() {
        let backup = backup_path(path);
        fs::copy(path, &backup)
            .with_context(|| format!("Failed to back up {:?} to {:?}", path, backup))?;
        Some(backup)
    } else {
        None
    };

    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config_json;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn dict(entries: &[(&str, &str)]) -> LanguageDictionary {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_translations() -> TranslationSet {
        let mut set = TranslationSet::new();
        set.insert(
            "en".to_string(),
            dict(&[
                ("username", "Username"),
                ("password", "Password"),
                ("suspend", "Suspend"),
                ("selectUserNamed", "Select {name}"),
            ]),
        );
        set.insert(
            "fr".to_string(),
            dict(&[("username", "Nom d'utilisateur"), ("password", "Mot de passe")]),
        );
        set
    }

    fn default_categories() -> Vec<Category> {
        let json = default_config_json().unwrap();
        let config: crate::config::Config = serde_json::from_str(&json).unwrap();
        config.categories
    }

    #[test]
    fn test_missing_english_is_fatal() {
        let mut set = sample_translations();
        set.remove("en");
        let result = generate_qml(&set, &default_categories(), "en");
        assert!(result.is_err());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let set = sample_translations();
        let categories = default_categories();
        let first = generate_qml(&set, &categories, "en").unwrap();
        let second = generate_qml(&set, &categories, "en").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_languages_and_keys_are_sorted() {
        let set = sample_translations();
        let qml = generate_qml(&set, &default_categories(), "en").unwrap();

        let en_pos = qml.find("'en': {").unwrap();
        let fr_pos = qml.find("'fr': {").unwrap();
        assert!(en_pos < fr_pos);

        let password_pos = qml.find("'password': \"Password\"").unwrap();
        let username_pos = qml.find("'username': \"Username\"").unwrap();
        assert!(password_pos < username_pos);
    }

    #[test]
    fn test_escaping() {
        let mut set = TranslationSet::new();
        set.insert(
            "en".to_string(),
            dict(&[("quote", "Say \"hi\"\nnow")]),
        );
        let qml = generate_qml(&set, &[], "en").unwrap();
        assert!(qml.contains(r#"'quote': "Say \"hi\"\nnow","#));
    }

    #[test]
    fn test_category_blocks_and_other_bucket() {
        let set = sample_translations();
        let qml = generate_qml(&set, &default_categories(), "en").unwrap();

        assert!(qml.contains("// Basic strings"));
        assert!(qml.contains("readonly property string username: tr('username')"));
        assert!(qml.contains("// Power menu"));
        assert!(qml.contains("readonly property string suspend: tr('suspend')"));
        // selectUserNamed is not in any named category
        assert!(qml.contains("// Other strings"));
        assert!(qml.contains("readonly property string selectUserNamed: tr('selectUserNamed')"));
        // Categories whose keys are absent from English are omitted entirely
        assert!(!qml.contains("// Error messages"));
    }

    #[test]
    fn test_fallback_chain_and_parameterized_accessor() {
        let set = sample_translations();
        let qml = generate_qml(&set, &default_categories(), "en").unwrap();

        assert!(qml.contains("function tr(key)"));
        assert!(qml.contains("currentLocale.split('_')[0]"));
        assert!(qml.contains("return key"));
        assert!(qml.contains(
            "return tr('selectUserNamed').replace('%1', name).replace('{name}', name)"
        ));
    }

    #[test]
    fn test_write_generated_rotates_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("TranslationManager.qml");

        write_generated(&path, "first\n").unwrap();
        assert!(!backup_path(&path).exists());

        let backup = write_generated(&path, "second\n").unwrap().unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), "first\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn test_categorize_preserves_category_order() {
        let en = dict(&[("b", "B"), ("a", "A"), ("z", "Z")]);
        let categories = vec![Category {
            name: "First".to_string(),
            keys: vec!["b".to_string(), "a".to_string(), "missing".to_string()],
        }];

        let blocks = categorize(&en, &categories);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].0, "First");
        assert_eq!(blocks[0].1, vec!["b", "a"]);
        assert_eq!(blocks[1].0, "Other strings");
        assert_eq!(blocks[1].1, vec!["z"]);
    }
}
