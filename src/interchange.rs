//! Legacy Qt `.ts` interchange files.
//!
//! One XML document per non-English language, pairing every English source
//! string with its translation (or an `unfinished` marker) for conventional
//! Qt localization tooling. Fully derived, regenerated wholesale.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result, bail};

use crate::dictionary::{LanguageDictionary, TranslationSet};

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Build the `.ts` document for one language.
///
/// Entries follow the English dictionary in sorted key order; keys the
/// language has not translated get `<translation type="unfinished"/>`.
pub fn generate_ts(
    lang_code: &str,
    en: &LanguageDictionary,
    translated: &LanguageDictionary,
) -> String {
    let mut lines = vec![
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>".to_string(),
        "<!DOCTYPE TS>".to_string(),
        format!("<TS version=\"2.1\" language=\"{}\">", lang_code),
        "<context>".to_string(),
        "    <name>TranslationManager</name>".to_string(),
    ];

    for (key, source_text) in en {
        lines.push("    <message>".to_string());
        lines.push(
            "      <location filename=\"../components/TranslationManager.qml\" line=\"0\"/>"
                .to_string(),
        );
        lines.push(format!("      <source>{}</source>", escape_xml(source_text)));

        match translated.get(key).filter(|value| !value.is_empty()) {
            Some(value) => lines.push(format!(
                "      <translation>{}</translation>",
                escape_xml(value)
            )),
            None => lines.push("      <translation type=\"unfinished\"/>".to_string()),
        }

        lines.push(format!("      <comment>Key: {}</comment>", key));
        lines.push("    </message>".to_string());
    }

    lines.push("  </context>".to_string());
    lines.push("</TS>".to_string());
    lines.join("\n")
}

/// Write `theme_<code>.ts` for every non-English language.
///
/// Returns the paths written. The English dictionary must be present.
pub fn write_ts_files(
    translations_dir: &Path,
    translations: &TranslationSet,
    primary_locale: &str,
) -> Result<Vec<PathBuf>> {
    let Some(en) = translations.get(primary_locale) else {
        bail!("Source dictionary '{}' not found", primary_locale);
    };

    let mut written = Vec::new();
    for (lang_code, translated) in translations {
        if lang_code == primary_locale {
            continue;
        }

        let path = translations_dir.join(format!("theme_{}.ts", lang_code));
        let content = generate_ts(lang_code, en, translated);
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        written.push(path);
    }

    Ok(written)
}
