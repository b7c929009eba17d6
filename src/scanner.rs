//! QML source scanning for translation-key usage.
//!
//! Finds every `<prefix>.<identifier>` reference in the theme's QML files,
//! recording where each key is used. Read-only; unreadable files are
//! reported as warnings and skipped.

use std::{collections::BTreeMap, fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use walkdir::WalkDir;

/// Where a key appears in UI source: 1-based line number and the trimmed
/// line text. Informational only, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageLocation {
    pub line: usize,
    pub text: String,
}

/// key -> file name -> ordered usage locations.
pub type UsageMap = BTreeMap<String, BTreeMap<String, Vec<UsageLocation>>>;

#[derive(Debug, Default)]
pub struct ScanResult {
    pub usages: UsageMap,
    pub files_scanned: usize,
    pub warnings: Vec<String>,
}

impl ScanResult {
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.usages.keys()
    }
}

pub struct Scanner {
    pattern: Regex,
    source_extension: String,
    /// File names excluded from scanning (the generated module itself).
    excluded: Vec<String>,
}

impl Scanner {
    pub fn new(key_prefix: &str, source_extension: &str, generated_file: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"{}\.([A-Za-z_][A-Za-z0-9_]*)",
            regex::escape(key_prefix)
        ))
        .with_context(|| format!("Invalid key prefix: {:?}", key_prefix))?;

        Ok(Self {
            pattern,
            source_extension: source_extension.to_string(),
            excluded: vec![
                generated_file.to_string(),
                format!("{}.bak", generated_file),
            ],
        })
    }

    /// Recursively enumerate source files under the theme directory,
    /// excluding the generated module and its backups. Directories that
    /// cannot be listed contribute a warning instead of failing the walk.
    fn enumerate(&self, theme_dir: &Path) -> (Vec<PathBuf>, Vec<String>) {
        let mut files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(theme_dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .unwrap_or(theme_dir)
                        .display()
                        .to_string();
                    warnings.push(format!("Error listing {}: {}", path, e));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.source_extension.as_str()) {
                continue;
            }
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            if self.excluded.iter().any(|ex| ex == name) {
                continue;
            }
            files.push(path);
        }

        files.sort();
        (files, warnings)
    }

    pub fn find_source_files(&self, theme_dir: &Path) -> Vec<PathBuf> {
        self.enumerate(theme_dir).0
    }

    /// Extract key references from one file.
    ///
    /// Lines whose trimmed form starts with `//` are skipped as comments.
    pub fn scan_file(&self, path: &Path) -> Result<BTreeMap<String, Vec<UsageLocation>>> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        let mut usages: BTreeMap<String, Vec<UsageLocation>> = BTreeMap::new();
        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("//") {
                continue;
            }
            for captures in self.pattern.captures_iter(line) {
                let key = captures[1].to_string();
                usages.entry(key).or_default().push(UsageLocation {
                    line: index + 1,
                    text: trimmed.to_string(),
                });
            }
        }
        Ok(usages)
    }

    /// Scan every source file under the theme directory.
    ///
    /// A file that cannot be read contributes a warning instead of failing
    /// the scan.
    pub fn scan(&self, theme_dir: &Path) -> ScanResult {
        let (paths, warnings) = self.enumerate(theme_dir);
        let mut result = ScanResult {
            warnings,
            ..ScanResult::default()
        };

        for path in paths {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            match self.scan_file(&path) {
                Ok(file_usages) => {
                    result.files_scanned += 1;
                    for (key, locations) in file_usages {
                        result
                            .usages
                            .entry(key)
                            .or_default()
                            .entry(file_name.clone())
                            .or_default()
                            .extend(locations);
                    }
                }
                Err(e) => {
                    result
                        .warnings
                        .push(format!("Error reading {}: {:#}", file_name, e));
                }
            }
        }

        result
    }
}
