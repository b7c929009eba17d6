use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

/// An editorial grouping of translation keys, used to organize the
/// generated QML module. Keys not listed in any category end up in an
/// implicit "Other strings" block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub name: String,
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Theme root directory, relative to the project root.
    #[serde(default = "default_theme_dir")]
    pub theme_dir: String,
    /// Translations directory, relative to the theme directory.
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
    /// Components directory, relative to the theme directory.
    #[serde(default = "default_components_dir")]
    pub components_dir: String,
    /// File name of the generated QML module inside the components directory.
    /// This file (and its backups) is excluded from scanning.
    #[serde(default = "default_generated_file")]
    pub generated_file: String,
    /// Namespace prefix scanned for in QML source (`<prefix>.<key>`).
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Extension of UI source files to scan.
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
    /// The source-of-truth language code.
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    /// Executable name of the Transifex CLI.
    #[serde(default = "default_transifex_cli")]
    pub transifex_cli: String,
    /// Minimum completion percentage requested when pulling translations.
    #[serde(default = "default_minimum_completion")]
    pub minimum_completion: u8,
    /// Editorial key groupings for the generated module.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

fn default_theme_dir() -> String {
    "sddm-theme".to_string()
}

fn default_translations_dir() -> String {
    "translations".to_string()
}

fn default_components_dir() -> String {
    "components".to_string()
}

fn default_generated_file() -> String {
    "TranslationManager.qml".to_string()
}

fn default_key_prefix() -> String {
    "TranslationManager".to_string()
}

fn default_source_extension() -> String {
    "qml".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_transifex_cli() -> String {
    "tx".to_string()
}

fn default_minimum_completion() -> u8 {
    30
}

fn default_categories() -> Vec<Category> {
    let groups: &[(&str, &[&str])] = &[
        (
            "Basic strings",
            &[
                "pressAnyKey",
                "username",
                "password",
                "login",
                "loggingIn",
                "loginFailed",
                "promptUser",
                "capslockWarning",
            ],
        ),
        ("Power menu", &["suspend", "reboot", "shutdown"]),
        (
            "Tooltips and UI",
            &[
                "changeSession",
                "changeKeyboardLayout",
                "toggleVirtualKeyboard",
                "powerOptions",
                "closeUserSelection",
                "selectUser",
            ],
        ),
        (
            "Error messages",
            &["noKeyboardLayoutsConfigured", "noUsersFound"],
        ),
    ];

    groups
        .iter()
        .map(|(name, keys)| Category {
            name: name.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_dir: default_theme_dir(),
            translations_dir: default_translations_dir(),
            components_dir: default_components_dir(),
            generated_file: default_generated_file(),
            key_prefix: default_key_prefix(),
            source_extension: default_source_extension(),
            primary_locale: default_primary_locale(),
            transifex_cli: default_transifex_cli(),
            minimum_completion: default_minimum_completion(),
            categories: default_categories(),
        }
    }
}

impl Config {
    /// Absolute path of the theme directory under the given project root.
    pub fn theme_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.theme_dir)
    }

    /// Absolute path of the translations directory.
    pub fn translations_path(&self, project_root: &Path) -> PathBuf {
        self.theme_path(project_root).join(&self.translations_dir)
    }

    /// Absolute path of the primary-locale dictionary file.
    pub fn primary_dictionary_path(&self, project_root: &Path) -> PathBuf {
        self.translations_path(project_root)
            .join(format!("{}.json", self.primary_locale))
    }

    /// Absolute path of the generated QML module.
    pub fn generated_module_path(&self, project_root: &Path) -> PathBuf {
        self.theme_path(project_root)
            .join(&self.components_dir)
            .join(&self.generated_file)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
