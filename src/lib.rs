//! Lingo - translation pipeline for QML login themes
//!
//! Lingo keeps a theme's translation strings synchronized: it scans QML
//! source for `TranslationManager.<key>` usage, merges newly discovered keys
//! into the English source-of-truth dictionary, pulls community translations
//! from Transifex, regenerates the QML module that embeds all translations,
//! and validates completeness across language files.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing and dispatch)
//! - `commands`: The extract and update pipelines
//! - `config`: Configuration file loading and parsing
//! - `dictionary`: Per-language JSON dictionary load/save
//! - `scanner`: QML source scanning for translation-key usage
//! - `merge`: New/unused key computation and merge into the English dictionary
//! - `remote`: Transifex CLI wrapper (probe and pull)
//! - `generator`: Generated QML module emission
//! - `interchange`: Legacy Qt `.ts` file emission
//! - `validator`: Cross-language consistency checks
//! - `report`: Colored console output helpers

pub mod cli;
pub mod commands;
pub mod config;
pub mod dictionary;
pub mod generator;
pub mod interchange;
pub mod merge;
pub mod remote;
pub mod report;
pub mod scanner;
pub mod validator;
