//! Command implementations for the CLI surface.
//!
//! `extract` and `update` are the two pipelines; they share the translation
//! directory as their persistence layer but are never run concurrently
//! against the same repository state.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    cli::{CommonArgs, ExitStatus},
    config::{CONFIG_FILE_NAME, default_config_json},
};

pub mod extract;
pub mod update;

/// Resolve the project root: explicit flag or the current directory.
pub(crate) fn resolve_project_root(common: &CommonArgs) -> Result<PathBuf> {
    match &common.project_root {
        Some(path) => Ok(path.clone()),
        None => env::current_dir().context("Failed to determine current directory"),
    }
}

/// Write a default `.lingorc.json`, refusing to overwrite an existing one.
pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    crate::report::success(&format!("Created {}", CONFIG_FILE_NAME));
    Ok(ExitStatus::Success)
}
