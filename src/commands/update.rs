//! The update pipeline: pull translations, validate them, and regenerate
//! the embedded QML module and legacy `.ts` files.

use anyhow::{Result, bail};

use crate::{
    cli::{ExitStatus, UpdateArgs},
    config::load_config,
    dictionary, generator, interchange, remote, report, validator,
};

pub fn run(args: UpdateArgs) -> Result<ExitStatus> {
    let project_root = super::resolve_project_root(&args.common)?;
    let config = load_config(&project_root)?.config;

    report::banner("Theme Translation Manager");

    let en_path = config.primary_dictionary_path(&project_root);

    // The Transifex probe only matters when we are going to pull.
    let client = remote::RemoteClient::new(&config.transifex_cli, &project_root);
    if !args.no_pull {
        client.validate_environment()?;
    }
    if !en_path.exists() {
        bail!(
            "Source file not found: {}\n\
             Hint: Run 'lingo extract' first to create the English dictionary.",
            en_path.display()
        );
    }

    if args.validate_only {
        return validate_only(&config, &project_root);
    }

    if !args.no_pull {
        report::info("Pulling translations from Transifex...");
        client.pull(config.minimum_completion)?;
        report::success("Translations pulled successfully");
    }

    let translations_dir = config.translations_path(&project_root);
    let loaded = dictionary::load_all(&translations_dir)?;
    for warning in &loaded.warnings {
        report::warning(warning);
    }
    if !loaded.translations.contains_key(&config.primary_locale) {
        bail!(
            "Source dictionary '{}' not found in {}",
            config.primary_locale,
            translations_dir.display()
        );
    }

    report::info("Validating translations...");
    let validation = validator::validate(&loaded.translations, &config.primary_locale)?;
    report::print_validation_report(&validation);
    if !validation.is_valid() || validation.error_count() > 0 {
        report::warning("Validation found issues, but continuing...");
    }

    report::info("Updating the generated QML module...");
    let qml = generator::generate_qml(
        &loaded.translations,
        &config.categories,
        &config.primary_locale,
    )?;
    let module_path = config.generated_module_path(&project_root);
    if let Some(backup) = generator::write_generated(&module_path, &qml)? {
        report::success(&format!(
            "Backup created: {}",
            backup.file_name().unwrap_or_default().to_string_lossy()
        ));
    }
    let languages: Vec<&str> = loaded.translations.keys().map(String::as_str).collect();
    report::success(&format!(
        "{} updated with {} languages: {}",
        config.generated_file,
        languages.len(),
        languages.join(", ")
    ));

    report::info("Generating .ts files...");
    let written = interchange::write_ts_files(
        &translations_dir,
        &loaded.translations,
        &config.primary_locale,
    )?;
    for path in &written {
        report::success(&format!(
            "Generated {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
    }

    println!();
    report::success("Translation update complete!");
    println!();
    report::info("Next steps:");
    println!("  1. Review changes in {}", config.generated_file);
    println!("  2. Commit the updated files");
    println!("  3. Test the theme with different locales");

    Ok(ExitStatus::Success)
}

/// Standalone validation: the one path where data-integrity findings change
/// the exit code. Missing keys or empty values anywhere, or any placeholder
/// mismatch, fail the run.
fn validate_only(
    config: &crate::config::Config,
    project_root: &std::path::Path,
) -> Result<ExitStatus> {
    let translations_dir = config.translations_path(project_root);
    let loaded = dictionary::load_all(&translations_dir)?;
    for warning in &loaded.warnings {
        report::warning(warning);
    }

    report::info("Validating translations...");
    let validation = validator::validate(&loaded.translations, &config.primary_locale)?;
    report::print_validation_report(&validation);

    if validation.is_valid() && validation.error_count() == 0 {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
