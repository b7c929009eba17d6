//! The extract pipeline: scan QML for key usage and merge new keys into the
//! English dictionary.

use std::io::{self, BufRead};

use anyhow::{Result, bail};
use colored::Colorize;

use crate::{
    cli::{ExtractArgs, ExitStatus},
    config::load_config,
    dictionary::{self, LanguageDictionary},
    merge::{self, MergeMode},
    report,
    scanner::{ScanResult, Scanner},
};

pub fn run(args: ExtractArgs) -> Result<ExitStatus> {
    let project_root = super::resolve_project_root(&args.common)?;
    let config = load_config(&project_root)?.config;

    let mode = if args.dry_run {
        MergeMode::DryRun
    } else if args.auto {
        MergeMode::Auto
    } else {
        MergeMode::Interactive
    };

    report::banner("QML String Extractor - Find new translation strings");

    let theme_dir = config.theme_path(&project_root);
    if !theme_dir.is_dir() {
        bail!(
            "Theme directory '{}' not found.\n\
             Hint: Run from the project root or pass --project-root.",
            theme_dir.display()
        );
    }

    let scanner = Scanner::new(
        &config.key_prefix,
        &config.source_extension,
        &config.generated_file,
    )?;
    let scan = scanner.scan(&theme_dir);

    for warning in &scan.warnings {
        report::warning(warning);
    }
    report::info(&format!("Scanned {} QML files", scan.files_scanned));

    if scan.usages.is_empty() {
        report::warning(&format!(
            "No {} strings found in QML files",
            config.key_prefix
        ));
        return Ok(ExitStatus::Success);
    }
    report::success(&format!(
        "Found {} unique string keys in QML files",
        scan.usages.len()
    ));

    let en_path = config.primary_dictionary_path(&project_root);
    let existing = load_existing(&en_path);

    let plan = merge::plan(&scan.usages, &existing);

    println!();
    report::banner("Analysis Results");
    report_findings(&plan, &scan, &existing);

    if mode == MergeMode::DryRun {
        println!();
        report::info("Dry run complete - no changes made");
        return Ok(ExitStatus::Success);
    }

    if plan.new_keys.is_empty() {
        return Ok(ExitStatus::Success);
    }

    println!();
    report::banner("Merging New Strings");

    let mut updated = existing;
    match mode {
        MergeMode::Auto => {
            for key in &plan.new_keys {
                let suggested = merge::suggest_value(key);
                println!("  + {}: \"{}\"", key, suggested);
                updated.insert(key.clone(), suggested);
            }
        }
        MergeMode::Interactive => {
            let stdin = io::stdin();
            merge_interactive(&plan.new_keys, &scan, &mut updated, &mut stdin.lock())?;
        }
        MergeMode::DryRun => unreachable!("dry-run returns before merging"),
    }

    println!();
    if let Some(backup) = dictionary::save_dictionary(&en_path, &updated)? {
        report::success(&format!(
            "Backup created: {}",
            backup.file_name().unwrap_or_default().to_string_lossy()
        ));
    }
    report::success(&format!(
        "Saved {} strings to {}",
        updated.len(),
        en_path.file_name().unwrap_or_default().to_string_lossy()
    ));

    println!();
    report::success("String extraction and merge complete!");
    println!();
    report::info("Next steps:");
    println!("  1. Review the updated dictionary file");
    println!("  2. Push source to Transifex: tx push -s");
    println!("  3. Regenerate the QML module: lingo update --no-pull");

    Ok(ExitStatus::Success)
}

/// Load the English dictionary, tolerating absence and parse failures.
/// Either case is a warning and the dictionary is treated as empty.
fn load_existing(en_path: &std::path::Path) -> LanguageDictionary {
    if !en_path.exists() {
        report::warning(&format!("{} not found", en_path.display()));
        return LanguageDictionary::new();
    }

    match dictionary::load_dictionary(en_path) {
        Ok(dict) => {
            report::success(&format!("Loaded {} existing strings", dict.len()));
            dict
        }
        Err(e) => {
            report::error(&format!("Failed to parse {}: {:#}", en_path.display(), e));
            LanguageDictionary::new()
        }
    }
}

fn report_findings(plan: &merge::MergePlan, scan: &ScanResult, existing: &LanguageDictionary) {
    if plan.new_keys.is_empty() {
        report::success("No new strings found - dictionary is up to date!");
    } else {
        println!(
            "{}",
            format!("Found {} NEW strings to add:", plan.new_keys.len()).green()
        );
        for key in &plan.new_keys {
            println!("\n  {}", key);
            println!(
                "    {}",
                format!("Suggested: \"{}\"", merge::suggest_value(key)).yellow()
            );
            if let Some(locations) = scan.usages.get(key) {
                report::print_usage_locations(locations);
            }
        }
    }

    if !plan.unused_keys.is_empty() {
        println!();
        println!(
            "{}",
            format!(
                "Found {} UNUSED strings (in the dictionary but not in QML):",
                plan.unused_keys.len()
            )
            .yellow()
        );
        for key in &plan.unused_keys {
            let value = existing.get(key).map(String::as_str).unwrap_or_default();
            println!("  - {}: \"{}\"", key, value);
        }
        println!();
        report::warning("These strings might be obsolete or used in commented code");
    }
}

/// Prompt for each new key in sorted order. Empty input accepts the
/// suggestion; anything else is taken literally.
fn merge_interactive(
    new_keys: &[String],
    scan: &ScanResult,
    updated: &mut LanguageDictionary,
    input: &mut impl BufRead,
) -> Result<()> {
    for (index, key) in new_keys.iter().enumerate() {
        let suggested = merge::suggest_value(key);
        println!("\n[{}/{}] Key: {}", index + 1, new_keys.len(), key);
        println!("{}", format!("Suggested: \"{}\"", suggested).yellow());
        if let Some(locations) = scan.usages.get(key) {
            report::print_usage_locations(locations);
        }

        println!("\nEnter value (or press Enter to use suggestion): ");
        let value = merge::read_value(&suggested, input)?;
        report::success(&format!("Using: \"{}\"", value));
        updated.insert(key.clone(), value);
    }
    Ok(())
}
