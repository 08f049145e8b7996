//! Check command - validate configuration, template and niche list

use std::{fs, path::Path};

use color_eyre::eyre::{Result, bail};
use nichepage_core::Config;
use nichepage_generator::{AssetCopier, Template, read_niches, slugify};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    if !config_path.exists() {
        result.add_warning(format!(
            "{} not found, using defaults",
            config_path.display()
        ));
    }
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            bail!("Configuration error: {e}");
        }
    };

    println!("\nChecking template...");
    check_template(&config, &mut result);

    println!("\nChecking niche list...");
    check_niches(&config, &mut result);

    println!("\nChecking credentials...");
    check_credentials(&config, &mut result);

    // Print summary
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn check_template(config: &Config, result: &mut ValidationResult) {
    let path = config.template_path();
    let source = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            result.add_error(format!("Cannot read template {}: {e}", path.display()));
            return;
        }
    };

    for token in Template::new(source).missing_placeholders() {
        result.add_warning(format!(
            "Template {} has no {{{{{token}}}}} placeholder",
            path.display()
        ));
    }

    match AssetCopier::new(&config.site.template_dir, &config.site.template_file).list() {
        Ok(assets) => println!("  ✓ Template found with {} asset(s)", assets.len()),
        Err(e) => result.add_error(format!("Cannot list template assets: {e}")),
    }
}

fn check_niches(config: &Config, result: &mut ValidationResult) {
    let niches = match read_niches(Path::new(&config.site.niches_file)) {
        Ok(n) => n,
        Err(e) => {
            result.add_error(format!(
                "Cannot read niche list {}: {e}",
                config.site.niches_file
            ));
            return;
        }
    };

    if niches.is_empty() {
        result.add_warning("Niche list is empty");
        return;
    }

    let mut seen = std::collections::HashMap::new();
    for niche in &niches {
        let slug = slugify(niche);
        if slug.is_empty() {
            result.add_warning(format!("Niche '{niche}' has an empty slug and will be skipped"));
        } else if let Some(previous) = seen.insert(slug.clone(), niche.clone()) {
            result.add_warning(format!(
                "Niches '{previous}' and '{niche}' share the output directory '{slug}'"
            ));
        }
    }

    println!("  ✓ {} niche(s) listed", niches.len());
}

fn check_credentials(config: &Config, result: &mut ValidationResult) {
    let has_key = config
        .api
        .api_key
        .as_deref()
        .is_some_and(|k| !k.trim().is_empty())
        || std::env::var("RAPIDAPI_KEY").is_ok_and(|k| !k.trim().is_empty());
    if !has_key {
        result.add_warning("No API key configured (set RAPIDAPI_KEY); build will fail");
    }

    let has_tag = !config.affiliate.tag().is_empty()
        || std::env::var("AMAZON_ASSOC_TAG").is_ok_and(|t| !t.trim().is_empty());
    if !has_tag {
        result.add_warning("No affiliate tag configured (set AMAZON_ASSOC_TAG)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.site.template_dir = dir.join("site_template").to_string_lossy().to_string();
        config.site.niches_file = dir.join("niches.csv").to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_check_template_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = ValidationResult::default();

        check_template(&config_in(dir.path()), &mut result);

        assert!(result.has_errors());
    }

    #[test]
    fn test_check_template_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("site_template")).unwrap();
        fs::write(
            dir.path().join("site_template/index.html"),
            "<h1>{{H1}}</h1>{{PRODUCT_CARDS}}",
        )
        .unwrap();
        let mut result = ValidationResult::default();

        check_template(&config_in(dir.path()), &mut result);

        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("{{TITLE}}"));
    }

    #[test]
    fn test_check_niches_duplicates_and_empty_slugs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("niches.csv"),
            "niche\nYoga Mats\nyoga  mats\n???\n",
        )
        .unwrap();
        let mut result = ValidationResult::default();

        check_niches(&config_in(dir.path()), &mut result);

        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_check_niches_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = ValidationResult::default();

        check_niches(&config_in(dir.path()), &mut result);

        assert!(result.has_errors());
    }
}
