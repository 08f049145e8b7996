//! Init command - write a starter template and niche list

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr, bail};
use nichepage_generator::template::{DEFAULT_INDEX_TEMPLATE, DEFAULT_STYLESHEET};

const SAMPLE_NICHES: &str = "niche\nyoga mats\nfitness trackers\nstanding desks\n";

const SAMPLE_CONFIG: &str = r#"[site]
template_dir = "site_template"
output_dir = "dist"
niches_file = "niches.csv"

[api]
host = "amazon24.p.rapidapi.com"
path = "/api/product"
country = "US"

# Secrets come from the environment:
#   RAPIDAPI_KEY      product search API key
#   AMAZON_ASSOC_TAG  affiliate tag
"#;

/// Run the init command.
///
/// Refuses to overwrite existing files unless `force` is set.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    tracing::info!(?dir, force, "Initializing project");

    let files = [
        (dir.join("site_template").join("index.html"), DEFAULT_INDEX_TEMPLATE),
        (dir.join("site_template").join("style.css"), DEFAULT_STYLESHEET),
        (dir.join("niches.csv"), SAMPLE_NICHES),
        (dir.join("nichepage.toml"), SAMPLE_CONFIG),
    ];

    if !force {
        if let Some((existing, _)) = files.iter().find(|(path, _)| path.exists()) {
            bail!(
                "{} already exists (use --force to overwrite)",
                existing.display()
            );
        }
    }

    for (path, content) in &files {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
        }
        fs::write(path, content).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        println!("Created: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_starter_files() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), false).unwrap();

        let template = fs::read_to_string(dir.path().join("site_template/index.html")).unwrap();
        assert!(template.contains("{{PRODUCT_CARDS}}"));
        assert!(dir.path().join("site_template/style.css").exists());
        assert!(dir.path().join("nichepage.toml").exists());

        let niches =
            nichepage_generator::read_niches(&dir.path().join("niches.csv")).unwrap();
        assert_eq!(niches.len(), 3);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("niches.csv"), "niche\nmine\n").unwrap();

        assert!(run(dir.path(), false).is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("niches.csv")).unwrap(),
            "niche\nmine\n"
        );

        run(dir.path(), true).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("niches.csv")).unwrap(),
            SAMPLE_NICHES
        );
    }

    #[test]
    fn test_sample_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), false).unwrap();
        let config = nichepage_core::Config::load(&dir.path().join("nichepage.toml")).unwrap();
        assert_eq!(config.site.niches_file, "niches.csv");
    }
}
