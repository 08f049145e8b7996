//! Build command - generates one landing page per niche

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use nichepage_core::Config;
use nichepage_generator::{RapidApiClient, SiteBuilder};

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    /// Niche list CSV.
    pub niches: Option<PathBuf>,
    /// Output directory.
    pub output: Option<PathBuf>,
    /// Template directory.
    pub template: Option<PathBuf>,
    /// Affiliate tag.
    pub tag: Option<String>,
    /// Search API key.
    pub api_key: Option<String>,
}

impl BuildOverrides {
    /// Apply the overrides to `config`.
    pub fn apply(self, config: &mut Config) {
        if let Some(niches) = self.niches {
            config.site.niches_file = niches.to_string_lossy().to_string();
        }
        if let Some(output) = self.output {
            config.site.output_dir = output.to_string_lossy().to_string();
        }
        if let Some(template) = self.template {
            config.site.template_dir = template.to_string_lossy().to_string();
        }
        if let Some(tag) = self.tag {
            config.affiliate.tag = Some(tag);
        }
        if let Some(api_key) = self.api_key {
            config.api.api_key = Some(api_key);
        }
    }
}

/// Run the build command.
///
/// Fails before touching the output directory when the API key is missing.
pub fn run(config_path: &Path, overrides: BuildOverrides) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, "Starting build");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    overrides.apply(&mut config);
    config.validate().wrap_err("Invalid configuration")?;
    if config.affiliate.tag().is_empty() {
        tracing::warn!("no affiliate tag configured, product links will not be tagged");
    }

    let client = RapidApiClient::new(&config.api).wrap_err("Failed to set up product search")?;
    let output = PathBuf::from(&config.site.output_dir);
    let builder = SiteBuilder::new(config, client);

    let niches = builder.niches().wrap_err("Failed to read niche list")?;
    if niches.is_empty() {
        tracing::warn!("niche list is empty, nothing to build");
    }

    let stats = builder.build(&niches).wrap_err("Build failed")?;

    let duration = start.elapsed();

    // Print build statistics
    println!();
    println!("  Build completed!");
    println!();
    println!("  Niches:   {}", stats.niches);
    println!("  Pages:    {}", stats.pages);
    println!("  Products: {}", stats.products);
    println!("  Empty:    {}", stats.empty);
    println!("  Skipped:  {}", stats.skipped);
    println!("  Failed:   {}", stats.failed);
    println!("  Assets:   {}", stats.assets);
    println!();
    println!("  Duration: {:.2}s", duration.as_secs_f64());
    println!("  Output:   {}", output.display());
    println!();

    tracing::info!(?stats, ?duration, "Build finished");

    Ok(())
}
