//! Build orchestration.
//!
//! Turns each niche into `<output_dir>/<slug>/` holding the filled template
//! and the template's assets. Niches are processed one after another.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use nichepage_core::{Config, CoreError, Product};

use crate::{
    assets::{AssetCopier, AssetError},
    cards::render_cards,
    fetch::ProductSource,
    niches::{NicheListError, read_niches},
    normalize::normalize,
    template::fill,
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Niche list error.
    #[error("niche list error: {0}")]
    Niches(#[from] NicheListError),

    /// Product snapshot serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template document could not be read.
    #[error("template not found: {0}")]
    TemplateNotFound(PathBuf),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] CoreError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of niches processed.
    pub niches: usize,

    /// Number of pages written.
    pub pages: usize,

    /// Total number of products rendered.
    pub products: usize,

    /// Pages written with the no-results placeholder.
    pub empty: usize,

    /// Niches that produced no page.
    pub skipped: usize,

    /// Niches whose output could not be written.
    pub failed: usize,

    /// Number of asset files copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Outcome of building a single niche.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NicheReport {
    /// Niche name as given.
    pub niche: String,

    /// Output directory name.
    pub slug: String,

    /// Number of products on the page.
    pub products: usize,

    /// Number of asset files copied.
    pub assets: usize,

    /// Whether the niche was skipped without writing a page.
    pub skipped: bool,
}

impl NicheReport {
    fn skipped(niche: &str, slug: String) -> Self {
        Self {
            niche: niche.to_string(),
            slug,
            products: 0,
            assets: 0,
            skipped: true,
        }
    }
}

/// JSON snapshot written next to a page when `site.data_file` is set.
#[derive(Debug, Serialize)]
struct ProductSnapshot<'a> {
    keyword: &'a str,
    fetched_at: String,
    products: &'a [Product],
}

/// Site builder that orchestrates the per-niche pipeline.
#[derive(Debug)]
pub struct SiteBuilder<S> {
    config: Config,
    source: S,
}

impl<S: ProductSource> SiteBuilder<S> {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: Config, source: S) -> Self {
        Self { config, source }
    }

    /// The configuration this builder was created with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output root directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        Path::new(&self.config.site.output_dir)
    }

    /// Read the configured niche list.
    pub fn niches(&self) -> Result<Vec<String>> {
        Ok(read_niches(Path::new(&self.config.site.niches_file))?)
    }

    /// Build every niche into a freshly cleaned output directory.
    pub fn build(&self, niches: &[String]) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            niches = niches.len(),
            template = %self.config.template_path().display(),
            output = %self.output_dir().display(),
            "starting build"
        );

        let template = self.load_template()?;
        self.clean_output()?;

        for niche in niches {
            stats.niches += 1;

            match self.build_with_template(niche, &template) {
                Ok(report) if report.skipped => stats.skipped += 1,
                Ok(report) => {
                    stats.pages += 1;
                    stats.products += report.products;
                    stats.assets += report.assets;
                    if report.products == 0 {
                        stats.empty += 1;
                    }
                }
                Err(e) => {
                    warn!(niche = %niche, error = %e, "failed to build niche");
                    stats.failed += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            niches = stats.niches,
            pages = stats.pages,
            products = stats.products,
            empty = stats.empty,
            skipped = stats.skipped,
            failed = stats.failed,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Build a single niche without touching other output.
    pub fn build_niche(&self, niche: &str) -> Result<NicheReport> {
        let template = self.load_template()?;
        self.build_with_template(niche, &template)
    }

    /// Fetch and normalize the products for `niche`.
    ///
    /// Fetch failures are logged and yield an empty list.
    pub fn products(&self, niche: &str) -> Vec<Product> {
        match self.source.fetch(niche) {
            Ok(payload) => normalize(&payload, self.config.affiliate.tag()),
            Err(e) => {
                warn!(niche, error = %e, "product fetch failed, rendering empty page");
                Vec::new()
            }
        }
    }

    fn build_with_template(&self, niche: &str, template: &str) -> Result<NicheReport> {
        let slug = slugify(niche);
        if slug.is_empty() {
            warn!(niche, "niche name has no usable characters, skipping");
            return Ok(NicheReport::skipped(niche, slug));
        }

        info!(niche, slug = %slug, "generating niche");

        let products = self.products(niche);
        if products.is_empty() && self.config.site.skip_empty {
            warn!(niche, "no products found, skipping");
            return Ok(NicheReport::skipped(niche, slug));
        }

        let niche_dir = self.output_dir().join(&slug);
        fs::create_dir_all(&niche_dir)?;

        let copier = AssetCopier::new(&self.config.site.template_dir, &self.config.site.template_file);
        let assets = copier.copy_to(&niche_dir)?;

        let cards = render_cards(&products);
        let html = fill(template, niche, &cards, self.config.site.year);

        let page_path = niche_dir.join(&self.config.site.template_file);
        fs::write(&page_path, html)?;
        debug!(path = %page_path.display(), products = products.len(), "wrote page");

        if let Some(data_file) = &self.config.site.data_file {
            self.write_snapshot(&niche_dir.join(data_file), niche, &products)?;
        }

        Ok(NicheReport {
            niche: niche.to_string(),
            slug,
            products: products.len(),
            assets,
            skipped: false,
        })
    }

    fn load_template(&self) -> Result<String> {
        let path = self.config.template_path();
        fs::read_to_string(&path).map_err(|e| {
            debug!(path = %path.display(), error = %e, "cannot read template");
            BuildError::TemplateNotFound(path)
        })
    }

    fn write_snapshot(&self, path: &Path, niche: &str, products: &[Product]) -> Result<()> {
        let snapshot = ProductSnapshot {
            keyword: niche,
            fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            products,
        };
        fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        debug!(path = %path.display(), "wrote product snapshot");
        Ok(())
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        let output_dir = self.output_dir();
        if output_dir.exists() {
            debug!(dir = %output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(output_dir)?;
        }
        fs::create_dir_all(output_dir)?;
        Ok(())
    }
}

/// Derive a directory-safe slug from a niche name.
///
/// Lower-cases, drops everything outside `[a-z0-9- ]`, then turns each run of
/// spaces into a single hyphen.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.trim().to_lowercase().chars() {
        match c {
            ' ' => {
                if !in_space {
                    slug.push('-');
                }
                in_space = true;
            }
            'a'..='z' | '0'..='9' | '-' => {
                slug.push(c);
                in_space = false;
            }
            _ => {}
        }
    }

    slug
}
