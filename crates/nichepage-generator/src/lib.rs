//! Nichepage Generator Library
//!
//! Affiliate landing page generation for product niches.
//!
//! # Modules
//!
//! - [`affiliate`] - Affiliate tag injection into product links
//! - [`normalize`] - Raw search payload to [`Product`](nichepage_core::Product) normalization
//! - [`cards`] - Product card markup
//! - [`template`] - Landing page template filling
//! - [`assets`] - Template asset copying
//! - [`fetch`] - Product search API client
//! - [`niches`] - Niche list loading
//! - [`build`] - Build orchestration

pub mod affiliate;
pub mod assets;
pub mod build;
pub mod cards;
pub mod fetch;
pub mod niches;
pub mod normalize;
pub mod template;

pub use affiliate::rewrite;
pub use assets::AssetCopier;
pub use build::{BuildError, BuildStats, NicheReport, SiteBuilder, slugify};
pub use cards::render_cards;
pub use fetch::{FetchError, ProductSource, RapidApiClient};
pub use niches::read_niches;
pub use normalize::normalize;
pub use template::{Template, TemplateContext, fill};
