//! Nichepage Core Library
//!
//! Core types, configuration, and error handling for the Nichepage landing page generator.

pub mod config;
pub mod error;
pub mod product;

pub use config::Config;
pub use error::{CoreError, Result};
pub use product::Product;
