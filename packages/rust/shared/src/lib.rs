//! Shared types, error model, and configuration for startable.
//!
//! This crate is the foundation depended on by all other startable crates.
//! It provides:
//! - [`StartableError`]: the unified error type
//! - Catalog types ([`CatalogTable`], [`CatalogRow`]) and column constants
//! - The link extractor ([`extract_main_link`], [`hosted_link`])
//! - Configuration ([`AppConfig`], [`StarsConfig`], config loading)

pub mod config;
pub mod error;
pub mod links;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, GitHubConfig, PathsConfig, SectionMarkers, StarsConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, resolve_token,
};
pub use error::{Result, StartableError};
pub use links::{extract_main_link, hosted_link};
pub use types::{
    CatalogRow, CatalogTable, HOSTING_DOMAIN, LINKS_COLUMN, NAME_COLUMN, NOT_AVAILABLE,
    STARS_COLUMN,
};
