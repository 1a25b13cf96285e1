//! Configuration management for crd-update

pub mod catalog;
pub mod config;
pub mod output;


// Re-export main types for convenience
pub use catalog::CatalogConfig;
pub use config::Config;
pub use output::OutputConfig;
