//! Patching of the `adapterOverrides` and `sink` schemas of CustomResourceDefinitions

pub mod catalog;
pub mod document;
pub mod error;
mod fold;
pub mod patcher;
pub mod value;

pub use catalog::{AdapterOverridesSnippet, Catalog, CatalogVariant, SinkSnippet};
pub use error::{PatchError, Result};
pub use patcher::{PatchReport, Patcher, VersionReport};
pub use value::{PathError, PathErrorReason};
