//! Snippet catalog selection

use crd_patch::CatalogVariant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog revision whose snippets are applied
    #[serde(default)]
    pub variant: CatalogVariant,
}
