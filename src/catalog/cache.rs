use std::path::{Path, PathBuf};
use std::sync::Arc;
use dashmap::DashMap;
use crate::errors::ShopError;
use super::loader::Catalog;
use tracing::debug;

/// Process-lifetime memo of parsed catalogs keyed by path.
///
/// Catalog files are treated as immutable once loaded, so entries are never
/// invalidated. Failed loads are not cached.
#[derive(Clone, Default)]
pub struct CatalogCache {
    entries: Arc<DashMap<PathBuf, Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, path: &Path) -> Result<Arc<Catalog>, ShopError> {
        if let Some(hit) = self.entries.get(path) {
            debug!(path = %path.display(), "Catalog cache hit");
            return Ok(hit.clone());
        }
        let catalog = Arc::new(Catalog::load(path)?);
        self.entries.insert(path.to_path_buf(), catalog.clone());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
