//! Shared handle over the route catalog.

use std::sync::{Arc, PoisonError, RwLock};

use advance_api_core::{RouteCatalog, RouteEntry};

/// Cloneable handle to one API instance's [`RouteCatalog`].
///
/// Writes only happen during the registration phase; request handlers (the
/// docs endpoints) only read.
#[derive(Debug, Clone, Default)]
pub struct CatalogHandle(Arc<RwLock<RouteCatalog>>);

impl CatalogHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(
        &self,
        method: &str,
        path: String,
        module: Option<String>,
        description: Option<String>,
    ) -> RouteEntry {
        let mut catalog = self.0.write().unwrap_or_else(PoisonError::into_inner);
        catalog.add(method, path, module, description)
    }

    /// Snapshot of all entries in registration order.
    pub fn list(&self) -> Vec<RouteEntry> {
        self.read(|c| c.list().to_vec())
    }

    pub fn len(&self) -> usize {
        self.read(RouteCatalog::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(RouteCatalog::is_empty)
    }

    /// Human-readable listing (one line per entry).
    pub fn render(&self) -> String {
        self.read(RouteCatalog::render)
    }

    /// Log the listing through `tracing`.
    pub fn log(&self) {
        self.read(RouteCatalog::log)
    }

    pub fn duplicates(&self) -> Vec<(String, String)> {
        self.read(RouteCatalog::duplicates)
    }

    fn read<T>(&self, f: impl FnOnce(&RouteCatalog) -> T) -> T {
        let catalog = self.0.read().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }
}
