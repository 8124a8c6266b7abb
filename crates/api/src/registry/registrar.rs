//! The registration operation every other entry point funnels into.

use std::sync::{Arc, Mutex, PoisonError};

use advance_api_core::{HttpMethod, RegistryError, RegistryResult, RouteEntry, join_paths};

use crate::handler::BoxedHandler;
use crate::registry::catalog::CatalogHandle;
use crate::registry::table::RouteTable;

#[derive(Debug)]
struct Inner {
    prefix: String,
    base: String,
    strict_methods: bool,
    catalog: CatalogHandle,
    /// `None` once the table has been handed to the router.
    table: Mutex<Option<RouteTable>>,
}

/// Binds handlers and records catalog entries for one API instance.
///
/// Cheap to clone; clones share the same table and catalog.
#[derive(Debug, Clone)]
pub struct RouteRegistrar {
    inner: Arc<Inner>,
}

impl RouteRegistrar {
    /// `prefix` is the external mount path, `base` the global module base.
    pub fn new(prefix: &str, base: &str, strict_methods: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                prefix: join_paths([prefix]),
                base: join_paths([base]),
                strict_methods,
                catalog: CatalogHandle::new(),
                table: Mutex::new(Some(RouteTable::default())),
            }),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// Global base joined in front of every module base.
    pub fn base(&self) -> &str {
        &self.inner.base
    }

    pub fn catalog(&self) -> CatalogHandle {
        self.inner.catalog.clone()
    }

    /// Base path for a caller module: global base, then the module's own base.
    pub fn module_base(&self, base: &str) -> String {
        join_paths([self.inner.base.as_str(), base])
    }

    /// Register one route.
    ///
    /// The handler is bound at `prefix + join(base, path)` and the same
    /// externally visible path is recorded in the catalog. A verb outside
    /// GET/POST/PUT/DELETE is recorded without being bound, unless strict
    /// method checking is on, in which case nothing happens and the error is
    /// returned. A path the router's matcher refuses fails with
    /// [`RegistryError::RouteConflict`] and is not recorded.
    pub fn register(
        &self,
        method: &str,
        base: &str,
        path: &str,
        handler: BoxedHandler,
        module: Option<&str>,
        description: Option<&str>,
    ) -> RegistryResult<RouteEntry> {
        let full_path = join_paths([base, path]);
        let external_path = join_paths([self.inner.prefix.as_str(), full_path.as_str()]);

        let verb = match method.parse::<HttpMethod>() {
            Ok(verb) => Some(verb),
            Err(err) if self.inner.strict_methods => return Err(err),
            Err(err) => {
                tracing::warn!(
                    path = %external_path,
                    error = %err,
                    "route recorded in catalog but not bound"
                );
                None
            }
        };

        {
            let mut table = self
                .inner
                .table
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let Some(table) = table.as_mut() else {
                tracing::warn!(path = %external_path, "registration after the router was built");
                return Err(RegistryError::sealed(
                    method.to_ascii_uppercase(),
                    external_path,
                ));
            };

            if let Some(verb) = verb {
                if table.bind(verb, external_path.clone(), handler)? {
                    tracing::warn!(
                        method = %verb,
                        path = %external_path,
                        "route registered again; last registration wins"
                    );
                }
            }
        }

        let entry = self.inner.catalog.add(
            method,
            external_path,
            module.map(str::to_string),
            description.map(str::to_string),
        );
        tracing::debug!(method = entry.method(), path = entry.path(), module, "route registered");

        Ok(entry)
    }

    /// Take the table out for router construction. Later `register` calls fail
    /// with [`RegistryError::Sealed`].
    pub(crate) fn seal(&self) -> RouteTable {
        self.inner
            .table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or_default()
    }
}
