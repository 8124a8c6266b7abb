//! Method/path table that is turned into the axum router once registration ends.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::Request,
    routing::{MethodFilter, MethodRouter},
    Router,
};

use advance_api_core::{HttpMethod, RegistryError, RegistryResult};

use crate::handler::{dispatch, BoxedHandler};

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Delete => MethodFilter::DELETE,
    }
}

/// Bound handlers keyed by external path, then verb.
///
/// Binding the same verb on the same path again replaces the earlier handler,
/// so the last registration wins. Every distinct path is also inserted into a
/// matcher identical to the one axum builds, so paths axum would refuse are
/// reported here instead of panicking when the router is assembled.
pub(crate) struct RouteTable {
    routes: BTreeMap<String, BTreeMap<HttpMethod, BoxedHandler>>,
    matcher: matchit::Router<()>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: BTreeMap::new(),
            matcher: matchit::Router::new(),
        }
    }
}

impl RouteTable {
    /// Bind `method path`. Returns `true` if an earlier handler was replaced.
    pub(crate) fn bind(
        &mut self,
        method: HttpMethod,
        path: String,
        handler: BoxedHandler,
    ) -> RegistryResult<bool> {
        if !self.routes.contains_key(&path) {
            self.matcher
                .insert(path.as_str(), ())
                .map_err(|e| RegistryError::route_conflict(method.as_str(), path.as_str(), e.to_string()))?;
        }

        Ok(self
            .routes
            .entry(path)
            .or_default()
            .insert(method, handler)
            .is_some())
    }

    /// Number of bound (method, path) pairs.
    pub(crate) fn len(&self) -> usize {
        self.routes.values().map(BTreeMap::len).sum()
    }

    pub(crate) fn into_router(self) -> Router {
        self.routes
            .into_iter()
            .fold(Router::new(), |router, (path, methods)| {
                let method_router = methods.into_iter().fold(
                    MethodRouter::new(),
                    |method_router: MethodRouter, (method, handler)| {
                        let route: Arc<str> = Arc::from(format!("{method} {path}"));
                        method_router.on(method_filter(method), move |req: Request| {
                            dispatch(handler.clone(), route.clone(), req)
                        })
                    },
                );
                router.route(&path, method_router)
            })
    }
}

impl core::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}
