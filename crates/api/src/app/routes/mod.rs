use std::sync::Arc;

use crate::registry::{CatalogHandle, Endpoint};

pub mod docs;
pub mod system;

/// Path of the liveness endpoint, relative to the mount prefix.
pub const LIVENESS_PATH: &str = "/advance-api-test";
/// Path of the HTML documentation page, relative to the mount prefix.
pub const DOCS_PATH: &str = "/docs";
/// Path of the JSON route listing, relative to the mount prefix.
pub const DOCS_ROUTES_PATH: &str = "/docs/routes";

/// Built-in diagnostic endpoints for one API instance.
///
/// Built fresh per instance; the docs handlers read `catalog` at request
/// time, so they list routes mounted after them as well.
pub fn builtin_endpoints(catalog: CatalogHandle, version: &str) -> Vec<Endpoint> {
    let version: Arc<str> = Arc::from(version);
    let page_catalog = catalog.clone();

    vec![
        Endpoint::get(LIVENESS_PATH, move |req, res| {
            let version = version.clone();
            async move { system::liveness(&version, req, res).await }
        })
        .describe("Liveness check"),
        Endpoint::get(DOCS_PATH, move |req, res| {
            docs::docs_page(page_catalog.clone(), req, res)
        })
        .describe("API documentation page"),
        Endpoint::get(DOCS_ROUTES_PATH, move |req, res| {
            docs::docs_routes(catalog.clone(), req, res)
        })
        .describe("Route catalog as JSON"),
    ]
}
