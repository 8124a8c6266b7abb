//! Facade: assembles registrar, built-ins, caller modules and layers into one
//! axum router.
//!
//! Layout:
//! - `toolkit.rs`: capability bundle passed to the caller's setup function
//! - `routes/`: built-in diagnostic and documentation endpoints
//! - `dto.rs`: response envelope and built-in payloads
//! - `errors.rs`: error envelope, handler errors, bootstrap errors

use axum::Router;

use advance_api_core::join_paths;

use crate::config::ApiOptions;
use crate::middleware;
use crate::registry::{mounter::register_endpoint, CatalogHandle, ModuleMounter, RouteRegistrar, LABEL_BUILT_IN};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod toolkit;

use dto::ServerInfo;
use errors::BootstrapError;
use toolkit::Toolkit;

/// Name reported by [`AdvanceApi::server_info`].
pub const SERVER_NAME: &str = "advance-api";

/// A fully built API instance, ready to be served or merged into a host router.
#[derive(Debug, Clone)]
pub struct AdvanceApi {
    router: Router,
    catalog: CatalogHandle,
    prefix: String,
    base: String,
}

impl AdvanceApi {
    /// The composed router (cheap clone).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Effective mount information.
    pub fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: SERVER_NAME,
            prefix: self.prefix.clone(),
            base: self.base.clone(),
            test_url: join_paths([self.prefix.as_str(), routes::LIVENESS_PATH]),
            docs_url: join_paths([self.prefix.as_str(), routes::DOCS_PATH]),
            route_count: self.catalog.len(),
        }
    }
}

fn log_startup_banner(info: &ServerInfo, has_setup: bool) {
    tracing::info!(prefix = %info.prefix, routes = info.route_count, "advance api mounted");
    tracing::info!(url = %info.test_url, "test endpoint");
    tracing::info!(url = %info.docs_url, "documentation");

    if info.base != "/" {
        tracing::info!(base = %info.base, "global base path");
    }
    if !has_setup {
        tracing::info!("no setup function supplied; only the built-in endpoints are available");
    }
}

/// Build one independent API instance.
///
/// Registration order is built-ins, then the setup function's modules in the
/// order returned. Any failure aborts the build; nothing partial is returned.
pub fn build_api(options: ApiOptions) -> Result<AdvanceApi, BootstrapError> {
    let ApiOptions {
        prefix,
        base,
        cors,
        strict_methods,
        body_limit,
        version,
        http_client,
        setup,
    } = options;

    let registrar = RouteRegistrar::new(&prefix, &base, strict_methods);
    let catalog = registrar.catalog();

    for endpoint in routes::builtin_endpoints(catalog.clone(), &version) {
        register_endpoint(&registrar, "/", &endpoint, LABEL_BUILT_IN)?;
    }

    let has_setup = setup.is_some();
    if let Some(setup) = setup {
        let http = match http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .build()
                .map_err(|e| BootstrapError::Setup(e.into()))?,
        };
        let toolkit = Toolkit::new(registrar.clone(), http);

        let modules = setup(&toolkit).map_err(BootstrapError::Setup)?;
        ModuleMounter::new(&registrar).mount(modules)?;
    }

    let router = middleware::wrap(
        registrar.seal().into_router(),
        cors.unwrap_or_else(middleware::default_cors),
        body_limit,
    );

    let api = AdvanceApi {
        router,
        catalog,
        prefix: registrar.prefix().to_string(),
        base: registrar.base().to_string(),
    };
    log_startup_banner(&api.server_info(), has_setup);

    Ok(api)
}
