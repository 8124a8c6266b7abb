//! Scoped registration capability handed to imperative modules.

use std::future::Future;

use advance_api_core::{HttpMethod, RegistryResult};

use crate::context::ApiRequest;
use crate::handler::HandlerResult;
use crate::registry::module::Endpoint;
use crate::registry::mounter::register_endpoint;
use crate::registry::registrar::RouteRegistrar;
use crate::response::ApiResponse;

/// Registers routes under one module's base path.
///
/// Every call forwards to the [`RouteRegistrar`] with the module base and
/// label filled in. Calls chain:
///
/// ```ignore
/// ModuleDescriptor::imperative("/orders", |b| {
///     b.get("/", list)?.post("/", create)?;
///     Ok(())
/// })
/// ```
#[derive(Debug)]
pub struct RouterDefiner<'a> {
    registrar: &'a RouteRegistrar,
    base: String,
    label: &'static str,
    registered: usize,
}

impl<'a> RouterDefiner<'a> {
    pub(crate) fn new(registrar: &'a RouteRegistrar, base: String, label: &'static str) -> Self {
        Self {
            registrar,
            base,
            label,
            registered: 0,
        }
    }

    /// Fully joined base path routes are registered under.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Number of routes registered through this definer so far.
    pub fn registered(&self) -> usize {
        self.registered
    }

    pub fn get<F, Fut>(&mut self, path: &str, handler: F) -> RegistryResult<&mut Self>
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(HttpMethod::Get, path, handler)
    }

    pub fn post<F, Fut>(&mut self, path: &str, handler: F) -> RegistryResult<&mut Self>
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(HttpMethod::Post, path, handler)
    }

    pub fn put<F, Fut>(&mut self, path: &str, handler: F) -> RegistryResult<&mut Self>
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(HttpMethod::Put, path, handler)
    }

    pub fn delete<F, Fut>(&mut self, path: &str, handler: F) -> RegistryResult<&mut Self>
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on(HttpMethod::Delete, path, handler)
    }

    pub fn on<F, Fut>(&mut self, method: HttpMethod, path: &str, handler: F) -> RegistryResult<&mut Self>
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Endpoint::new(method.as_str(), path, handler))
    }

    /// Register a prepared endpoint, e.g. one carrying a description.
    pub fn route(&mut self, endpoint: Endpoint) -> RegistryResult<&mut Self> {
        register_endpoint(self.registrar, &self.base, &endpoint, self.label)?;
        self.registered += 1;
        Ok(self)
    }
}
