//! Capability bundle handed to the caller's setup function.

use serde_json::Value;
use uuid::Uuid;

use advance_api_core::{object, RegistryResult, RouteEntry};

use crate::registry::{
    mounter::register_endpoint, DeclarativeModule, Endpoint, ModuleDescriptor, RouteRegistrar,
    LABEL_DEFINE_ROUTES,
};

/// `pick` / `omit` / `get` over JSON values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectKit;

impl ObjectKit {
    pub fn pick<S: AsRef<str>>(&self, value: &Value, paths: &[S]) -> Value {
        object::pick(value, paths)
    }

    pub fn omit<S: AsRef<str>>(&self, value: &Value, paths: &[S]) -> Value {
        object::omit(value, paths)
    }

    pub fn get<'v>(&self, value: &'v Value, path: &str) -> Option<&'v Value> {
        object::get(value, path)
    }

    pub fn get_or(&self, value: &Value, path: &str, default: Value) -> Value {
        object::get_or(value, path, default)
    }
}

/// Pre-bound operations available to setup code.
///
/// Cheap to clone, so handlers may capture it (e.g. for the HTTP client or
/// to list routes at request time). Registration through it only works until
/// the facade has finished building.
#[derive(Debug, Clone)]
pub struct Toolkit {
    registrar: RouteRegistrar,
    http: reqwest::Client,
}

impl Toolkit {
    pub(crate) fn new(registrar: RouteRegistrar, http: reqwest::Client) -> Self {
        Self { registrar, http }
    }

    /// Raw registrar handle.
    pub fn router(&self) -> &RouteRegistrar {
        &self.registrar
    }

    /// Random (v4) UUID as a hyphenated string.
    pub fn uuid(&self) -> String {
        Uuid::new_v4().to_string()
    }

    pub fn objects(&self) -> ObjectKit {
        ObjectKit
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Register `endpoints` under `base` right away and return the matching
    /// declarative descriptor.
    ///
    /// Returning the descriptor from setup is harmless: the mounter recognises
    /// it as already registered and skips it.
    pub fn define_routes(
        &self,
        base: &str,
        endpoints: Vec<Endpoint>,
    ) -> RegistryResult<ModuleDescriptor> {
        let full_base = self.registrar.module_base(base);
        for endpoint in &endpoints {
            register_endpoint(&self.registrar, &full_base, endpoint, LABEL_DEFINE_ROUTES)?;
        }
        Ok(DeclarativeModule::new(base, endpoints).registered().into())
    }

    /// Catalog snapshot in registration order.
    pub fn list_routes(&self) -> Vec<RouteEntry> {
        self.registrar.catalog().list()
    }

    /// Log the route listing and return it.
    pub fn render_routes(&self) -> String {
        let catalog = self.registrar.catalog();
        catalog.log();
        catalog.render()
    }
}
