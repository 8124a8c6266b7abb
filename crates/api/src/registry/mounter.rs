//! Walks module descriptors and drives the registrar once per endpoint.

use advance_api_core::{RegistryError, RegistryResult, RouteEntry};

use crate::app::errors::BootstrapError;
use crate::registry::definer::RouterDefiner;
use crate::registry::module::{
    Endpoint, ModuleDescriptor, ModuleSet, LABEL_DECLARATIVE, LABEL_IMPERATIVE,
};
use crate::registry::registrar::RouteRegistrar;

/// Register one endpoint under an already-joined base.
pub(crate) fn register_endpoint(
    registrar: &RouteRegistrar,
    base: &str,
    endpoint: &Endpoint,
    label: &str,
) -> RegistryResult<RouteEntry> {
    if endpoint.method().trim().is_empty() {
        return Err(RegistryError::invalid_module(
            base,
            format!("endpoint `{}` has no method", endpoint.path()),
        ));
    }

    registrar.register(
        endpoint.method(),
        base,
        endpoint.path(),
        endpoint.handler().clone(),
        Some(label),
        endpoint.description(),
    )
}

/// Outcome of [`ModuleMounter::mount`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountReport {
    /// Descriptors whose routes were registered.
    pub modules: usize,
    /// `None` entries and modules already registered by `define_routes`.
    pub skipped: usize,
    /// Routes registered by this call.
    pub routes: usize,
}

/// Mounts caller modules through one [`RouteRegistrar`].
#[derive(Debug, Clone, Copy)]
pub struct ModuleMounter<'a> {
    registrar: &'a RouteRegistrar,
}

impl<'a> ModuleMounter<'a> {
    pub fn new(registrar: &'a RouteRegistrar) -> Self {
        Self { registrar }
    }

    /// Mount descriptors in the order given; endpoints in list order.
    ///
    /// Stops at the first failure. The caller must then discard the
    /// registrar: routes mounted before the failure stay in its table.
    pub fn mount(&self, modules: impl Into<ModuleSet>) -> Result<MountReport, BootstrapError> {
        let mut report = MountReport::default();

        for module in modules.into() {
            let Some(module) = module else {
                tracing::debug!("skipping empty module descriptor");
                report.skipped += 1;
                continue;
            };

            let base = self.registrar.module_base(module.base());

            match module {
                ModuleDescriptor::Declarative(module) if module.is_registered() => {
                    tracing::debug!(base = %base, "module already registered by define_routes");
                    report.skipped += 1;
                    continue;
                }
                ModuleDescriptor::Declarative(module) => {
                    for endpoint in module.endpoints() {
                        register_endpoint(self.registrar, &base, endpoint, LABEL_DECLARATIVE)?;
                        report.routes += 1;
                    }
                }
                ModuleDescriptor::Imperative(module) => {
                    let (module_base, build) = module.into_parts();
                    let mut definer = RouterDefiner::new(self.registrar, base, LABEL_IMPERATIVE);
                    build(&mut definer).map_err(|error| BootstrapError::ModuleBuild {
                        base: module_base,
                        error,
                    })?;
                    report.routes += definer.registered();
                }
            }

            report.modules += 1;
        }

        tracing::debug!(
            modules = report.modules,
            skipped = report.skipped,
            routes = report.routes,
            "modules mounted"
        );
        Ok(report)
    }
}
