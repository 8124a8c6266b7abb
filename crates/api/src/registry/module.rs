//! Module descriptors: the two ways a caller can contribute routes.

use std::future::Future;

use advance_api_core::HttpMethod;

use crate::context::ApiRequest;
use crate::handler::{BoxedHandler, HandlerResult};
use crate::registry::definer::RouterDefiner;
use crate::response::ApiResponse;

/// Catalog label for routes from declarative modules.
pub const LABEL_DECLARATIVE: &str = "declarative";
/// Catalog label for routes from imperative modules.
pub const LABEL_IMPERATIVE: &str = "imperative";
/// Catalog label for routes registered through `Toolkit::define_routes`.
pub const LABEL_DEFINE_ROUTES: &str = "routes";
/// Catalog label for the built-in diagnostic endpoints.
pub const LABEL_BUILT_IN: &str = "built-in";

/// One endpoint of a declarative module.
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: String,
    path: String,
    handler: BoxedHandler,
    description: Option<String>,
}

impl Endpoint {
    /// Endpoint with a verb given as text (`"get"`, `"POST"`, ...).
    pub fn new<F, Fut>(method: impl Into<String>, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::with_handler(method, path, BoxedHandler::new(handler))
    }

    pub fn with_handler(
        method: impl Into<String>,
        path: impl Into<String>,
        handler: BoxedHandler,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            handler,
            description: None,
        }
    }

    pub fn get<F, Fut>(path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::new(HttpMethod::Get.as_str(), path, handler)
    }

    pub fn post<F, Fut>(path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::new(HttpMethod::Post.as_str(), path, handler)
    }

    pub fn put<F, Fut>(path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::new(HttpMethod::Put.as_str(), path, handler)
    }

    pub fn delete<F, Fut>(path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ApiRequest, ApiResponse) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::new(HttpMethod::Delete.as_str(), path, handler)
    }

    /// Attach a free-text description shown in the docs.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &BoxedHandler {
        &self.handler
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A base path plus an ordered list of endpoints.
#[derive(Debug, Clone)]
pub struct DeclarativeModule {
    base: String,
    endpoints: Vec<Endpoint>,
    /// Already registered by `define_routes`; the mounter skips it.
    registered: bool,
}

impl DeclarativeModule {
    pub fn new(base: impl Into<String>, endpoints: Vec<Endpoint>) -> Self {
        Self {
            base: base.into(),
            endpoints,
            registered: false,
        }
    }

    pub(crate) fn registered(mut self) -> Self {
        self.registered = true;
        self
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

/// Build callback of an imperative module.
pub type BuildFn = Box<dyn FnOnce(&mut RouterDefiner<'_>) -> anyhow::Result<()>>;

/// A base path plus a callback that registers routes on a [`RouterDefiner`].
pub struct ImperativeModule {
    base: String,
    build: BuildFn,
}

impl ImperativeModule {
    pub fn new<F>(base: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut RouterDefiner<'_>) -> anyhow::Result<()> + 'static,
    {
        Self {
            base: base.into(),
            build: Box::new(build),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub(crate) fn into_parts(self) -> (String, BuildFn) {
        (self.base, self.build)
    }
}

impl core::fmt::Debug for ImperativeModule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImperativeModule")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

/// A unit of route-registration intent.
#[derive(Debug)]
pub enum ModuleDescriptor {
    Declarative(DeclarativeModule),
    Imperative(ImperativeModule),
}

impl ModuleDescriptor {
    pub fn declarative(base: impl Into<String>, endpoints: Vec<Endpoint>) -> Self {
        Self::Declarative(DeclarativeModule::new(base, endpoints))
    }

    pub fn imperative<F>(base: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(&mut RouterDefiner<'_>) -> anyhow::Result<()> + 'static,
    {
        Self::Imperative(ImperativeModule::new(base, build))
    }

    pub fn base(&self) -> &str {
        match self {
            Self::Declarative(module) => module.base(),
            Self::Imperative(module) => module.base(),
        }
    }

    /// Catalog label routes of this module carry.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Declarative(_) => LABEL_DECLARATIVE,
            Self::Imperative(_) => LABEL_IMPERATIVE,
        }
    }
}

impl From<DeclarativeModule> for ModuleDescriptor {
    fn from(module: DeclarativeModule) -> Self {
        Self::Declarative(module)
    }
}

impl From<ImperativeModule> for ModuleDescriptor {
    fn from(module: ImperativeModule) -> Self {
        Self::Imperative(module)
    }
}

/// What a setup function returns: one descriptor or many, possibly with gaps.
///
/// `None` entries are skipped when mounting.
#[derive(Debug, Default)]
pub struct ModuleSet(Vec<Option<ModuleDescriptor>>);

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, module: impl Into<Option<ModuleDescriptor>>) {
        self.0.push(module.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ModuleSet {
    type Item = Option<ModuleDescriptor>;
    type IntoIter = std::vec::IntoIter<Option<ModuleDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<ModuleDescriptor> for ModuleSet {
    fn from(module: ModuleDescriptor) -> Self {
        Self(vec![Some(module)])
    }
}

impl From<Option<ModuleDescriptor>> for ModuleSet {
    fn from(module: Option<ModuleDescriptor>) -> Self {
        Self(vec![module])
    }
}

impl From<Vec<ModuleDescriptor>> for ModuleSet {
    fn from(modules: Vec<ModuleDescriptor>) -> Self {
        Self(modules.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<ModuleDescriptor>>> for ModuleSet {
    fn from(modules: Vec<Option<ModuleDescriptor>>) -> Self {
        Self(modules)
    }
}

impl FromIterator<ModuleDescriptor> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = ModuleDescriptor>>(iter: I) -> Self {
        Self(iter.into_iter().map(Some).collect())
    }
}

impl FromIterator<Option<ModuleDescriptor>> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = Option<ModuleDescriptor>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(method: &str, path: &str) -> Endpoint {
        Endpoint::new(method, path, |_req, res| async move { Ok(res.success(())) })
    }

    #[test]
    fn module_set_keeps_gaps_and_order() {
        let mut set = ModuleSet::new();
        assert!(set.is_empty());

        set.push(ModuleDescriptor::declarative("/a", vec![noop("get", "/")]));
        set.push(None::<ModuleDescriptor>);
        set.push(ModuleDescriptor::imperative("/b", |_b| Ok(())));
        assert_eq!(set.len(), 3);

        let bases: Vec<Option<String>> = set
            .into_iter()
            .map(|m| m.map(|m| m.base().to_string()))
            .collect();
        assert_eq!(bases, vec![Some("/a".to_string()), None, Some("/b".to_string())]);
    }

    #[test]
    fn descriptors_report_their_label() {
        let declarative: ModuleDescriptor =
            DeclarativeModule::new("/users", vec![]).endpoint(noop("post", "/")).into();
        assert_eq!(declarative.label(), LABEL_DECLARATIVE);

        let imperative = ModuleDescriptor::imperative("/orders", |_b| Ok(()));
        assert_eq!(imperative.label(), LABEL_IMPERATIVE);
    }

    #[test]
    fn verb_helpers_fill_in_the_method() {
        let endpoint = Endpoint::delete("/:id", |_req, res| async move { Ok(res.success(())) })
            .describe("remove");
        assert_eq!(endpoint.method(), "DELETE");
        assert_eq!(endpoint.path(), "/:id");
        assert_eq!(endpoint.description(), Some("remove"));
    }
}
