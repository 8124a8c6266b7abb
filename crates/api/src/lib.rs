//! Dynamic route registration for axum: callers describe modules of
//! endpoints, the facade mounts them under one prefix with built-in
//! liveness and documentation endpoints and a live route catalog.

pub mod app;
pub mod config;
pub mod context;
pub mod handler;
pub mod middleware;
pub mod registry;
pub mod response;

pub use advance_api_core::{join_paths, HttpMethod, RegistryError, RouteCatalog, RouteEntry};
pub use app::errors::{BootstrapError, HandlerError};
pub use app::toolkit::{ObjectKit, Toolkit};
pub use app::{build_api, AdvanceApi};
pub use config::ApiOptions;
pub use context::ApiRequest;
pub use handler::{BoxedHandler, HandlerResult, RouteHandler};
pub use registry::{
    CatalogHandle, DeclarativeModule, Endpoint, ImperativeModule, ModuleDescriptor, ModuleSet,
    RouterDefiner,
};
pub use response::ApiResponse;
