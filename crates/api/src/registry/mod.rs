//! Route registration engine: registrar, route table, module descriptors and
//! the mounter that walks them.
//!
//! Everything here runs during the registration phase. Once the facade seals
//! the registrar, the table becomes an immutable axum router and only the
//! catalog is still read (by the docs endpoints).

pub mod catalog;
pub mod definer;
pub mod module;
pub mod mounter;
pub mod registrar;
mod table;

pub use catalog::CatalogHandle;
pub use definer::RouterDefiner;
pub use module::{
    BuildFn, DeclarativeModule, Endpoint, ImperativeModule, ModuleDescriptor, ModuleSet,
    LABEL_BUILT_IN, LABEL_DECLARATIVE, LABEL_DEFINE_ROUTES, LABEL_IMPERATIVE,
};
pub use mounter::{ModuleMounter, MountReport};
pub use registrar::RouteRegistrar;
