//! Framework-independent half of the registration engine.
//!
//! This crate knows nothing about HTTP transports: it normalizes paths, names
//! the supported verbs, records what was registered, and offers the small JSON
//! toolkit handed to module setup code.

pub mod catalog;
pub mod error;
pub mod method;
pub mod object;
pub mod path;

pub use catalog::{RouteCatalog, RouteEntry};
pub use error::{RegistryError, RegistryResult};
pub use method::HttpMethod;
pub use path::join_paths;
