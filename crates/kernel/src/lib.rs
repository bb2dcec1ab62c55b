//! Kernel of the bookstore service: module lifecycle, layered settings and the
//! domain error taxonomy every other crate reports through.

pub mod error;
pub mod module;
pub mod registry;
pub mod settings;

pub use error::{DomainError, DomainResult, EntityKind};
pub use module::{InitCtx, Migration, Module};
pub use registry::ModuleRegistry;
