//! Record storage for the bookstore service.
//!
//! Provides capability traits over a record store, a dynamic filter builder,
//! conditional uniqueness checks and the generic CRUD helpers the entity
//! services compose.

pub mod criteria;
pub mod crud;
pub mod entity;
pub mod filter;
pub mod memory;
pub mod store;
pub mod unique;

pub use criteria::{is_present, DateRange};
pub use entity::{Entity, Id};
pub use filter::{Direction, Filter, Order};
pub use memory::MemoryStore;
pub use store::{Deleter, Finder, NaturalKey, Saver, Store, StoreArc};
pub use unique::{ensure_unique, UniqueConstraint, UniquenessScope};
