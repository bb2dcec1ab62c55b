use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bookstore_kernel::DomainResult;

use crate::entity::{Entity, Id};
use crate::filter::{Filter, Order};

/// A business-meaningful text column that must be unique across records.
pub struct NaturalKey<T> {
    pub name: &'static str,
    pub get: fn(&T) -> &str,
}

impl<T> NaturalKey<T> {
    pub const fn new(name: &'static str, get: fn(&T) -> &str) -> Self {
        Self { name, get }
    }

    pub fn value_of<'a>(&self, record: &'a T) -> &'a str {
        (self.get)(record)
    }
}

impl<T> Clone for NaturalKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NaturalKey<T> {}

impl<T> fmt::Debug for NaturalKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NaturalKey").field(&self.name).finish()
    }
}

/// Read capabilities of a record store.
#[async_trait]
pub trait Finder<T: Entity>: Send + Sync {
    /// Looks a record up by identity.
    async fn find_by_id(&self, id: Id) -> DomainResult<Option<T>>;

    /// Every record accepted by `filter`, sorted by `order`.
    async fn find_all(&self, filter: &Filter<T>, order: &Order<T>) -> DomainResult<Vec<T>>;

    /// Whether any record holds `value` in `key`.
    async fn exists_by(&self, key: NaturalKey<T>, value: &str) -> DomainResult<bool>;

    /// A record holding `value` in `key` whose identity is not `excluding`.
    ///
    /// The exclusion is part of the store query, never applied by the caller.
    async fn find_one_by(
        &self,
        key: NaturalKey<T>,
        value: &str,
        excluding: Id,
    ) -> DomainResult<Option<T>>;
}

/// Write capability of a record store.
#[async_trait]
pub trait Saver<T: Entity>: Send + Sync {
    /// Inserts when the entity has no identity (assigning one), otherwise
    /// replaces the stored record with the same identity.
    async fn save(&self, entity: T) -> DomainResult<T>;
}

/// Delete capability of a record store.
#[async_trait]
pub trait Deleter<T: Entity>: Send + Sync {
    /// Returns `false` when nothing carried that identity.
    async fn delete_by_id(&self, id: Id) -> DomainResult<bool>;
}

/// Full set of capabilities, as composed by the entity services.
pub trait Store<T: Entity>: Finder<T> + Saver<T> + Deleter<T> {}

impl<T: Entity, S> Store<T> for S where S: Finder<T> + Saver<T> + Deleter<T> {}

/// Shared handle to a record store.
pub type StoreArc<T> = Arc<dyn Store<T>>;
