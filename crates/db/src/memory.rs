use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use bookstore_kernel::DomainResult;
use tokio::sync::RwLock;

use crate::entity::{Entity, Id};
use crate::filter::{Filter, Order};
use crate::store::{Deleter, Finder, NaturalKey, Saver};

/// In-memory record store.
///
/// Records are kept in identity order so ties in a listing's sort key fall
/// back to insertion order. Identities are assigned from a monotonic sequence
/// starting at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: RwLock<BTreeMap<Id, T>>,
    sequence: AtomicI64,
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryStore<T> {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }

    /// Creates a store seeded with records.
    ///
    /// Records without an identity are assigned one; the sequence continues
    /// after the highest identity seen.
    pub fn with_data(records: Vec<T>) -> Self {
        let highest = records.iter().filter_map(|record| record.id()).max().unwrap_or(0);
        let sequence = AtomicI64::new(highest);

        let records = records
            .into_iter()
            .map(|mut record| {
                let id = match record.id() {
                    Some(id) => id,
                    None => {
                        let id = sequence.fetch_add(1, Ordering::SeqCst) + 1;
                        record.assign_id(id);
                        id
                    }
                };
                (id, record)
            })
            .collect();

        Self {
            records: RwLock::new(records),
            sequence,
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn next_id(&self) -> Id {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl<T: Entity> Finder<T> for MemoryStore<T> {
    async fn find_by_id(&self, id: Id) -> DomainResult<Option<T>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_all(&self, filter: &Filter<T>, order: &Order<T>) -> DomainResult<Vec<T>> {
        let records = self.records.read().await;

        let mut matched: Vec<T> = records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        order.sort(&mut matched);

        tracing::trace!(
            fields = ?filter.fields(),
            order = order.field(),
            matched = matched.len(),
            "memory store scan"
        );

        Ok(matched)
    }

    async fn exists_by(&self, key: NaturalKey<T>, value: &str) -> DomainResult<bool> {
        let records = self.records.read().await;
        Ok(records.values().any(|record| key.value_of(record) == value))
    }

    async fn find_one_by(
        &self,
        key: NaturalKey<T>,
        value: &str,
        excluding: Id,
    ) -> DomainResult<Option<T>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|(id, record)| **id != excluding && key.value_of(record) == value)
            .map(|(_, record)| record.clone()))
    }
}

#[async_trait]
impl<T: Entity> Saver<T> for MemoryStore<T> {
    async fn save(&self, mut entity: T) -> DomainResult<T> {
        let id = match entity.id() {
            Some(id) => {
                // Keep the sequence ahead of explicitly supplied identities.
                self.sequence.fetch_max(id, Ordering::SeqCst);
                id
            }
            None => {
                let id = self.next_id();
                entity.assign_id(id);
                id
            }
        };

        self.records.write().await.insert(id, entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl<T: Entity> Deleter<T> for MemoryStore<T> {
    async fn delete_by_id(&self, id: Id) -> DomainResult<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }
}
