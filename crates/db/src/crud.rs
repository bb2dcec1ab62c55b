//! Generic CRUD helpers parameterised by [`EntityKind`].

use bookstore_kernel::{DomainError, DomainResult, EntityKind};

use crate::entity::{Entity, Id};
use crate::filter::{Filter, Order};
use crate::store::{Deleter, Finder};

/// Fetches one record or fails with the kind's not-found message.
pub async fn get_detail<T, F>(finder: &F, kind: EntityKind, id: Id) -> DomainResult<T>
where
    T: Entity,
    F: Finder<T> + ?Sized,
{
    finder
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::missing(kind))
}

/// Runs a filtered search.
///
/// An empty result is reported as not-found rather than an empty list.
pub async fn search<T, F>(
    finder: &F,
    kind: EntityKind,
    filter: &Filter<T>,
    order: &Order<T>,
) -> DomainResult<Vec<T>>
where
    T: Entity,
    F: Finder<T> + ?Sized,
{
    tracing::debug!(
        entity = %kind,
        fields = ?filter.fields(),
        order = order.field(),
        "running filtered search"
    );

    let records = finder.find_all(filter, order).await?;
    if records.is_empty() {
        return Err(DomainError::not_found(kind.none_found_message()));
    }
    Ok(records)
}

/// Every record of a kind, or not-found when there are none.
pub async fn list_all<T, F>(finder: &F, kind: EntityKind, order: &Order<T>) -> DomainResult<Vec<T>>
where
    T: Entity,
    F: Finder<T> + ?Sized,
{
    search(finder, kind, &Filter::new(), order).await
}

/// Deletes a record by identity.
///
/// A missing identity is a validation error; an identity nothing carries is
/// a not-found error.
pub async fn delete<T, D>(deleter: &D, kind: EntityKind, id: Option<Id>) -> DomainResult<()>
where
    T: Entity,
    D: Deleter<T> + ?Sized,
{
    let Some(id) = id else {
        return Err(DomainError::validation(format!(
            "An id is required to delete this {}.",
            kind.label().to_lowercase()
        )));
    };

    if !deleter.delete_by_id(id).await? {
        return Err(DomainError::missing(kind));
    }

    tracing::info!(entity = %kind, id, "record deleted");
    Ok(())
}
