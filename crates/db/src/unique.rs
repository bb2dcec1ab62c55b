//! Conditional uniqueness of natural keys.
//!
//! A candidate without identity is being created: any record holding the same
//! value is a conflict. A candidate with identity is being updated: only a
//! *different* record holding the value is a conflict, and the store query
//! itself excludes the candidate's own identity.

use bookstore_kernel::{DomainError, DomainResult};

use crate::entity::{Entity, Id};
use crate::store::{Finder, NaturalKey};

/// Which query variant a uniqueness check runs.
///
/// Derived from the candidate on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessScope {
    Create,
    Update(Id),
}

impl UniquenessScope {
    pub fn of<T: Entity>(candidate: &T) -> Self {
        match candidate.id() {
            None => UniquenessScope::Create,
            Some(id) => UniquenessScope::Update(id),
        }
    }
}

/// A natural key together with the messages reported when it collides.
pub struct UniqueConstraint<T> {
    pub key: NaturalKey<T>,
    pub on_create: &'static str,
    pub on_update: &'static str,
}

impl<T: Entity> UniqueConstraint<T> {
    pub const fn new(key: NaturalKey<T>, on_create: &'static str, on_update: &'static str) -> Self {
        Self {
            key,
            on_create,
            on_update,
        }
    }

    /// Fails with a validation error when another record already holds the
    /// candidate's key value.
    pub async fn check<F>(&self, finder: &F, candidate: &T) -> DomainResult<()>
    where
        F: Finder<T> + ?Sized,
    {
        let value = self.key.value_of(candidate);
        let scope = UniquenessScope::of(candidate);

        let (taken, message) = match scope {
            UniquenessScope::Create => (finder.exists_by(self.key, value).await?, self.on_create),
            UniquenessScope::Update(id) => (
                finder.find_one_by(self.key, value, id).await?.is_some(),
                self.on_update,
            ),
        };

        if taken {
            tracing::debug!(key = self.key.name, ?scope, "natural key already taken");
            return Err(DomainError::validation(message));
        }

        Ok(())
    }
}

/// Runs the constraints in order and stops at the first violation.
pub async fn ensure_unique<T, F>(
    finder: &F,
    candidate: &T,
    constraints: &[UniqueConstraint<T>],
) -> DomainResult<()>
where
    T: Entity,
    F: Finder<T> + ?Sized,
{
    for constraint in constraints {
        constraint.check(finder, candidate).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::store::Saver;

    #[derive(Debug, Clone)]
    struct Title {
        id: Option<Id>,
        text: String,
        code: String,
    }

    impl Entity for Title {
        fn id(&self) -> Option<Id> {
            self.id
        }

        fn assign_id(&mut self, id: Id) {
            self.id = Some(id);
        }
    }

    fn text_of(title: &Title) -> &str {
        &title.text
    }

    fn code_of(title: &Title) -> &str {
        &title.code
    }

    const TEXT: UniqueConstraint<Title> = UniqueConstraint::new(
        NaturalKey::new("text", text_of),
        "text taken",
        "text taken on update",
    );

    const CODE: UniqueConstraint<Title> = UniqueConstraint::new(
        NaturalKey::new("code", code_of),
        "code taken",
        "code taken on update",
    );

    fn title(id: Option<Id>, text: &str, code: &str) -> Title {
        Title {
            id,
            text: text.to_string(),
            code: code.to_string(),
        }
    }

    async fn seeded() -> MemoryStore<Title> {
        let store = MemoryStore::<Title>::new();
        store.save(title(None, "Dom Casmurro", "111")).await.unwrap();
        store.save(title(None, "Iracema", "222")).await.unwrap();
        store
    }

    #[test]
    fn scope_follows_identity() {
        assert_eq!(
            UniquenessScope::of(&title(None, "a", "1")),
            UniquenessScope::Create
        );
        assert_eq!(
            UniquenessScope::of(&title(Some(7), "a", "1")),
            UniquenessScope::Update(7)
        );
    }

    #[tokio::test]
    async fn create_conflict_uses_create_message() {
        let store = seeded().await;
        let err = TEXT
            .check(&store, &title(None, "Dom Casmurro", "999"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "text taken");
    }

    #[tokio::test]
    async fn update_ignores_own_record() {
        let store = seeded().await;
        assert!(TEXT
            .check(&store, &title(Some(1), "Dom Casmurro", "111"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn update_conflict_uses_update_message() {
        let store = seeded().await;
        let err = TEXT
            .check(&store, &title(Some(1), "Iracema", "111"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "text taken on update");
    }

    #[tokio::test]
    async fn first_violation_wins() {
        let store = seeded().await;
        let candidate = title(None, "Iracema", "111");

        let err = ensure_unique(&store, &candidate, &[TEXT, CODE])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "text taken");

        let err = ensure_unique(&store, &candidate, &[CODE, TEXT])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "code taken");
    }

    #[tokio::test]
    async fn verdict_is_stable_without_writes() {
        let store = seeded().await;
        let candidate = title(Some(2), "Dom Casmurro", "222");

        let first = TEXT.check(&store, &candidate).await.is_ok();
        let second = TEXT.check(&store, &candidate).await.is_ok();
        assert_eq!(first, second);
        assert!(!first);
    }
}
