//! Bookstore application library
//!
//! Entity modules (books, authors, categories, clients) and the wiring that
//! mounts them into a [`ModuleRegistry`].

pub mod modules;
pub mod utils;

use std::sync::Arc;

use bookstore_db::{MemoryStore, StoreArc};
use bookstore_kernel::{settings::Settings, ModuleRegistry};

use modules::{authors::models::Author, books::models::Book};
use modules::{categories::models::Category, clients::models::Client};

/// Record stores shared by the entity services.
#[derive(Clone)]
pub struct Stores {
    pub books: StoreArc<Book>,
    pub authors: StoreArc<Author>,
    pub categories: StoreArc<Category>,
    pub clients: StoreArc<Client>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(MemoryStore::<Book>::new()),
            authors: Arc::new(MemoryStore::<Author>::new()),
            categories: Arc::new(MemoryStore::<Category>::new()),
            clients: Arc::new(MemoryStore::<Client>::new()),
        }
    }
}

/// Registry holding every bookstore module over the given stores
pub fn build_registry(settings: &Settings, stores: &Stores) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, stores, settings.pagination);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_module() {
        let registry = build_registry(&Settings::default(), &Stores::in_memory());
        let names: Vec<&str> = registry.modules().map(|module| module.name()).collect();
        assert_eq!(names, vec!["authors", "books", "categories", "clients"]);
    }

    #[test]
    fn every_module_contributes_a_migration() {
        let registry = build_registry(&Settings::default(), &Stores::in_memory());
        let migrations = registry.collect_migrations();
        assert_eq!(migrations.len(), 4);
        assert!(migrations
            .iter()
            .all(|(_, migration)| migration.up.contains("DEFINE TABLE")));
    }

    #[test]
    fn natural_keys_have_unique_indexes() {
        let registry = build_registry(&Settings::default(), &Stores::in_memory());
        let ddl_of = |name: &str| -> String {
            registry
                .collect_migrations()
                .into_iter()
                .filter(|(module, _)| module == name)
                .map(|(_, migration)| migration.up)
                .collect()
        };

        let books = ddl_of("books");
        assert!(books.contains("ON book FIELDS title UNIQUE"));
        assert!(books.contains("ON book FIELDS isbn UNIQUE"));
        assert!(ddl_of("authors").contains("ON author FIELDS name UNIQUE"));
        assert!(!ddl_of("clients").contains("UNIQUE"));
    }
}
