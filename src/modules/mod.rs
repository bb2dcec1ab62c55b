pub mod authors;
pub mod books;
pub mod categories;
pub mod clients;

use std::sync::Arc;

use bookstore_kernel::{settings::PaginationSettings, ModuleRegistry};

use crate::Stores;

/// Router state shared by a module's handlers.
pub struct ApiState<S> {
    pub service: Arc<S>,
    pub pagination: PaginationSettings,
}

impl<S> ApiState<S> {
    pub fn new(service: Arc<S>, pagination: PaginationSettings) -> Self {
        Self {
            service,
            pagination,
        }
    }
}

impl<S> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            pagination: self.pagination,
        }
    }
}

/// Register every bookstore module, all sharing the same stores
pub fn register_all(registry: &mut ModuleRegistry, stores: &Stores, pagination: PaginationSettings) {
    registry.register(authors::create_module(stores, pagination));
    registry.register(books::create_module(stores, pagination));
    registry.register(categories::create_module(stores, pagination));
    registry.register(clients::create_module(stores, pagination));
}
