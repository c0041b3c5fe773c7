pub mod api;
pub mod days;
pub mod extract;
pub mod health;
pub mod home;

use crate::repositories::StoreHandle;

/// Shared by every handler; cloning only bumps the store's reference count.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreHandle,
}

impl AppState {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }
}
