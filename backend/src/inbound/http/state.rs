//! Shared HTTP adapter state.

use crate::domain::Storage;

/// Dependencies handed to handlers through `web::Data`.
///
/// Handlers only see repository ports, so tests swap in mocks.
#[derive(Clone)]
pub struct HttpState {
    pub storage: Storage,
}

impl HttpState {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}
