//! Port for card templates.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::Template;

use super::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Template, StoreError>;

    /// Insert a template, filling in its identifier and timestamps.
    async fn create(&self, template: &mut Template) -> Result<(), StoreError>;

    /// Update title, description and data, guarded by `updated_at`.
    async fn update(&self, template: &mut Template) -> Result<(), StoreError>;

    /// One page of templates ordered by identifier.
    async fn list(&self, page: PageRequest) -> Result<Vec<Template>, StoreError>;
}
