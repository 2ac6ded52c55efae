use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::context::OperationContext;
use crate::domain::shared::pagination::Pagination;

use super::model::Invoice;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Inserts `invoice` stamped with the current time; `invoice.date` is ignored.
    async fn create(&self, ctx: &OperationContext, invoice: &Invoice)
    -> Result<(), RepositoryError>;

    /// An empty `search` applies no filter.
    async fn list(
        &self,
        ctx: &OperationContext,
        pagination: &Pagination,
        search: &str,
    ) -> Result<Vec<Invoice>, RepositoryError>;

    async fn get_by_id(&self, ctx: &OperationContext, id: Uuid)
    -> Result<Invoice, RepositoryError>;

    /// Rewrites service name, amount and status. Returns the affected row count.
    async fn update_by_id(
        &self,
        ctx: &OperationContext,
        id: Uuid,
        invoice: &Invoice,
    ) -> Result<u64, RepositoryError>;

    /// Returns the affected row count; zero is not an error.
    async fn delete_by_id(&self, ctx: &OperationContext, id: Uuid)
    -> Result<u64, RepositoryError>;
}
