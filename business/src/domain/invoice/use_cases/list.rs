use async_trait::async_trait;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::model::Invoice;
use crate::domain::shared::context::OperationContext;

/// Raw paging input; zero means "use the default".
pub struct ListInvoicesParams {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
}

#[async_trait]
pub trait ListInvoicesUseCase: Send + Sync {
    async fn execute(
        &self,
        ctx: OperationContext,
        params: ListInvoicesParams,
    ) -> Result<Vec<Invoice>, InvoiceError>;
}
