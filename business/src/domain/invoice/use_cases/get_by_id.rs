use async_trait::async_trait;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::model::Invoice;
use crate::domain::shared::context::OperationContext;

pub struct GetInvoiceByIdParams {
    pub id: String,
}

#[async_trait]
pub trait GetInvoiceByIdUseCase: Send + Sync {
    async fn execute(
        &self,
        ctx: OperationContext,
        params: GetInvoiceByIdParams,
    ) -> Result<Invoice, InvoiceError>;
}
