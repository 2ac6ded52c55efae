use async_trait::async_trait;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::shared::context::OperationContext;

pub struct DeleteInvoiceParams {
    pub id: String,
}

#[async_trait]
pub trait DeleteInvoiceUseCase: Send + Sync {
    async fn execute(
        &self,
        ctx: OperationContext,
        params: DeleteInvoiceParams,
    ) -> Result<(), InvoiceError>;
}
