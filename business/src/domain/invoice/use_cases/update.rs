use async_trait::async_trait;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::validation::InvoiceInput;
use crate::domain::shared::context::OperationContext;

pub struct UpdateInvoiceParams {
    pub id: String,
    pub input: InvoiceInput,
}

#[async_trait]
pub trait UpdateInvoiceUseCase: Send + Sync {
    async fn execute(
        &self,
        ctx: OperationContext,
        params: UpdateInvoiceParams,
    ) -> Result<(), InvoiceError>;
}
