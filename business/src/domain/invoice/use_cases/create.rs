use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::validation::InvoiceInput;
use crate::domain::shared::context::OperationContext;

pub struct CreateInvoiceParams {
    pub input: InvoiceInput,
}

#[async_trait]
pub trait CreateInvoiceUseCase: Send + Sync {
    /// Returns the id of the created invoice.
    async fn execute(
        &self,
        ctx: OperationContext,
        params: CreateInvoiceParams,
    ) -> Result<Uuid, InvoiceError>;
}
