use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::repository::InvoiceRepository;
use crate::domain::invoice::use_cases::delete::{DeleteInvoiceParams, DeleteInvoiceUseCase};
use crate::domain::invoice::validation::validate_invoice_id;
use crate::domain::logger::Logger;
use crate::domain::shared::context::OperationContext;

pub struct DeleteInvoiceUseCaseImpl {
    pub repository: Arc<dyn InvoiceRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteInvoiceUseCase for DeleteInvoiceUseCaseImpl {
    async fn execute(
        &self,
        ctx: OperationContext,
        params: DeleteInvoiceParams,
    ) -> Result<(), InvoiceError> {
        self.logger
            .info(&format!("Deleting invoice: {}", params.id));

        let id = validate_invoice_id(&params.id).map_err(InvoiceError::InvalidInput)?;

        let affected = self.repository.delete_by_id(&ctx, id).await?;

        if affected == 0 {
            self.logger
                .warn(&format!("Delete matched no invoice: {}", id));
        } else {
            self.logger.info(&format!("Invoice deleted: {}", id));
        }
        Ok(())
    }
}
