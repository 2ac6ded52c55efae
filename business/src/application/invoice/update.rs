use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::model::Invoice;
use crate::domain::invoice::repository::InvoiceRepository;
use crate::domain::invoice::use_cases::update::{UpdateInvoiceParams, UpdateInvoiceUseCase};
use crate::domain::invoice::validation::{validate_invoice_id, validate_invoice_input};
use crate::domain::logger::Logger;
use crate::domain::shared::context::OperationContext;

pub struct UpdateInvoiceUseCaseImpl {
    pub repository: Arc<dyn InvoiceRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateInvoiceUseCase for UpdateInvoiceUseCaseImpl {
    async fn execute(
        &self,
        ctx: OperationContext,
        params: UpdateInvoiceParams,
    ) -> Result<(), InvoiceError> {
        self.logger
            .info(&format!("Updating invoice: {}", params.id));

        let (id, props) = match (
            validate_invoice_id(&params.id),
            validate_invoice_input(&params.input),
        ) {
            (Ok(id), Ok(props)) => (id, props),
            (id, props) => {
                let violations = id
                    .err()
                    .into_iter()
                    .chain(props.err())
                    .flatten()
                    .collect();
                return Err(InvoiceError::InvalidInput(violations));
            }
        };

        let invoice =
            Invoice::from_repository(id, props.service_name, props.amount, props.status, props.date);

        let affected = self.repository.update_by_id(&ctx, id, &invoice).await?;

        // A missing id still answers as success; only the log tells them apart.
        if affected == 0 {
            self.logger
                .warn(&format!("Update matched no invoice: {}", id));
        } else {
            self.logger.info(&format!("Invoice updated: {}", id));
        }
        Ok(())
    }
}
