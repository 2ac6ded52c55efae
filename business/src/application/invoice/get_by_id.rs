use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::model::Invoice;
use crate::domain::invoice::repository::InvoiceRepository;
use crate::domain::invoice::use_cases::get_by_id::{GetInvoiceByIdParams, GetInvoiceByIdUseCase};
use crate::domain::invoice::validation::validate_invoice_id;
use crate::domain::logger::Logger;
use crate::domain::shared::context::OperationContext;

pub struct GetInvoiceByIdUseCaseImpl {
    pub repository: Arc<dyn InvoiceRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetInvoiceByIdUseCase for GetInvoiceByIdUseCaseImpl {
    async fn execute(
        &self,
        ctx: OperationContext,
        params: GetInvoiceByIdParams,
    ) -> Result<Invoice, InvoiceError> {
        self.logger
            .info(&format!("Fetching invoice by id: {}", params.id));

        let id = validate_invoice_id(&params.id).map_err(InvoiceError::InvalidInput)?;

        let invoice = self
            .repository
            .get_by_id(&ctx, id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => InvoiceError::NotFound,
                other => InvoiceError::Repository(other),
            })?;

        Ok(invoice)
    }
}
