use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::model::Invoice;
use crate::domain::invoice::repository::InvoiceRepository;
use crate::domain::invoice::use_cases::create::{CreateInvoiceParams, CreateInvoiceUseCase};
use crate::domain::invoice::validation::validate_invoice_input;
use crate::domain::logger::Logger;
use crate::domain::shared::context::OperationContext;

pub struct CreateInvoiceUseCaseImpl {
    pub repository: Arc<dyn InvoiceRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateInvoiceUseCase for CreateInvoiceUseCaseImpl {
    async fn execute(
        &self,
        ctx: OperationContext,
        params: CreateInvoiceParams,
    ) -> Result<Uuid, InvoiceError> {
        self.logger.info(&format!(
            "Creating invoice for service: {}",
            params.input.service_name
        ));

        let props = validate_invoice_input(&params.input).map_err(InvoiceError::InvalidInput)?;
        let invoice = Invoice::new(props);

        self.repository.create(&ctx, &invoice).await?;

        self.logger
            .info(&format!("Invoice created with id: {}", invoice.id));
        Ok(invoice.id)
    }
}
