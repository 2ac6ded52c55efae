use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::model::Invoice;
use crate::domain::invoice::repository::InvoiceRepository;
use crate::domain::invoice::use_cases::list::{ListInvoicesParams, ListInvoicesUseCase};
use crate::domain::logger::Logger;
use crate::domain::shared::context::OperationContext;
use crate::domain::shared::pagination::Pagination;

pub struct ListInvoicesUseCaseImpl {
    pub repository: Arc<dyn InvoiceRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListInvoicesUseCase for ListInvoicesUseCaseImpl {
    async fn execute(
        &self,
        ctx: OperationContext,
        params: ListInvoicesParams,
    ) -> Result<Vec<Invoice>, InvoiceError> {
        let pagination = Pagination::normalized(params.page, params.page_size);
        let search = params.search.trim();

        self.logger.info(&format!(
            "Listing invoices: page={} page_size={} search={:?}",
            pagination.page(),
            pagination.page_size(),
            search
        ));

        let invoices = self.repository.list(&ctx, &pagination, search).await?;

        self.logger
            .debug(&format!("Listed {} invoices", invoices.len()));
        Ok(invoices)
    }
}
