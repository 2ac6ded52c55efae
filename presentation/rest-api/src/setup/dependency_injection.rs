use std::sync::Arc;
use std::time::Duration;

use business::application::invoice::create::CreateInvoiceUseCaseImpl;
use business::application::invoice::delete::DeleteInvoiceUseCaseImpl;
use business::application::invoice::get_by_id::GetInvoiceByIdUseCaseImpl;
use business::application::invoice::list::ListInvoicesUseCaseImpl;
use business::application::invoice::update::UpdateInvoiceUseCaseImpl;
use business::domain::logger::Logger;
use logger::TracingLogger;
use persistence::invoice::repository::InvoiceRepositoryPostgres;

use crate::api::health::routes::HealthApi;
use crate::api::invoice::routes::InvoiceApi;
use crate::api::metrics::{MetricsApi, MetricsStore};

pub struct DependencyContainer {
    pub logger: Arc<dyn Logger>,
    pub health_api: HealthApi,
    pub invoice_api: InvoiceApi,
    pub metrics: Arc<MetricsStore>,
    pub metrics_api: MetricsApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, request_timeout: Duration) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let metrics = Arc::new(MetricsStore::new());

        // Infrastructure adapters
        let invoice_repository = Arc::new(InvoiceRepositoryPostgres::new(pool));

        // Invoice use cases
        let create_use_case = Arc::new(CreateInvoiceUseCaseImpl {
            repository: invoice_repository.clone(),
            logger: logger.clone(),
        });
        let list_use_case = Arc::new(ListInvoicesUseCaseImpl {
            repository: invoice_repository.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetInvoiceByIdUseCaseImpl {
            repository: invoice_repository.clone(),
            logger: logger.clone(),
        });
        let update_use_case = Arc::new(UpdateInvoiceUseCaseImpl {
            repository: invoice_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteInvoiceUseCaseImpl {
            repository: invoice_repository,
            logger: logger.clone(),
        });

        let invoice_api = InvoiceApi::new(
            create_use_case,
            list_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            logger.clone(),
            request_timeout,
        );

        Self {
            logger,
            health_api: HealthApi::new(),
            invoice_api,
            metrics_api: MetricsApi::new(metrics.clone()),
            metrics,
        }
    }
}
