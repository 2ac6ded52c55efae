use std::sync::Arc;
use std::time::Duration;

use poem_openapi::{
    ApiResponse, OpenApi,
    param::{Path, Query},
    payload::Json,
};

use business::domain::invoice::use_cases::create::{CreateInvoiceParams, CreateInvoiceUseCase};
use business::domain::invoice::use_cases::delete::{DeleteInvoiceParams, DeleteInvoiceUseCase};
use business::domain::invoice::use_cases::get_by_id::{
    GetInvoiceByIdParams, GetInvoiceByIdUseCase,
};
use business::domain::invoice::use_cases::list::{ListInvoicesParams, ListInvoicesUseCase};
use business::domain::invoice::use_cases::update::{UpdateInvoiceParams, UpdateInvoiceUseCase};
use business::domain::logger::{LogField, Logger, Severity};
use business::domain::shared::context::OperationContext;

use crate::api::invoice::dto::{CreatedInvoiceResponse, InvoiceRequest, InvoiceResponse};
use crate::api::invoice::error_mapper::into_api_error;
use crate::api::tags::ApiTags;

pub struct InvoiceApi {
    create_use_case: Arc<dyn CreateInvoiceUseCase>,
    list_use_case: Arc<dyn ListInvoicesUseCase>,
    get_by_id_use_case: Arc<dyn GetInvoiceByIdUseCase>,
    update_use_case: Arc<dyn UpdateInvoiceUseCase>,
    delete_use_case: Arc<dyn DeleteInvoiceUseCase>,
    logger: Arc<dyn Logger>,
    request_timeout: Duration,
}

impl InvoiceApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_use_case: Arc<dyn CreateInvoiceUseCase>,
        list_use_case: Arc<dyn ListInvoicesUseCase>,
        get_by_id_use_case: Arc<dyn GetInvoiceByIdUseCase>,
        update_use_case: Arc<dyn UpdateInvoiceUseCase>,
        delete_use_case: Arc<dyn DeleteInvoiceUseCase>,
        logger: Arc<dyn Logger>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            create_use_case,
            list_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            logger,
            request_timeout,
        }
    }

    fn context(&self) -> OperationContext {
        OperationContext::with_timeout(self.request_timeout)
    }

    fn finished(&self, method: &'static str) {
        self.logger.log(
            Severity::Info,
            "successfully finished",
            &[LogField::new("method", method)],
        );
    }
}

/// Invoice management API
///
/// Endpoints for creating, listing, reading, updating, and deleting invoices.
/// Failures answer with an empty body and the status alone.
#[OpenApi]
impl InvoiceApi {
    /// Create an invoice
    ///
    /// The stored date is the server insertion time; the `date` sent is
    /// required but not persisted.
    #[oai(path = "/invoices", method = "post", tag = "ApiTags::Invoices")]
    async fn create_invoice(
        &self,
        body: Json<InvoiceRequest>,
    ) -> poem::Result<CreateInvoiceResponse> {
        let id = self
            .create_use_case
            .execute(
                self.context(),
                CreateInvoiceParams {
                    input: body.0.into(),
                },
            )
            .await
            .map_err(|err| into_api_error(err, "CreateInvoice"))?;

        self.finished("CreateInvoice");
        Ok(CreateInvoiceResponse::Created(Json(CreatedInvoiceResponse {
            id,
        })))
    }

    /// List invoices
    ///
    /// Ordered by date. `page` and `pageSize` default to 1 and 50;
    /// `search` runs a full-text match over id and service name.
    #[oai(path = "/invoices", method = "get", tag = "ApiTags::Invoices")]
    async fn list_invoices(
        &self,
        page: Query<Option<u32>>,
        #[oai(name = "pageSize")] page_size: Query<Option<u32>>,
        search: Query<Option<String>>,
    ) -> poem::Result<ListInvoicesResponse> {
        let invoices = self
            .list_use_case
            .execute(
                self.context(),
                ListInvoicesParams {
                    page: page.0.unwrap_or_default(),
                    page_size: page_size.0.unwrap_or_default(),
                    search: search.0.unwrap_or_default(),
                },
            )
            .await
            .map_err(|err| into_api_error(err, "GetInvoices"))?;

        self.finished("GetInvoices");
        Ok(ListInvoicesResponse::Ok(Json(
            invoices.into_iter().map(InvoiceResponse::from).collect(),
        )))
    }

    /// Get an invoice by ID
    #[oai(path = "/invoices/:id", method = "get", tag = "ApiTags::Invoices")]
    async fn get_invoice_by_id(&self, id: Path<String>) -> poem::Result<GetInvoiceByIdResponse> {
        let invoice = self
            .get_by_id_use_case
            .execute(self.context(), GetInvoiceByIdParams { id: id.0 })
            .await
            .map_err(|err| into_api_error(err, "GetInvoiceById"))?;

        self.finished("GetInvoiceById");
        Ok(GetInvoiceByIdResponse::Ok(Json(invoice.into())))
    }

    /// Update an invoice
    ///
    /// Replaces service name, amount and status. The date is never changed.
    /// An unknown id still answers 204.
    #[oai(path = "/invoices/:id", method = "put", tag = "ApiTags::Invoices")]
    async fn update_invoice(
        &self,
        id: Path<String>,
        body: Json<InvoiceRequest>,
    ) -> poem::Result<UpdateInvoiceResponse> {
        self.update_use_case
            .execute(
                self.context(),
                UpdateInvoiceParams {
                    id: id.0,
                    input: body.0.into(),
                },
            )
            .await
            .map_err(|err| into_api_error(err, "UpdateInvoiceById"))?;

        self.finished("UpdateInvoiceById");
        Ok(UpdateInvoiceResponse::NoContent)
    }

    /// Delete an invoice
    ///
    /// An unknown id still answers 204.
    #[oai(path = "/invoices/:id", method = "delete", tag = "ApiTags::Invoices")]
    async fn delete_invoice(&self, id: Path<String>) -> poem::Result<DeleteInvoiceResponse> {
        self.delete_use_case
            .execute(self.context(), DeleteInvoiceParams { id: id.0 })
            .await
            .map_err(|err| into_api_error(err, "DeleteInvoiceById"))?;

        self.finished("DeleteInvoiceById");
        Ok(DeleteInvoiceResponse::NoContent)
    }
}

#[derive(ApiResponse)]
pub enum CreateInvoiceResponse {
    #[oai(status = 201)]
    Created(Json<CreatedInvoiceResponse>),
}

#[derive(ApiResponse)]
pub enum ListInvoicesResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<InvoiceResponse>>),
}

#[derive(ApiResponse)]
pub enum GetInvoiceByIdResponse {
    #[oai(status = 200)]
    Ok(Json<InvoiceResponse>),
}

#[derive(ApiResponse)]
pub enum UpdateInvoiceResponse {
    #[oai(status = 204)]
    NoContent,
}

#[derive(ApiResponse)]
pub enum DeleteInvoiceResponse {
    #[oai(status = 204)]
    NoContent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use business::domain::errors::RepositoryError;
    use business::domain::invoice::errors::InvoiceError;
    use business::domain::invoice::model::Invoice;
    use business::domain::invoice::validation::FieldViolation;
    use business::domain::invoice::value_objects::{InvoiceStatus, ServiceName};
    use chrono::Utc;
    use logger::TracingLogger;
    use mockall::mock;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use serde_json::json;
    use uuid::Uuid;

    use crate::api::health::routes::HealthApi;
    use crate::api::metrics::{MetricsApi, MetricsStore};
    use crate::setup::dependency_injection::DependencyContainer;
    use crate::setup::server::build_app;

    mock! {
        pub CreateUseCase {}

        #[async_trait]
        impl CreateInvoiceUseCase for CreateUseCase {
            async fn execute(&self, ctx: OperationContext, params: CreateInvoiceParams) -> Result<Uuid, InvoiceError>;
        }
    }

    mock! {
        pub ListUseCase {}

        #[async_trait]
        impl ListInvoicesUseCase for ListUseCase {
            async fn execute(&self, ctx: OperationContext, params: ListInvoicesParams) -> Result<Vec<Invoice>, InvoiceError>;
        }
    }

    mock! {
        pub GetByIdUseCase {}

        #[async_trait]
        impl GetInvoiceByIdUseCase for GetByIdUseCase {
            async fn execute(&self, ctx: OperationContext, params: GetInvoiceByIdParams) -> Result<Invoice, InvoiceError>;
        }
    }

    mock! {
        pub UpdateUseCase {}

        #[async_trait]
        impl UpdateInvoiceUseCase for UpdateUseCase {
            async fn execute(&self, ctx: OperationContext, params: UpdateInvoiceParams) -> Result<(), InvoiceError>;
        }
    }

    mock! {
        pub DeleteUseCase {}

        #[async_trait]
        impl DeleteInvoiceUseCase for DeleteUseCase {
            async fn execute(&self, ctx: OperationContext, params: DeleteInvoiceParams) -> Result<(), InvoiceError>;
        }
    }

    #[derive(Default)]
    struct Mocks {
        create: MockCreateUseCase,
        list: MockListUseCase,
        get_by_id: MockGetByIdUseCase,
        update: MockUpdateUseCase,
        delete: MockDeleteUseCase,
    }

    /// Deletes nothing; fails the way a bug in a use case would.
    struct PanickingDelete;

    #[async_trait]
    impl DeleteInvoiceUseCase for PanickingDelete {
        async fn execute(
            &self,
            _ctx: OperationContext,
            _params: DeleteInvoiceParams,
        ) -> Result<(), InvoiceError> {
            panic!("delete use case crashed")
        }
    }

    fn container(mocks: Mocks) -> DependencyContainer {
        let Mocks {
            create,
            list,
            get_by_id,
            update,
            delete,
        } = mocks;
        container_with_delete(
            Mocks {
                create,
                list,
                get_by_id,
                update,
                ..Mocks::default()
            },
            Arc::new(delete),
        )
    }

    fn container_with_delete(
        mocks: Mocks,
        delete: Arc<dyn DeleteInvoiceUseCase>,
    ) -> DependencyContainer {
        let logger = Arc::new(TracingLogger);
        let metrics = Arc::new(MetricsStore::new());
        let invoice_api = InvoiceApi::new(
            Arc::new(mocks.create),
            Arc::new(mocks.list),
            Arc::new(mocks.get_by_id),
            Arc::new(mocks.update),
            delete,
            logger.clone(),
            Duration::from_secs(30),
        );
        DependencyContainer {
            logger,
            health_api: HealthApi::new(),
            invoice_api,
            metrics_api: MetricsApi::new(metrics.clone()),
            metrics,
        }
    }

    fn client(mocks: Mocks) -> TestClient<impl poem::Endpoint> {
        TestClient::new(build_app(container(mocks), "http://localhost:8080"))
    }

    fn invoice(service_name: ServiceName) -> Invoice {
        Invoice::from_repository(
            Uuid::new_v4(),
            service_name,
            120.3,
            InvoiceStatus::Paid,
            Utc::now(),
        )
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "serviceName": "DMP",
            "amount": 120.3,
            "status": "PENDING",
            "date": "2024-01-15T10:00:00Z",
        })
    }

    #[tokio::test]
    async fn should_create_invoice_and_return_its_id() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::default();
        mocks
            .create
            .expect_execute()
            .withf(|ctx, params| {
                ctx.deadline().is_some()
                    && params.input.service_name == "DMP"
                    && params.input.status == "PENDING"
                    && params.input.date.is_some()
            })
            .times(1)
            .returning(move |_, _| Ok(id));

        let resp = client(mocks)
            .post("/invoices")
            .body_json(&valid_body())
            .send()
            .await;

        resp.assert_status(StatusCode::CREATED);
        resp.assert_json(json!({ "id": id })).await;
    }

    #[tokio::test]
    async fn should_answer_bad_request_with_empty_body_on_violation() {
        let mut mocks = Mocks::default();
        mocks.create.expect_execute().times(1).returning(|_, _| {
            Err(InvoiceError::InvalidInput(vec![FieldViolation::new(
                "serviceName",
                "one_of=DMP SSP",
            )]))
        });

        let resp = client(mocks)
            .post("/invoices")
            .body_json(&json!({ "serviceName": "XYZ", "amount": 10.0, "status": "PAID" }))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_text("").await;
    }

    #[tokio::test]
    async fn should_reject_malformed_json_before_use_case() {
        let mut mocks = Mocks::default();
        mocks.create.expect_execute().never();

        let resp = client(mocks)
            .post("/invoices")
            .content_type("application/json")
            .body("{not json")
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_forward_paging_and_search_to_list() {
        let mut mocks = Mocks::default();
        mocks
            .list
            .expect_execute()
            .withf(|_, params| {
                params.page == 2 && params.page_size == 10 && params.search == "DMP"
            })
            .times(1)
            .returning(|_, _| Ok(vec![invoice(ServiceName::Dmp)]));

        let resp = client(mocks)
            .get("/invoices")
            .query("page", &2)
            .query("pageSize", &10)
            .query("search", &"DMP")
            .send()
            .await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        let invoices = json.value().array();
        invoices.assert_len(1);
        invoices
            .get(0)
            .object()
            .get("serviceName")
            .assert_string("DMP");
        invoices.get(0).object().get("status").assert_string("PAID");
    }

    #[tokio::test]
    async fn should_pass_zero_paging_when_query_is_absent() {
        let mut mocks = Mocks::default();
        mocks
            .list
            .expect_execute()
            .withf(|_, params| params.page == 0 && params.page_size == 0 && params.search.is_empty())
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let resp = client(mocks).get("/invoices").send().await;

        resp.assert_status_is_ok();
        resp.assert_json(json!([])).await;
    }

    #[tokio::test]
    async fn should_reject_negative_page() {
        let mut mocks = Mocks::default();
        mocks.list.expect_execute().never();

        let resp = client(mocks)
            .get("/invoices")
            .query("page", &-1)
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_answer_not_found_for_missing_invoice() {
        let mut mocks = Mocks::default();
        mocks
            .get_by_id
            .expect_execute()
            .times(1)
            .returning(|_, _| Err(InvoiceError::NotFound));

        let resp = client(mocks)
            .get(format!("/invoices/{}", Uuid::new_v4()))
            .send()
            .await;

        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_text("").await;
    }

    #[tokio::test]
    async fn should_return_invoice_by_id() {
        let found = invoice(ServiceName::Ssp);
        let id = found.id;
        let mut mocks = Mocks::default();
        mocks
            .get_by_id
            .expect_execute()
            .withf(move |_, params| params.id == id.to_string())
            .times(1)
            .returning(move |_, _| Ok(found.clone()));

        let resp = client(mocks)
            .get(format!("/invoices/{}", id))
            .send()
            .await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        json.value().object().get("id").assert_string(&id.to_string());
        json.value().object().get("serviceName").assert_string("SSP");
    }

    #[tokio::test]
    async fn should_answer_no_content_on_update() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::default();
        mocks
            .update
            .expect_execute()
            .withf(move |_, params| params.id == id.to_string() && params.input.amount == 120.3)
            .times(1)
            .returning(|_, _| Ok(()));

        let resp = client(mocks)
            .put(format!("/invoices/{}", id))
            .body_json(&valid_body())
            .send()
            .await;

        resp.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn should_answer_no_content_on_delete() {
        let mut mocks = Mocks::default();
        mocks.delete.expect_execute().times(1).returning(|_, _| Ok(()));

        let resp = client(mocks)
            .delete(format!("/invoices/{}", Uuid::new_v4()))
            .send()
            .await;

        resp.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn should_answer_internal_error_with_empty_body_on_storage_failure() {
        let mut mocks = Mocks::default();
        mocks.delete.expect_execute().times(1).returning(|_, _| {
            Err(InvoiceError::Repository(RepositoryError::storage(
                "failed to delete an invoice",
                "connection reset",
            )))
        });

        let resp = client(mocks)
            .delete(format!("/invoices/{}", Uuid::new_v4()))
            .send()
            .await;

        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        resp.assert_text("").await;
    }

    #[tokio::test]
    async fn should_answer_internal_error_with_empty_body_when_use_case_panics() {
        let container = container_with_delete(Mocks::default(), Arc::new(PanickingDelete));
        let cli = TestClient::new(build_app(container, "http://localhost:8080"));

        let resp = cli
            .delete(format!("/invoices/{}", Uuid::new_v4()))
            .send()
            .await;

        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        resp.assert_text("").await;

        let resp = cli.get("/health").send().await;
        resp.assert_status_is_ok();
    }

    #[tokio::test]
    async fn should_record_translated_statuses_in_metrics() {
        let mut mocks = Mocks::default();
        mocks.list.expect_execute().times(2).returning(|_, _| Ok(vec![]));
        mocks
            .get_by_id
            .expect_execute()
            .times(1)
            .returning(|_, _| Err(InvoiceError::NotFound));
        let container = container(mocks);
        let metrics = container.metrics.clone();
        let cli = TestClient::new(build_app(container, "http://localhost:8080"));

        cli.get("/invoices").send().await.assert_status_is_ok();
        cli.get("/invoices").send().await.assert_status_is_ok();
        cli.get(format!("/invoices/{}", Uuid::new_v4()))
            .send()
            .await
            .assert_status(StatusCode::NOT_FOUND);
        cli.get("/receipts")
            .send()
            .await
            .assert_status(StatusCode::NOT_FOUND);
        cli.get("/health").send().await.assert_status_is_ok();

        assert_eq!(metrics.request_count("GET", "/invoices", 200), 2);
        assert_eq!(metrics.request_count("GET", "/invoices/{id}", 404), 1);
        assert_eq!(metrics.request_count("GET", "other", 404), 1);

        let resp = cli.get("/metrics").send().await;
        resp.assert_status_is_ok();
        let text = resp.0.into_body().into_string().await.unwrap();
        assert!(text.contains(
            "http_requests_total{method=\"GET\",path=\"/invoices\",status=\"200\"} 2"
        ));
        assert!(text.contains(
            "http_request_duration_seconds_count{method=\"GET\",path=\"/invoices\"} 2"
        ));
        assert!(!text.contains("/health"));
        assert!(!text.contains("path=\"/metrics\""));
    }

    #[tokio::test]
    async fn should_serve_with_server_url_built_at_call_site() {
        let app = build_app(
            container(Mocks::default()),
            &format!("http://{}:{}", "127.0.0.1", 8080),
        );
        let cli = TestClient::new(app);

        let resp = cli.get("/openapi.json").send().await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        json.value()
            .object()
            .get("servers")
            .array()
            .get(0)
            .object()
            .get("url")
            .assert_string("http://127.0.0.1:8080");
    }

    #[tokio::test]
    async fn should_answer_not_found_for_unknown_route() {
        let resp = client(Mocks::default()).get("/receipts").send().await;

        resp.assert_status(StatusCode::NOT_FOUND);
    }
}
