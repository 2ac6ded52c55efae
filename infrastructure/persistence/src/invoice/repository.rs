use async_trait::async_trait;
use chrono::Utc;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::invoice::model::Invoice;
use business::domain::invoice::repository::InvoiceRepository;
use business::domain::logger::Severity;
use business::domain::shared::context::OperationContext;
use business::domain::shared::pagination::Pagination;

use super::entity::{InvoiceEntity, amount_to_numeric};
use super::query::{INVOICE_COLUMNS, build_list_query};
use crate::deadline::{DEADLINE_EXCEEDED, within_deadline};

pub struct InvoiceRepositoryPostgres {
    pool: PgPool,
}

impl InvoiceRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Checks a connection out of the pool. It returns to the pool when the
    /// guard drops, whichever way the caller exits.
    async fn acquire(&self, ctx: &OperationContext) -> Result<PoolConnection<Postgres>, RepositoryError> {
        match within_deadline(ctx, self.pool.acquire()).await {
            Some(Ok(connection)) => Ok(connection),
            Some(Err(e)) => Err(RepositoryError::pool_acquire(e)),
            None => Err(RepositoryError::pool_acquire(DEADLINE_EXCEEDED)),
        }
    }
}

/// Decode failures mean the row exists but does not fit the entity.
fn is_decode_error(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::TypeNotFound { .. }
    )
}

/// Folds the deadline outcome and the driver error into the taxonomy.
fn read_outcome<T>(
    outcome: Option<Result<T, sqlx::Error>>,
    query_message: &'static str,
    collect_message: &'static str,
) -> Result<T, RepositoryError> {
    match outcome {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) if is_decode_error(&e) => Err(RepositoryError::mapping(collect_message, e)),
        Some(Err(e)) => Err(RepositoryError::storage(query_message, e)),
        None => Err(RepositoryError::storage(query_message, DEADLINE_EXCEEDED)),
    }
}

fn write_outcome<T>(
    outcome: Option<Result<T, sqlx::Error>>,
    message: &'static str,
) -> Result<T, RepositoryError> {
    match outcome {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(RepositoryError::storage(message, e)),
        None => Err(RepositoryError::storage(message, DEADLINE_EXCEEDED)),
    }
}

#[async_trait]
impl InvoiceRepository for InvoiceRepositoryPostgres {
    async fn create(&self, ctx: &OperationContext, invoice: &Invoice) -> Result<(), RepositoryError> {
        let amount = amount_to_numeric(invoice.amount)
            .map_err(|e| RepositoryError::mapping("failed to create invoice", e))?;

        let mut connection = self.acquire(ctx).await?;

        let outcome = within_deadline(
            ctx,
            sqlx::query(
                "INSERT INTO invoices (id, service_name, amount, status, date) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(invoice.id)
            .bind(invoice.service_name.to_string())
            .bind(amount)
            .bind(invoice.status.to_string())
            .bind(Utc::now())
            .execute(&mut *connection),
        )
        .await;

        write_outcome(outcome, "failed to create invoice")
            .map_err(|e| e.with_severity(Severity::Warn))?;

        Ok(())
    }

    async fn list(
        &self,
        ctx: &OperationContext,
        pagination: &Pagination,
        search: &str,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        let mut query = build_list_query(pagination, search);

        let mut connection = self.acquire(ctx).await?;

        let outcome = within_deadline(
            ctx,
            query
                .build_query_as::<InvoiceEntity>()
                .fetch_all(&mut *connection),
        )
        .await;

        let entities = read_outcome(outcome, "failed to get invoices", "failed to collect invoices")?;

        entities
            .into_iter()
            .map(|e| {
                e.into_domain()
                    .map_err(|cause| RepositoryError::mapping("failed to collect invoices", cause))
            })
            .collect()
    }

    async fn get_by_id(&self, ctx: &OperationContext, id: Uuid) -> Result<Invoice, RepositoryError> {
        let sql = format!("SELECT {} FROM invoices WHERE id = $1", INVOICE_COLUMNS);

        let mut connection = self.acquire(ctx).await?;

        let outcome = within_deadline(
            ctx,
            sqlx::query_as::<_, InvoiceEntity>(&sql)
                .bind(id)
                .fetch_optional(&mut *connection),
        )
        .await;

        let entity = read_outcome(outcome, "failed to get invoice", "failed to collect an invoice")?
            .ok_or(RepositoryError::NotFound)?;

        entity
            .into_domain()
            .map_err(|cause| RepositoryError::mapping("failed to collect an invoice", cause))
    }

    async fn update_by_id(
        &self,
        ctx: &OperationContext,
        id: Uuid,
        invoice: &Invoice,
    ) -> Result<u64, RepositoryError> {
        let amount = amount_to_numeric(invoice.amount)
            .map_err(|e| RepositoryError::mapping("failed to update invoice by id", e))?;

        let mut connection = self.acquire(ctx).await?;

        let outcome = within_deadline(
            ctx,
            sqlx::query("UPDATE invoices SET service_name = $1, amount = $2, status = $3 WHERE id = $4")
                .bind(invoice.service_name.to_string())
                .bind(amount)
                .bind(invoice.status.to_string())
                .bind(id)
                .execute(&mut *connection),
        )
        .await;

        let result = write_outcome(outcome, "failed to update invoice by id")?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, ctx: &OperationContext, id: Uuid) -> Result<u64, RepositoryError> {
        let mut connection = self.acquire(ctx).await?;

        let outcome = within_deadline(
            ctx,
            sqlx::query("DELETE FROM invoices WHERE id = $1")
                .bind(id)
                .execute(&mut *connection),
        )
        .await;

        let result = write_outcome(outcome, "failed to delete an invoice")?;
        Ok(result.rows_affected())
    }
}
