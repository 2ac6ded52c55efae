use sqlx::{Postgres, QueryBuilder};

use business::domain::shared::pagination::Pagination;

pub const INVOICE_COLUMNS: &str = "id, service_name, amount, status, date";

/// Builds the paginated list statement.
///
/// An empty `search` produces a statement with no `WHERE` clause at all rather
/// than an always-true predicate. Rows are totally ordered by insertion time,
/// then id, so consecutive pages never overlap on a quiet table.
pub fn build_list_query<'args>(pagination: &Pagination, search: &str) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM invoices", INVOICE_COLUMNS));

    if !search.is_empty() {
        builder
            .push(" WHERE to_tsvector(id::text || ' ' || service_name) @@ plainto_tsquery(")
            .push_bind(search.to_string())
            .push(")");
    }

    builder
        .push(" ORDER BY date, id LIMIT ")
        .push_bind(pagination.limit())
        .push(" OFFSET ")
        .push_bind(pagination.offset());

    builder
}
