use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::{InvoiceStatus, ServiceName};

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub service_name: ServiceName,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInvoiceProps {
    pub service_name: ServiceName,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
}

impl Invoice {
    /// Builds a not-yet-persisted invoice with a fresh v4 id.
    ///
    /// `date` is whatever the client sent; the repository stamps its own
    /// insertion time instead.
    pub fn new(props: NewInvoiceProps) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_name: props.service_name,
            amount: props.amount,
            status: props.status,
            date: props.date,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        service_name: ServiceName,
        amount: f64,
        status: InvoiceStatus,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            service_name,
            amount,
            status,
            date,
        }
    }
}
