use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::domain::invoice::model::Invoice;
use business::domain::invoice::validation::InvoiceInput;
use business::domain::invoice::value_objects::{InvoiceStatus, ServiceName};

#[derive(Debug, Clone, Serialize, Deserialize, Enum)]
pub enum ServiceNameDto {
    #[oai(rename = "DMP")]
    Dmp,
    #[oai(rename = "SSP")]
    Ssp,
}

impl From<ServiceName> for ServiceNameDto {
    fn from(service_name: ServiceName) -> Self {
        match service_name {
            ServiceName::Dmp => ServiceNameDto::Dmp,
            ServiceName::Ssp => ServiceNameDto::Ssp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Enum)]
pub enum InvoiceStatusDto {
    #[oai(rename = "PAID")]
    Paid,
    #[oai(rename = "UNPAID")]
    Unpaid,
    #[oai(rename = "PENDING")]
    Pending,
}

impl From<InvoiceStatus> for InvoiceStatusDto {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Paid => InvoiceStatusDto::Paid,
            InvoiceStatus::Unpaid => InvoiceStatusDto::Unpaid,
            InvoiceStatus::Pending => InvoiceStatusDto::Pending,
        }
    }
}

/// Invoice payload for create and update.
///
/// Fields are taken as sent and checked by the use case, so a bad value
/// yields a field violation instead of a parse error.
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
#[oai(rename_all = "camelCase")]
pub struct InvoiceRequest {
    /// One of DMP, SSP
    #[oai(default)]
    pub service_name: String,
    /// Must be greater than zero
    #[oai(default)]
    pub amount: f64,
    /// One of PAID, UNPAID, PENDING
    #[oai(default)]
    pub status: String,
    /// Required, but the stored date is the server insertion time
    pub date: Option<DateTime<Utc>>,
}

impl From<InvoiceRequest> for InvoiceInput {
    fn from(request: InvoiceRequest) -> Self {
        InvoiceInput {
            service_name: request.service_name,
            amount: request.amount,
            status: request.status,
            date: request.date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CreatedInvoiceResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
#[oai(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub service_name: ServiceNameDto,
    pub amount: f64,
    pub status: InvoiceStatusDto,
    pub date: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        InvoiceResponse {
            id: invoice.id,
            service_name: invoice.service_name.into(),
            amount: invoice.amount,
            status: invoice.status.into(),
            date: invoice.date,
        }
    }
}
