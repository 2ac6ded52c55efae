use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::NewInvoiceProps;
use super::value_objects::{InvoiceStatus, ServiceName};

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: &'static str,
}

impl FieldViolation {
    pub fn new(field: &'static str, rule: &'static str) -> Self {
        Self { field, rule }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.rule)
    }
}

/// Raw invoice payload as received from a client, before any checks.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceInput {
    pub service_name: String,
    pub amount: f64,
    pub status: String,
    pub date: Option<DateTime<Utc>>,
}

/// Checks every field and reports all violations at once.
pub fn validate_invoice_input(input: &InvoiceInput) -> Result<NewInvoiceProps, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let service_name = if input.service_name.is_empty() {
        violations.push(FieldViolation::new("serviceName", "required"));
        None
    } else {
        input
            .service_name
            .parse::<ServiceName>()
            .map_err(|_| violations.push(FieldViolation::new("serviceName", "one_of=DMP SSP")))
            .ok()
    };

    if !input.amount.is_finite() || input.amount <= 0.0 {
        violations.push(FieldViolation::new("amount", "greater_than_zero"));
    }

    let status = if input.status.is_empty() {
        violations.push(FieldViolation::new("status", "required"));
        None
    } else {
        input
            .status
            .parse::<InvoiceStatus>()
            .map_err(|_| {
                violations.push(FieldViolation::new("status", "one_of=PAID UNPAID PENDING"))
            })
            .ok()
    };

    if input.date.is_none() {
        violations.push(FieldViolation::new("date", "required"));
    }

    match (service_name, status, input.date) {
        (Some(service_name), Some(status), Some(date)) if violations.is_empty() => {
            Ok(NewInvoiceProps {
                service_name,
                amount: input.amount,
                status,
                date,
            })
        }
        _ => Err(violations),
    }
}

/// Accepts only hyphenated UUID v4 strings.
pub fn validate_invoice_id(raw: &str) -> Result<Uuid, Vec<FieldViolation>> {
    if raw.is_empty() {
        return Err(vec![FieldViolation::new("id", "required")]);
    }

    match Uuid::parse_str(raw) {
        Ok(id) if raw.len() == 36 && id.get_version_num() == 4 => Ok(id),
        _ => Err(vec![FieldViolation::new("id", "uuid4")]),
    }
}
