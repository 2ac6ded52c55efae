use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::invoice::model::Invoice;
use business::domain::invoice::value_objects::{InvoiceStatus, ServiceName};

#[derive(Debug, FromRow)]
pub struct InvoiceEntity {
    pub id: Uuid,
    pub service_name: String,
    pub amount: BigDecimal,
    pub status: String,
    pub date: DateTime<Utc>,
}

impl InvoiceEntity {
    /// Fails with a description of the first column that does not map back.
    pub fn into_domain(self) -> Result<Invoice, String> {
        let service_name = self.service_name.parse::<ServiceName>()?;
        let status = self.status.parse::<InvoiceStatus>()?;
        // Parse the decimal text so the value written by `amount_to_numeric` reads back unchanged
        let amount = self
            .amount
            .to_string()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or_else(|| format!("Amount out of range: {}", self.amount))?;

        Ok(Invoice::from_repository(
            self.id,
            service_name,
            amount,
            status,
            self.date,
        ))
    }
}

/// Converts a domain amount into `NUMERIC` using its shortest decimal form.
pub fn amount_to_numeric(amount: f64) -> Result<BigDecimal, String> {
    if !amount.is_finite() {
        return Err(format!("Amount is not finite: {}", amount));
    }
    BigDecimal::from_str(&amount.to_string()).map_err(|e| e.to_string())
}
