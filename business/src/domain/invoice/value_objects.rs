use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceName {
    Dmp,
    Ssp,
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceName::Dmp => write!(f, "DMP"),
            ServiceName::Ssp => write!(f, "SSP"),
        }
    }
}

impl std::str::FromStr for ServiceName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DMP" => Ok(ServiceName::Dmp),
            "SSP" => Ok(ServiceName::Ssp),
            _ => Err(format!("Invalid service name: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    Pending,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Paid => write!(f, "PAID"),
            InvoiceStatus::Unpaid => write!(f, "UNPAID"),
            InvoiceStatus::Pending => write!(f, "PENDING"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAID" => Ok(InvoiceStatus::Paid),
            "UNPAID" => Ok(InvoiceStatus::Unpaid),
            "PENDING" => Ok(InvoiceStatus::Pending),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_service_names_case_sensitively() {
        assert_eq!("DMP".parse::<ServiceName>(), Ok(ServiceName::Dmp));
        assert_eq!("SSP".parse::<ServiceName>(), Ok(ServiceName::Ssp));
        assert!("dmp".parse::<ServiceName>().is_err());
    }

    #[test]
    fn should_parse_statuses() {
        assert_eq!("PAID".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert_eq!("UNPAID".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Unpaid));
        assert_eq!("PENDING".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Pending));
        assert_eq!(
            "LATE".parse::<InvoiceStatus>(),
            Err("Invalid invoice status: LATE".to_string())
        );
    }

    #[test]
    fn should_serialize_in_upper_case() {
        assert_eq!(serde_json::to_string(&ServiceName::Ssp).unwrap(), "\"SSP\"");
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Pending).unwrap(),
            "\"PENDING\""
        );
    }
}
