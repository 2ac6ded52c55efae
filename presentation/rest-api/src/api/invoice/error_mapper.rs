use business::domain::invoice::errors::InvoiceError;

use crate::api::error::ApiError;

impl From<InvoiceError> for ApiError {
    fn from(err: InvoiceError) -> Self {
        ApiError::from_structured(&err)
    }
}

/// Converts a use case failure into the handler's error, tagged with the
/// handler name so the translator's log line says where it came from.
pub fn into_api_error(err: InvoiceError, method: &'static str) -> poem::Error {
    ApiError::from(err).with_field("method", method).into()
}
