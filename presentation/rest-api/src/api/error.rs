use std::any::Any;
use std::sync::Arc;

use poem::error::ResponseError;
use poem::http::StatusCode;
use poem::middleware::CatchPanic;
use poem::{Endpoint, EndpointExt, IntoResponse, Response};

use business::domain::errors::StructuredError;
use business::domain::logger::{LogField, Logger, Severity};

/// Failure raised by a handler, carrying everything the translator needs to
/// log and answer it. Built from any business `StructuredError`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub severity: Severity,
    pub message: String,
    pub fields: Vec<LogField>,
}

impl ApiError {
    pub fn from_structured(err: &dyn StructuredError) -> Self {
        Self {
            status: StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            severity: err.severity(),
            message: err.message().to_string(),
            fields: err.fields(),
        }
    }

    /// Tags the error with per-request context, e.g. the handler name.
    pub fn with_field(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fields.push(LogField::new(key, value));
        self
    }
}

impl ResponseError for ApiError {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn as_response(&self) -> Response {
        Response::builder().status(self.status).finish()
    }
}

/// Framework-level rejections that already carry a meaningful status.
fn is_transport_error(err: &poem::Error) -> bool {
    err.is::<poem::error::NotFoundError>()
        || err.is::<poem::error::MethodNotAllowedError>()
        || err.is::<poem::error::ParseJsonError>()
        || err.is::<poem::error::ParseQueryError>()
        || err.is::<poem::error::ParsePathError>()
        || err.is::<poem_openapi::error::ParseRequestPayloadError>()
        || err.is::<poem_openapi::error::ParseParamError>()
        || err.is::<poem_openapi::error::ContentTypeError>()
}

/// Turns any error that reached the edge of the app into a response with an
/// empty body. Never panics.
pub fn translate(logger: &dyn Logger, err: poem::Error) -> Response {
    if let Some(api_error) = err.downcast_ref::<ApiError>() {
        logger.log(api_error.severity, &api_error.message, &api_error.fields);
        return api_error.status.into_response();
    }

    if is_transport_error(&err) {
        return err.status().into_response();
    }

    logger.log(
        Severity::Error,
        "unhandled error",
        &[LogField::new("error", err.to_string())],
    );
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// Logs a panic raised while handling a request and answers 500 with an
/// empty body.
pub fn recover_panic(logger: &dyn Logger, panic: Box<dyn Any + Send>) -> Response {
    let payload = if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    };

    logger.log(
        Severity::Error,
        "panic recovered",
        &[LogField::new("error", payload)],
    );
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// Installs panic recovery and `translate` as the outermost error handlers of
/// `endpoint`.
pub fn with_translator<E>(endpoint: E, logger: Arc<dyn Logger>) -> impl Endpoint<Output = Response>
where
    E: Endpoint + 'static,
{
    let panic_logger = logger.clone();
    endpoint
        .with(CatchPanic::new().with_handler(move |panic: Box<dyn Any + Send>| {
            recover_panic(panic_logger.as_ref(), panic)
        }))
        .catch_all_error(move |err| {
            let logger = logger.clone();
            async move { translate(logger.as_ref(), err) }
        })
}
