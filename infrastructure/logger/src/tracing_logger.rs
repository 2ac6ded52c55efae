use business::domain::logger::{LogField, Logger, Severity};
use tracing::{debug, error, info, warn};

pub struct TracingLogger;

/// Joins fields into a single `key=value key=value` string.
fn render_fields(fields: &[LogField]) -> String {
    fields
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "invoice_api", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "invoice_api", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "invoice_api", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "invoice_api", "{}", message);
    }

    fn log(&self, severity: Severity, message: &str, fields: &[LogField]) {
        let fields = render_fields(fields);
        match severity {
            Severity::Debug => debug!(target: "invoice_api", fields = %fields, "{}", message),
            Severity::Info => info!(target: "invoice_api", fields = %fields, "{}", message),
            Severity::Warn => warn!(target: "invoice_api", fields = %fields, "{}", message),
            Severity::Error => error!(target: "invoice_api", fields = %fields, "{}", message),
            // tracing has no level above error
            Severity::Fatal => {
                error!(target: "invoice_api", fatal = true, fields = %fields, "{}", message)
            }
        }
    }
}
