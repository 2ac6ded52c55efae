use poem::middleware::Cors;

use super::env::Lookup;

/// Reads the allowed origins
///
/// Environment variables:
/// - CORS_ALLOWED_ORIGINS: Comma-separated list of allowed origins
///   (default: "http://localhost:3000")
pub fn allowed_origins(lookup: Lookup<'_>) -> Vec<String> {
    lookup("CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|| "http://localhost:3000".to_string())
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Initialize CORS middleware for cross-origin requests
///
/// Configuration:
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: content-type
pub fn init_cors(origins: &[String]) -> Cors {
    Cors::new()
        .allow_origins(origins.iter().map(String::as_str))
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_headers(vec!["content-type"])
}
