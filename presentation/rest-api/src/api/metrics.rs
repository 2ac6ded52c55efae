use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use poem::http::StatusCode;
use poem::{Endpoint, EndpointExt, IntoResponse, Response};
use poem_openapi::{OpenApi, payload::PlainText};

use crate::api::tags::ApiTags;

/// Upper bounds, in seconds, of the latency histogram buckets.
const DURATION_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

const EXCLUDED_PATHS: [&str; 2] = ["/health", "/metrics"];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RouteKey {
    method: String,
    route: &'static str,
}

#[derive(Debug, Default)]
struct RouteStats {
    statuses: BTreeMap<u16, u64>,
    /// Cumulative: each slot counts requests at or under its bound.
    buckets: [u64; DURATION_BUCKETS.len()],
    sum_seconds: f64,
    count: u64,
}

/// Maps a request path onto a bounded set of route templates, or `None` when
/// the path is not recorded at all.
pub fn route_label(path: &str) -> Option<&'static str> {
    let path = path.trim_end_matches('/');
    if EXCLUDED_PATHS.contains(&path) {
        return None;
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    Some(match segments.as_slice() {
        ["invoices"] => "/invoices",
        ["invoices", _] => "/invoices/{id}",
        _ => "other",
    })
}

/// In-memory request counters and latency histograms.
#[derive(Debug, Default)]
pub struct MetricsStore {
    routes: Mutex<BTreeMap<RouteKey, RouteStats>>,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn routes(&self) -> MutexGuard<'_, BTreeMap<RouteKey, RouteStats>> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, method: &str, path: &str, status: StatusCode, elapsed: Duration) {
        let Some(route) = route_label(path) else {
            return;
        };
        let seconds = elapsed.as_secs_f64();

        let mut routes = self.routes();
        let stats = routes
            .entry(RouteKey {
                method: method.to_string(),
                route,
            })
            .or_default();
        *stats.statuses.entry(status.as_u16()).or_default() += 1;
        for (slot, bound) in stats.buckets.iter_mut().zip(DURATION_BUCKETS) {
            if seconds <= bound {
                *slot += 1;
            }
        }
        stats.sum_seconds += seconds;
        stats.count += 1;
    }

    pub fn request_count(&self, method: &str, route: &str, status: u16) -> u64 {
        self.routes()
            .iter()
            .filter(|(key, _)| key.method == method && key.route == route)
            .filter_map(|(_, stats)| stats.statuses.get(&status))
            .sum()
    }

    /// Prometheus text exposition, series sorted by method then route.
    pub fn render(&self) -> String {
        let routes = self.routes();
        let mut out = String::new();

        out.push_str("# HELP http_requests_total Total HTTP requests handled.\n");
        out.push_str("# TYPE http_requests_total counter\n");
        for (key, stats) in routes.iter() {
            for (status, count) in &stats.statuses {
                let _ = writeln!(
                    out,
                    "http_requests_total{{method=\"{}\",path=\"{}\",status=\"{}\"}} {}",
                    key.method, key.route, status, count
                );
            }
        }

        out.push_str("# HELP http_request_duration_seconds HTTP request latency.\n");
        out.push_str("# TYPE http_request_duration_seconds histogram\n");
        for (key, stats) in routes.iter() {
            let labels = format!("method=\"{}\",path=\"{}\"", key.method, key.route);
            for (bound, count) in DURATION_BUCKETS.iter().zip(stats.buckets) {
                let _ = writeln!(
                    out,
                    "http_request_duration_seconds_bucket{{{},le=\"{}\"}} {}",
                    labels, bound, count
                );
            }
            let _ = writeln!(
                out,
                "http_request_duration_seconds_bucket{{{},le=\"+Inf\"}} {}",
                labels, stats.count
            );
            let _ = writeln!(
                out,
                "http_request_duration_seconds_sum{{{}}} {}",
                labels, stats.sum_seconds
            );
            let _ = writeln!(
                out,
                "http_request_duration_seconds_count{{{}}} {}",
                labels, stats.count
            );
        }

        out
    }
}

/// Records every response leaving `endpoint` into `store`.
pub fn with_metrics<E>(endpoint: E, store: Arc<MetricsStore>) -> impl Endpoint<Output = Response>
where
    E: Endpoint + 'static,
{
    endpoint.around(move |ep, req| {
        let store = store.clone();
        async move {
            let method = req.method().to_string();
            let path = req.uri().path().to_string();
            let started = Instant::now();

            let response = ep.call(req).await?.into_response();

            store.record(&method, &path, response.status(), started.elapsed());
            Ok(response)
        }
    })
}

pub struct MetricsApi {
    store: Arc<MetricsStore>,
}

impl MetricsApi {
    pub fn new(store: Arc<MetricsStore>) -> Self {
        Self { store }
    }
}

#[OpenApi]
impl MetricsApi {
    /// Request metrics
    ///
    /// Request counts and latency histograms in Prometheus text format.
    #[oai(path = "/metrics", method = "get", tag = "ApiTags::Metrics")]
    async fn metrics(&self) -> PlainText<String> {
        PlainText(self.store.render())
    }
}
