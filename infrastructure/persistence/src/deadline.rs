use std::future::Future;

use business::domain::shared::context::OperationContext;

pub(crate) const DEADLINE_EXCEEDED: &str = "deadline exceeded";

/// Runs `future` within the context deadline. `None` means the deadline passed
/// first; the future is dropped, which cancels any in-flight query.
pub(crate) async fn within_deadline<F, T>(ctx: &OperationContext, future: F) -> Option<T>
where
    F: Future<Output = T>,
{
    match ctx.remaining() {
        None => Some(future.await),
        Some(remaining) if remaining.is_zero() => None,
        Some(remaining) => tokio::time::timeout(remaining, future).await.ok(),
    }
}
