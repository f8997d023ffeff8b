use crate::services::metrics::BRANCH_FAILURES_TOTAL;
use metrics::counter;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// Handle to a spawned lookup. Resolves to `Some` on success and `None` on
/// any failure, including a panic inside the task.
#[must_use = "an isolated task yields nothing unless awaited"]
pub struct IsolatedTask<R> {
    branch: &'static str,
    handle: JoinHandle<Option<R>>,
}

/// Spawns `work` on the runtime right away. An `Err` is logged, counted under
/// `branch` and absorbed; it never reaches whoever awaits the task.
pub fn spawn_isolated<F, R, E>(branch: &'static str, subject: String, work: F) -> IsolatedTask<R>
where
    F: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Display + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tracing::trace!(branch, subject = %subject, "  -->");
        match work.await {
            Ok(value) => {
                tracing::trace!(branch, subject = %subject, "<--  ");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(branch, subject = %subject, error = %e, "Lookup failed, leaving it out");
                counter!(BRANCH_FAILURES_TOTAL, "branch" => branch).increment(1);
                None
            }
        }
    });

    IsolatedTask { branch, handle }
}

impl<R> Future for IsolatedTask<R> {
    type Output = Option<R>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let branch = self.branch;
        Pin::new(&mut self.handle).poll(cx).map(|joined| {
            joined.unwrap_or_else(|e| {
                tracing::warn!(branch, error = %e, "Lookup task did not complete");
                counter!(BRANCH_FAILURES_TOTAL, "branch" => branch).increment(1);
                None
            })
        })
    }
}
