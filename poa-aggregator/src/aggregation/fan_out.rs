use super::IsolatedTask;
use futures::future::join_all;

/// A batch of isolated tasks, all launched before any is awaited.
#[must_use = "a fan-out yields nothing unless awaited"]
pub struct FanOut<R> {
    tasks: Vec<IsolatedTask<R>>,
}

impl<R> FanOut<R> {
    /// Launches `launch(item)` for every item, in input order.
    pub fn launch<T, I, F>(items: I, launch: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> IsolatedTask<R>,
    {
        Self {
            tasks: items.into_iter().map(launch).collect(),
        }
    }

    /// Number of tasks launched.
    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Waits for every task and keeps the successful results. Failed items are
    /// dropped; survivors keep their input order whatever order they finished in.
    pub async fn successful(self) -> Vec<R> {
        join_all(self.tasks).await.into_iter().flatten().collect()
    }
}

/// Launch-all-then-await-all in one call.
pub async fn gather_successful<T, R, I, F>(items: I, launch: F) -> Vec<R>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> IsolatedTask<R>,
{
    FanOut::launch(items, launch).successful().await
}
