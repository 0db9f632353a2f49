//! Task manager for async operations
//!
//! Owns every background task the app spawns:
//! - Spawning with a key that is still running cancels the old task
//! - Finished tasks are pruned on each spawn, so nothing accumulates
//! - All tasks are aborted on shutdown (and on drop)
//!
//! # Example
//!
//! ```ignore
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! // Any fetch still in flight under "weather" is aborted first
//! tasks.spawn("weather", async move {
//!     let result = client.fetch_weather(&city).await;
//!     Action::WeatherDidFetch { request, result }
//! });
//! ```

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::action::Action;

/// Identifies a task for cancellation and replacement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

/// Keyed registry of running tasks. Each task resolves to one `Action`, which
/// is posted to the UI loop through `action_tx`.
pub struct TaskManager {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, cancelling any existing task with the same key.
    ///
    /// If the task is cancelled before completion, no action is sent.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let key = key.into();

        self.prune_finished();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let action = future.await;
            // Receiver is gone only during shutdown
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Cancel a task by key. No-op if nothing runs under `key`.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            if !handle.is_finished() {
                debug!(task = key.name(), "cancelling superseded task");
            }
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Check if a task with the given key is registered and not finished.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of tracked tasks (finished ones are dropped on the next spawn).
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn prune_finished(&mut self) {
        self.tasks.retain(|_, handle| !handle.is_finished());
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RequestId;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn done(n: u64) -> Action {
        Action::WeatherDidFetch {
            request: RequestId(n),
            result: Ok(String::new()),
        }
    }

    #[test]
    fn test_task_key() {
        let k1 = TaskKey::new("weather");
        let k2: TaskKey = "weather".into();

        assert_eq!(k1, k2);
        assert_eq!(k1.name(), "weather");
    }

    #[tokio::test]
    async fn test_spawn_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("weather", async { done(42) });

        let action = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");

        assert_eq!(action, done(42));
    }

    #[tokio::test]
    async fn test_spawn_cancels_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        let counter = Arc::new(AtomicUsize::new(0));

        let c1 = counter.clone();
        tasks.spawn("weather", async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            c1.fetch_add(1, Ordering::SeqCst);
            done(1)
        });

        let c2 = counter.clone();
        tasks.spawn("weather", async move {
            c2.fetch_add(10, Ordering::SeqCst);
            done(2)
        });

        let action = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");

        assert_eq!(action, done(2));

        // First task never completes
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 10);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_repeated_spawns_keep_one_task() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        for n in 0..50 {
            tasks.spawn("weather", async move {
                tokio::time::sleep(Duration::from_secs(10)).await;
                done(n)
            });
        }

        assert_eq!(tasks.len(), 1);
        assert!(tasks.is_running(&TaskKey::new("weather")));
    }

    #[tokio::test]
    async fn test_finished_tasks_are_pruned() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("a", async { done(1) });
        let _ = rx.recv().await;
        // Let the spawned task wrap up after sending
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!tasks.is_running(&TaskKey::new("a")));

        tasks.spawn("b", async { done(2) });
        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("weather", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            done(1)
        });

        assert!(tasks.is_running(&TaskKey::new("weather")));

        tasks.cancel(&TaskKey::new("weather"));

        assert!(!tasks.is_running(&TaskKey::new("weather")));

        // Should not receive action
        let result = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(result.is_err() || result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("a", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            done(1)
        });
        tasks.spawn("b", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            done(2)
        });

        assert_eq!(tasks.len(), 2);

        tasks.cancel_all();

        assert!(tasks.is_empty());
    }
}
