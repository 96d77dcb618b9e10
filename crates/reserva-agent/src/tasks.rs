//! Runtime task registry for background work.
//!
//! Tracks spawned tasks and supports cooperative shutdown.
//!
//! # Blocking Lock Usage
//!
//! Uses `parking_lot::Mutex` for JoinHandle storage because:
//! 1. Operations are O(1) push or O(n) drain (shutdown only)
//! 2. Lock is never held across `.await` points

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owns background tasks and stops them on shutdown or drop
#[derive(Debug)]
pub struct RuntimeTaskRegistry {
    shutdown_tx: watch::Sender<bool>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl RuntimeTaskRegistry {
    /// Empty registry
    pub fn new() -> Self {
        let (shutdown_tx, _shutdown_rx) = watch::channel(false);
        Self {
            shutdown_tx,
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Spawn a task that is aborted at shutdown
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(fut);
        self.handles.lock().push(handle);
    }

    /// Call `f` every `interval` until it returns `false` or shutdown is signalled.
    ///
    /// The first tick fires immediately. Missed ticks are skipped rather than
    /// bursted.
    pub fn spawn_interval_until<F, Fut>(&self, interval: Duration, mut f: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        if !f().await {
                            break;
                        }
                    }
                }
            }
        });
        self.handles.lock().push(handle);
    }

    /// Whether shutdown has been signalled
    pub fn is_shut_down(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Number of tasks still tracked
    pub fn task_count(&self) -> usize {
        self.handles.lock().len()
    }

    /// Signal shutdown and abort every tracked task
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
        for handle in self.handles.lock().drain(..) {
            handle.abort();
        }
    }
}

impl Default for RuntimeTaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RuntimeTaskRegistry {
    fn drop(&mut self) {
        self.shutdown_tx.send_replace(true);
        for handle in self.handles.lock().drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn interval_task_ticks_until_told_to_stop() {
        let registry = RuntimeTaskRegistry::new();
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = ticks.clone();
        registry.spawn_interval_until(Duration::from_secs(10), move || {
            let counter = counter.clone();
            async move { counter.fetch_add(1, Ordering::SeqCst) + 1 < 3 }
        });

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_interval_tasks() {
        let registry = RuntimeTaskRegistry::new();
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = ticks.clone();
        registry.spawn_interval_until(Duration::from_secs(10), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }
        });

        tokio::time::sleep(Duration::from_secs(15)).await;
        registry.shutdown();
        let seen = ticks.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen);
        assert!(registry.is_shut_down());
        assert_eq!(registry.task_count(), 0);
    }
}
