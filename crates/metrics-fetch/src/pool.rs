//! Bounded-parallel execution of branch workers

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Results of one pool run
#[derive(Debug)]
pub struct PoolRun<R> {
    /// Results of the tasks that completed, in completion order
    pub results: Vec<R>,

    /// Tasks that panicked or were cancelled
    pub failed: usize,
}

/// Runs one task per item with at most `cap` tasks active at once.
///
/// A permit is taken before a task is spawned, so queued items wait in the
/// submitting loop. `run` returns only after every spawned task finished.
#[derive(Debug, Clone, Copy)]
pub struct BranchPool {
    cap: usize,
}

impl BranchPool {
    pub fn new(cap: usize) -> Self {
        Self { cap: cap.max(1) }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub async fn run<T, R, F, Fut>(&self, items: Vec<T>, work: F) -> PoolRun<R>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
        R: Send + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.cap));
        let mut tasks = JoinSet::new();

        for item in items {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    log::error!("Worker slots unavailable: {}", e);
                    break;
                }
            };

            let task = work(item);
            tasks.spawn(async move {
                let _permit = permit;
                task.await
            });
        }

        let mut run = PoolRun {
            results: Vec::new(),
            failed: 0,
        };

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => run.results.push(result),
                Err(e) => {
                    log::error!("Branch worker failed: {}", e);
                    run.failed += 1;
                }
            }
        }

        run
    }
}
