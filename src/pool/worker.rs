//! Bounded worker pool.
//!
//! A [`WorkerPool`] runs one operation over a batch of inputs with at most
//! `limit` operations in flight, waits for the whole batch, and hands back the
//! successful results in completion order.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use crate::pool::outcome::Outcome;

/// Default number of concurrent workers per pool.
pub const DEFAULT_POOL_LIMIT: usize = 10;

/// How workers are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolMode {
    /// All workers are polled on the calling task. Cheap, but blocking work
    /// in one worker stalls the others.
    Inline,
    /// Every worker runs as its own runtime task and may run on any runtime
    /// thread.
    #[default]
    Spawned,
}

/// Lifetime of the pools handed out by a [`PoolFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolScope {
    /// A fresh pool per batch, dropped when the batch completes.
    #[default]
    AdHoc,
    /// One pool reused by every batch; its limit bounds them jointly.
    Shared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub mode: PoolMode,
    pub limit: usize,
    pub scope: PoolScope,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            mode: PoolMode::default(),
            limit: DEFAULT_POOL_LIMIT,
            scope: PoolScope::default(),
        }
    }
}

/// A bounded pool of concurrent workers.
///
/// In both modes a panicking worker is reported as [`Outcome::Failed`]
/// instead of unwinding into the caller. Clones share the same permits.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    mode: PoolMode,
    limit: usize,
    permits: Arc<Semaphore>,
}

impl WorkerPool {
    /// Create a pool running at most `limit` workers at once (minimum 1).
    pub fn new(mode: PoolMode, limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            mode,
            limit,
            permits: Arc::new(Semaphore::new(limit)),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run `op` over every input and return the successful results.
    ///
    /// Skipped and failed items are dropped. Result order is unspecified.
    pub async fn run<I, F, Fut, T>(&self, inputs: I, op: F) -> Vec<T>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = Outcome<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.run_outcomes(inputs, op)
            .await
            .into_iter()
            .filter_map(Outcome::done)
            .collect()
    }

    /// Run `op` over every input and return every outcome, including skips and failures.
    pub async fn run_outcomes<I, F, Fut, T>(&self, inputs: I, op: F) -> Vec<Outcome<T>>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = Outcome<T>> + Send + 'static,
        T: Send + 'static,
    {
        match self.mode {
            PoolMode::Inline => self.run_inline(inputs, op).await,
            PoolMode::Spawned => self.run_spawned(inputs, op).await,
        }
    }

    async fn run_inline<I, F, Fut, T>(&self, inputs: I, mut op: F) -> Vec<Outcome<T>>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        stream::iter(inputs)
            .map(|input| {
                let permits = Arc::clone(&self.permits);
                let task = op(input);
                async move {
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return Outcome::Failed("worker pool closed".to_string());
                    };
                    match AssertUnwindSafe(task).catch_unwind().await {
                        Ok(outcome) => outcome,
                        Err(payload) => panicked(payload.as_ref()),
                    }
                }
            })
            .buffer_unordered(self.limit)
            .collect()
            .await
    }

    async fn run_spawned<I, F, Fut, T>(&self, inputs: I, mut op: F) -> Vec<Outcome<T>>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = Outcome<T>> + Send + 'static,
        T: Send + 'static,
    {
        let mut join_set = JoinSet::new();
        let mut outcomes = Vec::new();

        for input in inputs {
            while join_set.len() >= self.limit {
                if let Some(joined) = join_set.join_next().await {
                    outcomes.push(flatten_join(joined));
                }
            }

            let permits = Arc::clone(&self.permits);
            let task = op(input);
            join_set.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return Outcome::Failed("worker pool closed".to_string());
                };
                task.await
            });
        }

        while let Some(joined) = join_set.join_next().await {
            outcomes.push(flatten_join(joined));
        }

        outcomes
    }
}

fn flatten_join<T>(joined: std::result::Result<Outcome<T>, JoinError>) -> Outcome<T> {
    match joined {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => panicked(e.into_panic().as_ref()),
        Err(e) => Outcome::Failed(format!("worker cancelled: {}", e)),
    }
}

fn panicked<T>(payload: &(dyn Any + Send)) -> Outcome<T> {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());

    tracing::error!("Worker panicked: {}", message);
    Outcome::Failed(format!("worker panicked: {}", message))
}

/// Hands out worker pools according to a [`PoolScope`].
#[derive(Debug)]
pub struct PoolFactory {
    options: PoolOptions,
    shared: Option<WorkerPool>,
}

impl PoolFactory {
    pub fn new(options: PoolOptions) -> Self {
        let shared = match options.scope {
            PoolScope::Shared => Some(WorkerPool::new(options.mode, options.limit)),
            PoolScope::AdHoc => None,
        };

        Self { options, shared }
    }

    /// Get a pool for the next batch.
    pub fn pool(&self) -> WorkerPool {
        match &self.shared {
            Some(pool) => pool.clone(),
            None => WorkerPool::new(self.options.mode, self.options.limit),
        }
    }
}
