//! Bounded dispatch of copy tasks.

use crate::{CopyError, Result};
use crossbeam::sync::WaitGroup;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// How the number of in-flight tasks is bounded.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThrottleMode {
    /// Launch `max_concurrency + 1` tasks, wait until every launched task is done, repeat.
    ///
    /// A round is only as fast as its slowest task.  This is the default, it keeps the
    /// original tool's behaviour.
    Rounds,
    /// A fixed pool of `max_concurrency` workers takes tasks from a shared queue, no stall
    /// between batches.
    Pool,
}

impl Default for ThrottleMode {
    fn default() -> Self {
        ThrottleMode::Rounds
    }
}

impl FromStr for ThrottleMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rounds" => Ok(ThrottleMode::Rounds),
            "pool" => Ok(ThrottleMode::Pool),
            other => Err(format!("unknown throttle mode {:?}, expect rounds or pool", other)),
        }
    }
}

impl fmt::Display for ThrottleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThrottleMode::Rounds => write!(f, "rounds"),
            ThrottleMode::Pool => write!(f, "pool"),
        }
    }
}

/// What a throttled run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThrottleReport {
    /// tasks launched, always equals the number of input items.
    pub launched: usize,
    /// synchronization points the dispatch loop waited on, including the final drain.
    pub rounds: usize,
}

/// Runs one task per item with at most `max_concurrency` (+1 in [ThrottleMode::Rounds])
/// tasks in flight.
pub struct BatchThrottler {
    max_concurrency: usize,
    mode: ThrottleMode,
}

impl BatchThrottler {
    /// create a throttler, `max_concurrency` must be positive.
    pub fn new(max_concurrency: usize, mode: ThrottleMode) -> Result<BatchThrottler> {
        if max_concurrency == 0 {
            return Err(CopyError::InvalidConfig {
                name: "max_concurrency",
                value: "0".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(BatchThrottler {
            max_concurrency,
            mode,
        })
    }

    /// Run `task` once for every item in `items`, returns after all tasks are complete.
    ///
    /// Tasks are not expected to fail, a task which needs to report an error must do it by
    /// itself.
    pub fn run<T, F>(&self, items: Vec<T>, task: F) -> Result<ThrottleReport>
    where
        T: Send + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        if items.is_empty() {
            return Ok(ThrottleReport::default());
        }

        let task = Arc::new(task);
        match self.mode {
            ThrottleMode::Rounds => self.run_rounds(items, task),
            ThrottleMode::Pool => self.run_pool(items, task),
        }
    }

    fn run_rounds<T, F>(&self, items: Vec<T>, task: Arc<F>) -> Result<ThrottleReport>
    where
        T: Send + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        // one round holds up to `max_concurrency + 1` tasks, give each of them a thread.
        let round_size = self
            .max_concurrency
            .checked_add(1)
            .ok_or_else(|| CopyError::InvalidConfig {
                name: "max_concurrency",
                value: self.max_concurrency.to_string(),
                reason: "too large for round throttling".to_string(),
            })?;
        let pool = self.build_pool(round_size)?;
        let mut report = ThrottleReport::default();
        let mut wait_group = WaitGroup::new();
        let mut launched_in_round = 0;

        for item in items {
            spawn_task(&pool, &wait_group, &task, item);
            report.launched += 1;
            launched_in_round += 1;

            if launched_in_round > self.max_concurrency {
                std::mem::replace(&mut wait_group, WaitGroup::new()).wait();
                report.rounds += 1;
                debug!(round = report.rounds, launched = report.launched, "Round drained.");
                launched_in_round = 0;
            }
        }

        if launched_in_round > 0 {
            report.rounds += 1;
        }
        wait_group.wait();
        Ok(report)
    }

    fn run_pool<T, F>(&self, items: Vec<T>, task: Arc<F>) -> Result<ThrottleReport>
    where
        T: Send + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let pool = self.build_pool(self.max_concurrency)?;
        let wait_group = WaitGroup::new();
        let launched = items.len();
        for item in items {
            spawn_task(&pool, &wait_group, &task, item);
        }
        wait_group.wait();
        Ok(ThrottleReport {
            launched,
            rounds: 1,
        })
    }

    fn build_pool(&self, num_threads: usize) -> Result<ThreadPool> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("doc-copy-{}", i))
            .build()?;
        Ok(pool)
    }
}

fn spawn_task<T, F>(pool: &ThreadPool, wait_group: &WaitGroup, task: &Arc<F>, item: T)
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    let wait_group = wait_group.clone();
    let task = Arc::clone(task);
    pool.spawn(move || {
        task(item);
        drop(wait_group);
    });
}
