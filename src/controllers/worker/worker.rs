use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use crate::core::actions::async_task::{AsyncTask, TaskOutcome};
use crate::core::actions::ports::splittable_task::SplittableTask;

#[derive(Debug)]
pub enum WorkerError {
    ZeroThreads,
    PoolBuild(ThreadPoolBuildError),
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroThreads => write!(f, "worker needs at least one thread"),
            Self::PoolBuild(err) => write!(f, "cannot build worker pool: {}", err),
        }
    }
}

impl Error for WorkerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ZeroThreads => None,
            Self::PoolBuild(err) => Some(err),
        }
    }
}

impl From<ThreadPoolBuildError> for WorkerError {
    fn from(err: ThreadPoolBuildError) -> Self {
        Self::PoolBuild(err)
    }
}

/// Bounded pool that runs split/join task trees. Clones share the pool.
#[derive(Clone)]
pub struct Worker {
    pool: Arc<ThreadPool>,
    threads: usize,
}

impl Worker {
    pub fn new(threads: usize) -> Result<Self, WorkerError> {
        if threads == 0 {
            return Err(WorkerError::ZeroThreads);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("fractal-worker-{}", index))
            .build()?;

        Ok(Self {
            pool: Arc::new(pool),
            threads,
        })
    }

    /// One thread per available core.
    pub fn with_default_threads() -> Result<Self, WorkerError> {
        let threads = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self::new(threads)
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Submits `task` and returns immediately; completion is observed through the
    /// task's listeners.
    pub fn execute<T>(&self, task: AsyncTask<T>)
    where
        T: SplittableTask + 'static,
    {
        self.pool.spawn(move || {
            task.execute();
        });
    }

    /// Runs `task` on the pool and waits for its outcome.
    pub fn run<T>(&self, task: AsyncTask<T>) -> TaskOutcome<T::Output>
    where
        T: SplittableTask,
    {
        self.pool.install(move || task.execute())
    }
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("threads", &self.threads)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::{CancelToken, Cancelled};
    use std::sync::mpsc;
    use std::time::Duration;

    #[derive(Debug)]
    struct ThreadNames {
        parts: usize,
    }

    impl SplittableTask for ThreadNames {
        type Output = Vec<String>;

        fn split(&self) -> Option<Vec<Self>> {
            (self.parts > 1).then(|| (0..self.parts).map(|_| Self { parts: 1 }).collect())
        }

        fn run_leaf<C: CancelToken>(&self, _cancel: &C) -> Result<Self::Output, Cancelled> {
            Ok(vec![thread::current().name().unwrap_or_default().to_string()])
        }

        fn join(&self, results: Vec<Self::Output>) -> Self::Output {
            results.into_iter().flatten().collect()
        }
    }

    #[test]
    fn rejects_zero_threads() {
        assert!(matches!(Worker::new(0), Err(WorkerError::ZeroThreads)));
    }

    #[test]
    fn default_threads_is_at_least_one() {
        assert!(Worker::with_default_threads().unwrap().threads() >= 1);
    }

    #[test]
    fn run_executes_every_leaf_on_the_pool() {
        let worker = Worker::new(2).unwrap();
        let names = worker
            .run(AsyncTask::new(ThreadNames { parts: 8 }))
            .completed()
            .unwrap();

        assert_eq!(names.len(), 8);
        assert!(names.iter().all(|name| name.starts_with("fractal-worker-")));
    }

    #[test]
    fn execute_reports_through_listeners() {
        let worker = Worker::new(2).unwrap();
        let (sender, receiver) = mpsc::channel();
        let mut task = AsyncTask::new(ThreadNames { parts: 3 });
        task.add_listener(move |outcome: &TaskOutcome<Vec<String>>| {
            let _ = sender.send(outcome.clone());
        });

        worker.execute(task);

        let outcome = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.completed().map(|names| names.len()), Some(3));
    }
}
