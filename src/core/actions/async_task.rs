use rayon::prelude::*;

use crate::core::actions::cancellation::{CancelToken, CancellationFlag};
use crate::core::actions::ports::splittable_task::SplittableTask;

/// How a task finished. A cancelled task carries no output at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<O> {
    Completed(O),
    Cancelled,
}

impl<O> TaskOutcome<O> {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    #[must_use]
    pub fn completed(self) -> Option<O> {
        match self {
            Self::Completed(output) => Some(output),
            Self::Cancelled => None,
        }
    }
}

pub type CompletionListener<O> = Box<dyn FnOnce(&TaskOutcome<O>) + Send>;

/// Single-shot node of a split/join tree.
///
/// `execute` consumes the task: it either runs the leaf directly or splits, runs
/// the children on the current rayon pool and joins their outputs in split order.
/// Children hang off this task's cancellation flag, so [`AsyncTask::cancel`] (or a
/// handle from [`AsyncTask::cancel_handle`]) stops the whole subtree. Listeners
/// fire exactly once, after all subtree work has finished or been abandoned.
pub struct AsyncTask<T: SplittableTask> {
    task: T,
    cancellation: CancellationFlag,
    listeners: Vec<CompletionListener<T::Output>>,
}

impl<T: SplittableTask> AsyncTask<T> {
    #[must_use]
    pub fn new(task: T) -> Self {
        Self {
            task,
            cancellation: CancellationFlag::new(),
            listeners: Vec::new(),
        }
    }

    fn child_of(task: T, parent: &CancellationFlag) -> Self {
        Self {
            task,
            cancellation: parent.child(),
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnOnce(&TaskOutcome<T::Output>) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Flag that cancels this task after it has been handed to a worker.
    #[must_use]
    pub fn cancel_handle(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    pub fn execute(self) -> TaskOutcome<T::Output> {
        let Self {
            task,
            cancellation,
            listeners,
        } = self;

        let outcome = Self::run(&task, &cancellation);

        for listener in listeners {
            listener(&outcome);
        }

        outcome
    }

    fn run(task: &T, cancellation: &CancellationFlag) -> TaskOutcome<T::Output> {
        if cancellation.is_cancelled() {
            return TaskOutcome::Cancelled;
        }

        let children = match task.split() {
            Some(children) if !children.is_empty() => children,
            _ => {
                return match task.run_leaf(cancellation) {
                    Ok(output) => TaskOutcome::Completed(output),
                    Err(_) => TaskOutcome::Cancelled,
                };
            }
        };

        let outcomes: Vec<TaskOutcome<T::Output>> = children
            .into_iter()
            .map(|child| Self::child_of(child, cancellation))
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(AsyncTask::execute)
            .collect();

        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                TaskOutcome::Completed(output) => results.push(output),
                TaskOutcome::Cancelled => return TaskOutcome::Cancelled,
            }
        }

        if cancellation.is_cancelled() {
            return TaskOutcome::Cancelled;
        }

        TaskOutcome::Completed(task.join(results))
    }
}
