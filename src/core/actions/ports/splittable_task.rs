use crate::core::actions::cancellation::{CancelToken, Cancelled};

/// A unit of work that can either run directly or break itself into independent
/// parts whose results recombine into its own.
///
/// Splitting is only ever a parallelism strategy: joining the results of `split`
/// must give the same output `run_leaf` would have produced on its own.
pub trait SplittableTask: Send + Sized {
    type Output: Send;

    /// Independent sub-tasks, or `None` when this task should run as a leaf.
    fn split(&self) -> Option<Vec<Self>>;

    /// Runs the task directly, polling `cancel` often enough to stop promptly.
    fn run_leaf<C: CancelToken>(&self, cancel: &C) -> Result<Self::Output, Cancelled>;

    /// Combines child results, given in the order `split` produced the children.
    fn join(&self, results: Vec<Self::Output>) -> Self::Output;
}
