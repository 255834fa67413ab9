use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const CANCEL_CHECK_INTERVAL_PIXELS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

#[derive(Debug, Default)]
struct FlagNode {
    cancelled: AtomicBool,
    parent: Option<Arc<FlagNode>>,
}

/// Cancellation flag that also reports cancelled once any ancestor is.
///
/// Clones share the same flag. [`CancellationFlag::child`] links a new flag under
/// this one, so cancelling a parent reaches every child created from it, while
/// cancelling a child leaves its parent and siblings running.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    node: Arc<FlagNode>,
}

impl CancellationFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            node: Arc::new(FlagNode {
                cancelled: AtomicBool::new(false),
                parent: Some(Arc::clone(&self.node)),
            }),
        }
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.node.cancelled.store(true, Ordering::Release);
    }
}

impl CancelToken for CancellationFlag {
    fn is_cancelled(&self) -> bool {
        let mut node = Some(&self.node);

        while let Some(current) = node {
            if current.cancelled.load(Ordering::Acquire) {
                return true;
            }
            node = current.parent.as_ref();
        }

        false
    }
}
