//! In-flight counter for containers that hold single values rather than a
//! [`ResourceCache`](super::ResourceCache) entry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts operations in flight. Busy while the count is non-zero.
#[derive(Debug, Default)]
pub struct Busy {
    pending: AtomicUsize,
}

impl Busy {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark one operation as started. Dropping the guard marks it finished.
    pub fn enter(self: &Arc<Self>) -> BusyGuard {
        self.pending.fetch_add(1, Ordering::SeqCst);
        BusyGuard { busy: self.clone() }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

#[must_use = "the operation is finished as soon as the guard is dropped"]
pub struct BusyGuard {
    busy: Arc<Busy>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_until_last_guard_drops() {
        let busy = Busy::new();
        assert!(!busy.is_busy());

        let a = busy.enter();
        let b = busy.enter();
        drop(a);
        assert!(busy.is_busy());
        drop(b);
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_dropped_task_releases_guard() {
        let busy = Busy::new();
        let held = busy.clone();
        let mut task = tokio_test::task::spawn(async move {
            let _guard = held.enter();
            futures_util::future::pending::<()>().await;
        });

        tokio_test::assert_pending!(task.poll());
        assert!(busy.is_busy());

        drop(task);
        assert!(!busy.is_busy());
    }
}
