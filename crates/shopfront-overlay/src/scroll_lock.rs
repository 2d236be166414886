#![forbid(unsafe_code)]

//! Reference-counted scroll lock shared by all overlay widgets.
//!
//! Scrolling is disabled while the count is ≥ 1 and re-enabled only when it
//! returns to zero, so two independently-opened widgets that both hold the
//! lock do not prematurely re-enable scrolling when only one of them closes.
//!
//! The lock is headless: consumers subscribe to [`ScrollLock::locked`] and
//! apply the flag to the document (`overflow: hidden` or equivalent).

use std::cell::Cell;
use std::rc::Rc;

use shopfront_reactive::Observable;

/// Shared, reference-counted scroll lock. Clones share the same count.
#[derive(Clone)]
pub struct ScrollLock {
    count: Rc<Cell<usize>>,
    locked: Observable<bool>,
}

impl Default for ScrollLock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLock")
            .field("holders", &self.count.get())
            .finish()
    }
}

impl ScrollLock {
    /// Create an unlocked lock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: Rc::new(Cell::new(0)),
            locked: Observable::new(false),
        }
    }

    /// Take a hold on the lock; scrolling stays disabled until every
    /// outstanding guard has been dropped.
    #[must_use]
    pub fn acquire(&self) -> ScrollLockGuard {
        self.count.set(self.count.get() + 1);
        self.locked.set(true);
        ScrollLockGuard {
            lock: self.clone(),
        }
    }

    /// Whether scrolling is currently disabled.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.count.get() > 0
    }

    /// Number of outstanding holds.
    #[must_use]
    pub fn holders(&self) -> usize {
        self.count.get()
    }

    /// The observable locked flag, for consumers applying it to the page.
    #[must_use]
    pub fn locked(&self) -> Observable<bool> {
        self.locked.clone()
    }

    fn release(&self) {
        let n = self.count.get();
        if n == 0 {
            tracing::debug!("scroll lock released more times than acquired");
            return;
        }
        self.count.set(n - 1);
        if n == 1 {
            self.locked.set(false);
        }
    }
}

/// RAII hold on a [`ScrollLock`]; dropping releases one count.
pub struct ScrollLockGuard {
    lock: ScrollLock,
}

impl std::fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLockGuard").finish_non_exhaustive()
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.lock.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn single_guard_locks_and_unlocks() {
        let lock = ScrollLock::new();
        assert!(!lock.is_locked());

        let guard = lock.acquire();
        assert!(lock.is_locked());

        drop(guard);
        assert!(!lock.is_locked());
    }

    #[test]
    fn refcount_across_two_widgets() {
        let lock = ScrollLock::new();

        let x = lock.acquire();
        assert_eq!(lock.holders(), 1);
        let y = lock.acquire();
        assert_eq!(lock.holders(), 2);

        drop(x);
        assert_eq!(lock.holders(), 1);
        assert!(lock.is_locked(), "scrolling stays disabled while Y is open");

        drop(y);
        assert_eq!(lock.holders(), 0);
        assert!(!lock.is_locked());
    }

    #[test]
    fn clones_share_the_count() {
        let lock = ScrollLock::new();
        let other = lock.clone();
        let _guard = other.acquire();
        assert!(lock.is_locked());
    }

    #[test]
    fn locked_flag_notifies_on_edges_only() {
        let lock = ScrollLock::new();
        let edges = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&edges);
        let _sub = lock.locked().subscribe(move |locked| log.borrow_mut().push(*locked));

        let a = lock.acquire();
        let b = lock.acquire(); // already locked: no edge
        drop(a); // still locked: no edge
        drop(b);

        assert_eq!(*edges.borrow(), vec![true, false]);
    }
}
