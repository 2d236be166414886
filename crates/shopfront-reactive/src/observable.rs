#![forbid(unsafe_code)]

//! Shared observable value with change notification.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Inner<T> {
    value: T,
    version: u64,
    next_subscriber_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// A shared, version-tracked value that notifies subscribers on change.
///
/// Cloning an `Observable` clones the handle, not the value: all clones see
/// the same state. Equal-value writes are no-ops (no version bump, no
/// notifications), so subscribers only ever observe actual transitions.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    /// Create a new observable holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                next_subscriber_id: 1,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Read the current value through a closure, without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// The number of mutations that changed the value so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Register a change callback. The callback fires after every mutation
    /// that changed the value, in registration order.
    ///
    /// Dropping the returned [`Subscription`] unregisters the callback.
    #[must_use]
    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> Subscription
    where
        T: 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscriber_id;
        inner.next_subscriber_id += 1;
        inner.subscribers.push((id, Rc::new(RefCell::new(f))));
        Subscription {
            unsubscribe: Box::new({
                let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
                move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                    }
                }
            }),
        }
    }

}

impl<T: Clone> Observable<T> {
    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    fn notify(&self) {
        // Snapshot the callback list and the value so subscribers may read,
        // write, or subscribe to this observable from inside their callback.
        let callbacks: Vec<Callback<T>> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        let value = self.inner.borrow().value.clone();
        for cb in callbacks {
            // A callback re-entering its own notification is skipped rather
            // than panicking the borrow.
            if let Ok(mut f) = cb.try_borrow_mut() {
                f(&value);
            }
        }
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Replace the value, notifying subscribers if it actually changed.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate the value in place, notifying subscribers if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut inner = self.inner.borrow_mut();
            let before = inner.value.clone();
            f(&mut inner.value);
            if inner.value == before {
                return;
            }
            inner.version += 1;
        }
        self.notify();
    }
}

/// RAII guard for an [`Observable`] subscription.
///
/// Dropping the guard removes the callback; if the observable itself is
/// already gone, dropping is a no-op.
pub struct Subscription {
    unsubscribe: Box<dyn FnOnce()>,
}

impl Subscription {
    /// Explicitly unsubscribe (equivalent to dropping the guard).
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let noop: Box<dyn FnOnce()> = Box::new(|| {});
        std::mem::replace(&mut self.unsubscribe, noop)();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_set_round_trip() {
        let obs = Observable::new(3);
        assert_eq!(obs.get(), 3);
        obs.set(7);
        assert_eq!(obs.get(), 7);
    }

    #[test]
    fn clones_share_state() {
        let a = Observable::new("x".to_string());
        let b = a.clone();
        a.set("y".to_string());
        assert_eq!(b.get(), "y");
    }

    #[test]
    fn equal_set_is_noop() {
        let obs = Observable::new(5);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let _sub = obs.subscribe(move |_| c.set(c.get() + 1));

        obs.set(5);
        assert_eq!(count.get(), 0);
        assert_eq!(obs.version(), 0);

        obs.set(6);
        assert_eq!(count.get(), 1);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn subscribers_notified_in_registration_order() {
        let obs = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let o1 = Rc::clone(&order);
        let _s1 = obs.subscribe(move |_| o1.borrow_mut().push(1));
        let o2 = Rc::clone(&order);
        let _s2 = obs.subscribe(move |_| o2.borrow_mut().push(2));

        obs.set(1);
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let obs = Observable::new(0);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let sub = obs.subscribe(move |_| c.set(c.get() + 1));

        obs.set(1);
        assert_eq!(count.get(), 1);

        drop(sub);
        obs.set(2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn callback_may_read_the_observable() {
        let obs = Observable::new(10);
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let reader = obs.clone();
        let _sub = obs.subscribe(move |_| s.set(reader.get()));

        obs.set(42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn update_notifies_only_on_change() {
        let obs = Observable::new(4);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let _sub = obs.subscribe(move |_| c.set(c.get() + 1));

        obs.update(|v| *v += 1);
        assert_eq!(obs.get(), 5);
        assert_eq!(count.get(), 1);

        obs.update(|_| {});
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn cancel_unsubscribes() {
        let obs = Observable::new(0);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let sub = obs.subscribe(move |_| c.set(c.get() + 1));
        sub.cancel();
        obs.set(9);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn subscription_outliving_observable_is_harmless() {
        let sub;
        {
            let obs = Observable::new(1);
            sub = obs.subscribe(|_| {});
        }
        drop(sub);
    }
}
