#![forbid(unsafe_code)]

//! Reactive plumbing for shopfront.
//!
//! This crate provides the change-tracking primitive shared by the disclosure
//! engine's collaborators:
//!
//! - [`Observable`]: a shared, version-tracked value wrapper with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership; the engine runs cooperatively on a UI event loop, so no locks
//! are needed. Callbacks are invoked outside the value borrow, so a
//! subscriber may read the observable it is subscribed to.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version bump,
//!    no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.

pub mod observable;

pub use observable::{Observable, Subscription};
