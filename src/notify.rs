//! Injected notification capability and the one-shot event primitive.
//!
//! User-facing messages go through a [`Notifier`] handed to each component
//! at construction; diagnostic logging uses the `log` facade directly. The
//! [`OneShotEvent`] models readiness signals: subscribers registered before
//! the event fires run exactly once, subscribers registered after run
//! immediately.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Severity of a user-facing notification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum NotificationType {
    Info,
    Warning,
    Error,
}

/// Sink for user-facing notifications.
pub trait Notifier {
    fn notify(&self, ty: NotificationType, message: &str);
}

/// Notifier forwarding to the `log` facade, for hosts without a
/// notification UI.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, ty: NotificationType, message: &str) {
        match ty {
            NotificationType::Info => log::info!("{message}"),
            NotificationType::Warning => log::warn!("{message}"),
            NotificationType::Error => log::error!("{message}"),
        }
    }
}

#[derive(Default)]
struct OneShotInner {
    fired: Cell<bool>,
    subscribers: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// An event that fires at most once.
///
/// Cloning yields another handle to the same event. Subscribers are taken
/// out of the queue before being run, so a subscriber may subscribe or fire
/// re-entrantly without deadlocking the queue.
#[derive(Clone, Default)]
pub struct OneShotEvent {
    inner: Rc<OneShotInner>,
}

impl OneShotEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self) -> bool {
        self.inner.fired.get()
    }

    /// Register a callback; runs immediately when the event already fired.
    pub fn subscribe(&self, callback: Box<dyn FnOnce()>) {
        if self.inner.fired.get() {
            callback();
        } else {
            self.inner.subscribers.borrow_mut().push(callback);
        }
    }

    /// Fire the event, draining subscribers in registration order.
    ///
    /// Later calls are no-ops.
    pub fn fire(&self) {
        if self.inner.fired.replace(true) {
            return;
        }
        let subscribers = self.inner.subscribers.take();
        for subscriber in subscribers {
            subscriber();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once() {
        let event = OneShotEvent::new();
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        event.subscribe(Box::new(move || seen.set(seen.get() + 1)));
        event.fire();
        event.fire();
        assert_eq!(count.get(), 1);
        assert!(event.has_fired());
    }

    #[test]
    fn late_subscribers_run_immediately() {
        let event = OneShotEvent::new();
        event.fire();
        let ran = Rc::new(Cell::new(false));
        let seen = Rc::clone(&ran);
        event.subscribe(Box::new(move || seen.set(true)));
        assert!(ran.get());
    }

    #[test]
    fn reentrant_subscription_does_not_deadlock() {
        let event = OneShotEvent::new();
        let clone = event.clone();
        let ran = Rc::new(Cell::new(false));
        let seen = Rc::clone(&ran);
        event.subscribe(Box::new(move || {
            clone.subscribe(Box::new(move || seen.set(true)));
        }));
        event.fire();
        assert!(ran.get());
    }
}
