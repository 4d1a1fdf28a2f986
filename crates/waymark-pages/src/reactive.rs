//! Reactive state cell and listener bookkeeping.
//!
//! `Signal<T>` holds the current value and notifies subscribers on every
//! `set`. Subscribers are run synchronously, after the new value has been
//! stored, with a snapshot of that value.
//!
//! A subscriber may call `set` again. The nested value is not delivered
//! immediately: the running round stops before the next subscriber and a new
//! round starts with the latest value, so no subscriber ever sees a value
//! older than one it has already been given.
//!
//! Every registration returns a [`Subscription`]. Dropping it unregisters
//! the listener, which gives deterministic teardown without any lifecycle
//! hooks.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use waymark_pages::reactive::Signal;
//!
//! let count = Signal::new(0);
//! let seen = Rc::new(Cell::new(0));
//!
//! let subscription = count.subscribe({
//!     let seen = Rc::clone(&seen);
//!     move |value| seen.set(*value)
//! });
//!
//! count.set(42);
//! assert_eq!(seen.get(), 42);
//!
//! drop(subscription);
//! count.set(7);
//! assert_eq!(seen.get(), 42);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle to a registered listener. Dropping it unregisters the listener.
#[must_use = "dropping a Subscription unregisters the listener immediately"]
pub struct Subscription {
	teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Creates a subscription that runs `teardown` when dropped.
	pub fn new<F>(teardown: F) -> Self
	where
		F: FnOnce() + 'static,
	{
		Self {
			teardown: Some(Box::new(teardown)),
		}
	}

	/// Creates a subscription with nothing to tear down.
	pub fn noop() -> Self {
		Self { teardown: None }
	}

	/// Unregisters the listener now.
	pub fn unsubscribe(self) {
		drop(self);
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(teardown) = self.teardown.take() {
			teardown();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.teardown.is_some())
			.finish()
	}
}

type Listener<T> = Rc<dyn Fn(&T)>;

struct ListenerSlots<T: 'static> {
	next_id: u64,
	slots: Vec<(u64, Listener<T>)>,
}

/// An ordered list of listeners receiving `&T`.
///
/// Shared by [`Signal`] and by host implementations for their event lists.
pub struct Listeners<T: 'static> {
	inner: Rc<RefCell<ListenerSlots<T>>>,
}

impl<T: 'static> Listeners<T> {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(RefCell::new(ListenerSlots {
				next_id: 0,
				slots: Vec::new(),
			})),
		}
	}

	/// Registers a listener.
	pub fn add<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&T) + 'static,
	{
		let id = {
			let mut inner = self.inner.borrow_mut();
			let id = inner.next_id;
			inner.next_id += 1;
			inner.slots.push((id, Rc::new(listener)));
			id
		};

		let weak = Rc::downgrade(&self.inner);
		Subscription::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.borrow_mut().slots.retain(|(slot_id, _)| *slot_id != id);
			}
		})
	}

	/// Calls every listener registered at the time of the call, in order.
	pub fn notify(&self, value: &T) {
		self.notify_until(value, || false);
	}

	/// Like [`notify`](Self::notify), but stops before the next listener
	/// once `stop` returns `true`. Returns whether every listener ran.
	pub fn notify_until(&self, value: &T, stop: impl Fn() -> bool) -> bool {
		let snapshot: Vec<Listener<T>> = self
			.inner
			.borrow()
			.slots
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();

		for listener in snapshot {
			if stop() {
				return false;
			}
			listener(value);
		}
		true
	}

	/// Returns the number of registered listeners.
	pub fn len(&self) -> usize {
		self.inner.borrow().slots.len()
	}

	/// Returns whether no listener is registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<T: 'static> Default for Listeners<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> Clone for Listeners<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: 'static> fmt::Debug for Listeners<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Listeners")
			.field("count", &self.len())
			.finish()
	}
}

/// A reactive cell holding a value and notifying subscribers when it is set.
///
/// Clones share the same value and subscriber list.
pub struct Signal<T: Clone + 'static> {
	value: Rc<RefCell<T>>,
	listeners: Listeners<T>,
	dispatch: Rc<Dispatch>,
}

/// Notification state shared by clones of one signal.
#[derive(Default)]
struct Dispatch {
	running: Cell<bool>,
	stale: Cell<bool>,
}

/// Clears `running` even if a subscriber panics.
struct RunningGuard<'a>(&'a Dispatch);

impl Drop for RunningGuard<'_> {
	fn drop(&mut self) {
		self.0.running.set(false);
		self.0.stale.set(false);
	}
}

impl<T: Clone + 'static> Signal<T> {
	/// Creates a signal with the given initial value.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			listeners: Listeners::new(),
			dispatch: Rc::new(Dispatch::default()),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T {
		self.value.borrow().clone()
	}

	/// Reads the current value by reference.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replaces the value and notifies subscribers.
	///
	/// Called from inside a subscriber, the value is stored at once and
	/// delivered by the outer call once the current subscriber returns.
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;

		let dispatch = &*self.dispatch;
		if dispatch.running.get() {
			dispatch.stale.set(true);
			return;
		}
		dispatch.running.set(true);
		let _guard = RunningGuard(dispatch);

		loop {
			dispatch.stale.set(false);
			let snapshot = self.get();
			if self
				.listeners
				.notify_until(&snapshot, || dispatch.stale.get())
				&& !dispatch.stale.get()
			{
				break;
			}
		}
	}

	/// Registers a callback run after every `set`.
	///
	/// The callback is not run for the value current at subscription time.
	pub fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn(&T) + 'static,
	{
		self.listeners.add(callback)
	}

	/// Returns the number of active subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.listeners.len()
	}
}

impl<T: Clone + 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			listeners: self.listeners.clone(),
			dispatch: Rc::clone(&self.dispatch),
		}
	}
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.value.borrow())
			.field("subscribers", &self.listeners.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_signal_set_and_get() {
		let signal = Signal::new(0);
		signal.set(100);
		assert_eq!(signal.get(), 100);
		assert_eq!(signal.with(|v| *v + 1), 101);
	}

	#[rstest]
	fn test_signal_clone_shares_value() {
		let signal1 = Signal::new(42);
		let signal2 = signal1.clone();

		signal1.set(100);
		assert_eq!(signal2.get(), 100);
	}

	#[rstest]
	fn test_subscriber_not_called_on_subscribe() {
		// Arrange
		let signal = Signal::new(1);
		let calls = Rc::new(Cell::new(0));

		// Act
		let _subscription = signal.subscribe({
			let calls = Rc::clone(&calls);
			move |_| calls.set(calls.get() + 1)
		});

		// Assert
		assert_eq!(calls.get(), 0);
		signal.set(2);
		signal.set(2);
		assert_eq!(calls.get(), 2);
	}

	#[rstest]
	fn test_drop_subscription_unsubscribes() {
		let signal = Signal::new(0);
		let subscription = signal.subscribe(|_| {});
		assert_eq!(signal.subscriber_count(), 1);

		subscription.unsubscribe();
		assert_eq!(signal.subscriber_count(), 0);
	}

	#[rstest]
	fn test_subscriber_may_set_again() {
		// Arrange
		let signal = Signal::new(0);
		let _subscription = signal.subscribe({
			let signal = signal.clone();
			move |value| {
				if *value < 3 {
					signal.set(value + 1);
				}
			}
		});

		// Act
		signal.set(1);

		// Assert
		assert_eq!(signal.get(), 3);
	}

	#[rstest]
	fn test_nested_set_is_not_followed_by_stale_value() {
		// Arrange: the first subscriber redirects 1 to 2, the second mirrors
		let signal = Signal::new(0);
		let _redirect = signal.subscribe({
			let signal = signal.clone();
			move |value| {
				if *value == 1 {
					signal.set(2);
				}
			}
		});
		let mirrored = Rc::new(RefCell::new(Vec::new()));
		let _mirror = signal.subscribe({
			let mirrored = Rc::clone(&mirrored);
			move |value| mirrored.borrow_mut().push(*value)
		});

		// Act
		signal.set(1);

		// Assert
		assert_eq!(signal.get(), 2);
		assert_eq!(*mirrored.borrow(), vec![2]);
	}

	#[rstest]
	fn test_earlier_subscriber_sees_every_value() {
		// Arrange
		let signal = Signal::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let _first = signal.subscribe({
			let seen = Rc::clone(&seen);
			move |value| seen.borrow_mut().push(*value)
		});
		let _redirect = signal.subscribe({
			let signal = signal.clone();
			move |value| {
				if *value == 1 {
					signal.set(2);
				}
			}
		});

		// Act
		signal.set(1);
		signal.set(5);

		// Assert
		assert_eq!(*seen.borrow(), vec![1, 2, 5]);
	}

	#[rstest]
	fn test_listeners_notify_until_stops() {
		let listeners: Listeners<()> = Listeners::new();
		let calls = Rc::new(Cell::new(0));
		let _a = listeners.add({
			let calls = Rc::clone(&calls);
			move |_| calls.set(calls.get() + 1)
		});
		let _b = listeners.add({
			let calls = Rc::clone(&calls);
			move |_| calls.set(calls.get() + 1)
		});

		let completed = listeners.notify_until(&(), || calls.get() >= 1);

		assert!(!completed);
		assert_eq!(calls.get(), 1);
	}

	#[rstest]
	fn test_listeners_notify_in_order() {
		let listeners: Listeners<&'static str> = Listeners::new();
		let log = Rc::new(RefCell::new(Vec::new()));

		let _a = listeners.add({
			let log = Rc::clone(&log);
			move |v| log.borrow_mut().push(format!("a:{}", v))
		});
		let _b = listeners.add({
			let log = Rc::clone(&log);
			move |v| log.borrow_mut().push(format!("b:{}", v))
		});

		listeners.notify(&"x");
		assert_eq!(*log.borrow(), vec!["a:x".to_string(), "b:x".to_string()]);
	}

	#[rstest]
	fn test_subscription_outliving_listeners() {
		let listeners: Listeners<()> = Listeners::new();
		let subscription = listeners.add(|_| {});
		drop(listeners);

		// Tearing down after the list is gone is a no-op.
		drop(subscription);
	}
}
