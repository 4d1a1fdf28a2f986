//! Click event abstraction.
//!
//! Links only need a handful of things from a click: modifier state and
//! control over default action and propagation. [`ClickEvent`] captures
//! exactly that, so link handling works the same against a browser
//! `MouseEvent` and against a [`SyntheticClick`] built in tests or during
//! server-side rendering.

use std::cell::Cell;

/// The parts of a click event that link handling reads and changes.
pub trait ClickEvent {
	/// Whether the meta (command) key was held.
	fn meta_key(&self) -> bool;

	/// Whether the control key was held.
	fn ctrl_key(&self) -> bool;

	/// Whether the default action has been prevented.
	fn default_prevented(&self) -> bool;

	/// Prevents the default action.
	fn prevent_default(&self);

	/// Stops the event from reaching ancestor handlers.
	fn stop_propagation(&self);

	/// Whether a modifier that asks for a new window is held.
	fn has_new_window_modifier(&self) -> bool {
		self.meta_key() || self.ctrl_key()
	}
}

/// A click event constructed in Rust.
///
/// # Example
///
/// ```
/// use waymark_pages::{ClickEvent, SyntheticClick};
///
/// let event = SyntheticClick::new().with_ctrl(true);
/// assert!(event.has_new_window_modifier());
///
/// event.prevent_default();
/// assert!(event.default_prevented());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyntheticClick {
	meta: bool,
	ctrl: bool,
	default_prevented: Cell<bool>,
	propagation_stopped: Cell<bool>,
}

impl SyntheticClick {
	/// Creates a plain left click with no modifiers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the meta key state.
	pub fn with_meta(mut self, held: bool) -> Self {
		self.meta = held;
		self
	}

	/// Sets the control key state.
	pub fn with_ctrl(mut self, held: bool) -> Self {
		self.ctrl = held;
		self
	}

	/// Whether `stop_propagation` was called.
	pub fn is_propagation_stopped(&self) -> bool {
		self.propagation_stopped.get()
	}
}

impl ClickEvent for SyntheticClick {
	fn meta_key(&self) -> bool {
		self.meta
	}

	fn ctrl_key(&self) -> bool {
		self.ctrl
	}

	fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}

	fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	fn stop_propagation(&self) {
		self.propagation_stopped.set(true);
	}
}

#[cfg(target_arch = "wasm32")]
impl ClickEvent for web_sys::MouseEvent {
	fn meta_key(&self) -> bool {
		web_sys::MouseEvent::meta_key(self)
	}

	fn ctrl_key(&self) -> bool {
		web_sys::MouseEvent::ctrl_key(self)
	}

	fn default_prevented(&self) -> bool {
		AsRef::<web_sys::Event>::as_ref(self).default_prevented()
	}

	fn prevent_default(&self) {
		AsRef::<web_sys::Event>::as_ref(self).prevent_default();
	}

	fn stop_propagation(&self) {
		AsRef::<web_sys::Event>::as_ref(self).stop_propagation();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(false, false, false)]
	#[case(true, false, true)]
	#[case(false, true, true)]
	#[case(true, true, true)]
	fn test_new_window_modifier(#[case] meta: bool, #[case] ctrl: bool, #[case] expected: bool) {
		let event = SyntheticClick::new().with_meta(meta).with_ctrl(ctrl);
		assert_eq!(event.has_new_window_modifier(), expected);
	}

	#[rstest]
	fn test_prevent_and_stop() {
		let event = SyntheticClick::new();
		assert!(!event.default_prevented());
		assert!(!event.is_propagation_stopped());

		event.prevent_default();
		event.stop_propagation();

		assert!(event.default_prevented());
		assert!(event.is_propagation_stopped());
	}
}
