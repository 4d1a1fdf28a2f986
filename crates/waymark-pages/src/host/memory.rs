//! In-memory browser host.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{BrowserHost, HostError};
use crate::reactive::{Listeners, Subscription};

/// A window opened through [`BrowserHost::open_window`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedWindow {
	/// The opened URL.
	pub href: String,
	/// The browsing context name, e.g. `_blank`.
	pub target: String,
	/// The comma separated window features.
	pub features: String,
}

#[derive(Debug)]
struct MemoryState {
	entries: Vec<String>,
	index: usize,
	elements: HashMap<String, f64>,
	scroll: (f64, f64),
	opened: Vec<OpenedWindow>,
	history_locked: bool,
}

/// A browser host backed by an in-memory history stack.
///
/// Clones share state, so a test can hand one clone to the controller and
/// inspect history, scroll position and opened windows through another.
///
/// # Example
///
/// ```
/// use waymark_pages::host::{BrowserHost, MemoryHost};
///
/// let host = MemoryHost::new("/");
/// host.push_state("/posts/1").unwrap();
/// host.push_state("/posts/2").unwrap();
/// host.back();
/// assert_eq!(host.current_url(), "/posts/1");
/// assert_eq!(host.history_len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHost {
	state: Rc<RefCell<MemoryState>>,
	popstate: Listeners<()>,
}

impl MemoryHost {
	/// Creates a host whose history holds a single entry.
	pub fn new(initial_url: impl Into<String>) -> Self {
		Self {
			state: Rc::new(RefCell::new(MemoryState {
				entries: vec![initial_url.into()],
				index: 0,
				elements: HashMap::new(),
				scroll: (0.0, 0.0),
				opened: Vec::new(),
				history_locked: false,
			})),
			popstate: Listeners::new(),
		}
	}

	/// Adds (or moves) an element with the given id at a vertical offset.
	pub fn insert_element(&self, id: impl Into<String>, offset_top: f64) {
		self.state.borrow_mut().elements.insert(id.into(), offset_top);
	}

	/// Removes the element with the given id.
	pub fn remove_element(&self, id: &str) {
		self.state.borrow_mut().elements.remove(id);
	}

	/// Returns the number of history entries.
	pub fn history_len(&self) -> usize {
		self.state.borrow().entries.len()
	}

	/// Returns every history entry, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.state.borrow().entries.clone()
	}

	/// Returns the current scroll position.
	pub fn scroll_position(&self) -> (f64, f64) {
		self.state.borrow().scroll
	}

	/// Returns the windows opened so far.
	pub fn opened_windows(&self) -> Vec<OpenedWindow> {
		self.state.borrow().opened.clone()
	}

	/// Makes `push_state` and `replace_state` fail, as a browser does when
	/// the page is sandboxed.
	pub fn lock_history(&self, locked: bool) {
		self.state.borrow_mut().history_locked = locked;
	}

	/// Returns the number of registered popstate listeners.
	pub fn popstate_listener_count(&self) -> usize {
		self.popstate.len()
	}

	/// Moves one entry back and fires popstate. No-op at the first entry.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves one entry forward and fires popstate. No-op at the last entry.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Moves `delta` entries through history and fires popstate.
	///
	/// Returns `false` without firing if the target entry does not exist.
	pub fn go(&self, delta: isize) -> bool {
		{
			let mut state = self.state.borrow_mut();
			let Some(index) = state.index.checked_add_signed(delta) else {
				return false;
			};
			if delta == 0 || index >= state.entries.len() {
				return false;
			}
			state.index = index;
		}
		self.popstate.notify(&());
		true
	}
}

impl BrowserHost for MemoryHost {
	fn current_url(&self) -> String {
		let state = self.state.borrow();
		state.entries[state.index].clone()
	}

	fn push_state(&self, href: &str) -> Result<(), HostError> {
		let mut state = self.state.borrow_mut();
		if state.history_locked {
			return Err(HostError::Js("history is locked".to_string()));
		}
		let next = state.index + 1;
		state.entries.truncate(next);
		state.entries.push(href.to_string());
		state.index = next;
		Ok(())
	}

	fn replace_state(&self, href: &str) -> Result<(), HostError> {
		let mut state = self.state.borrow_mut();
		if state.history_locked {
			return Err(HostError::Js("history is locked".to_string()));
		}
		let index = state.index;
		state.entries[index] = href.to_string();
		Ok(())
	}

	fn element_offset_top(&self, id: &str) -> Option<f64> {
		self.state.borrow().elements.get(id).copied()
	}

	fn scroll_to(&self, x: f64, y: f64) {
		self.state.borrow_mut().scroll = (x, y);
	}

	fn open_window(&self, href: &str, target: &str, features: &str) -> Result<(), HostError> {
		self.state.borrow_mut().opened.push(OpenedWindow {
			href: href.to_string(),
			target: target.to_string(),
			features: features.to_string(),
		});
		Ok(())
	}

	fn on_popstate(&self, listener: Rc<dyn Fn()>) -> Subscription {
		self.popstate.add(move |_| listener())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_push_truncates_forward_entries() {
		// Arrange
		let host = MemoryHost::new("/a");
		host.push_state("/b").unwrap();
		host.push_state("/c").unwrap();
		host.back();
		host.back();

		// Act
		host.push_state("/d").unwrap();

		// Assert
		assert_eq!(host.entries(), vec!["/a".to_string(), "/d".to_string()]);
		assert_eq!(host.current_url(), "/d");
		assert!(!host.forward());
	}

	#[rstest]
	fn test_replace_keeps_length() {
		let host = MemoryHost::new("/a");
		host.replace_state("/b").unwrap();

		assert_eq!(host.history_len(), 1);
		assert_eq!(host.current_url(), "/b");
	}

	#[rstest]
	fn test_back_and_forward_fire_popstate() {
		// Arrange
		let host = MemoryHost::new("/a");
		host.push_state("/b").unwrap();
		let fired = Rc::new(Cell::new(0));
		let _subscription = host.on_popstate({
			let fired = Rc::clone(&fired);
			Rc::new(move || fired.set(fired.get() + 1))
		});

		// Act & Assert
		assert!(host.back());
		assert_eq!(host.current_url(), "/a");
		assert!(!host.back());
		assert!(host.forward());
		assert_eq!(host.current_url(), "/b");
		assert_eq!(fired.get(), 2);
	}

	#[rstest]
	fn test_popstate_subscription_drop() {
		let host = MemoryHost::new("/");
		let subscription = host.on_popstate(Rc::new(|| {}));
		assert_eq!(host.popstate_listener_count(), 1);

		drop(subscription);
		assert_eq!(host.popstate_listener_count(), 0);
	}

	#[rstest]
	fn test_locked_history_rejects_mutation() {
		let host = MemoryHost::new("/");
		host.lock_history(true);

		assert!(host.push_state("/x").is_err());
		assert!(host.replace_state("/x").is_err());
		assert_eq!(host.entries(), vec!["/".to_string()]);
	}

	#[rstest]
	fn test_elements_and_scroll() {
		let host = MemoryHost::new("/");
		host.insert_element("intro", 120.0);

		assert_eq!(host.element_offset_top("intro"), Some(120.0));
		assert_eq!(host.element_offset_top("missing"), None);

		host.remove_element("intro");
		assert_eq!(host.element_offset_top("intro"), None);

		host.scroll_to(0.0, 50.0);
		assert_eq!(host.scroll_position(), (0.0, 50.0));
	}
}
