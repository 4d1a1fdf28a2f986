//! Browser environment abstraction.
//!
//! The navigation controller never talks to `window` directly; it goes
//! through [`BrowserHost`]. Two implementations are provided:
//!
//! - [`MemoryHost`]: an in-memory history stack and document model, used on
//!   native targets and in tests
//! - `WebHost` (wasm32 only): the real `window`, `history` and `document`
//!
//! [`detect_host`] returns the browser host when one is available and
//! `None` otherwise, in which case the controller runs headless.

mod memory;
#[cfg(target_arch = "wasm32")]
mod web;

use std::rc::Rc;

use thiserror::Error;

use crate::reactive::Subscription;

pub use memory::{MemoryHost, OpenedWindow};
#[cfg(target_arch = "wasm32")]
pub use web::WebHost;

/// Error type for host operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
	/// A browser object (window, history, document) is not available.
	#[error("{0} not available")]
	Unavailable(&'static str),
	/// The browser rejected the call.
	#[error("browser error: {0}")]
	Js(String),
}

/// Capabilities the controller and links need from the environment.
pub trait BrowserHost {
	/// Returns the current URL as the address bar shows it.
	fn current_url(&self) -> String;

	/// Appends a history entry for `href` and makes it current.
	fn push_state(&self, href: &str) -> Result<(), HostError>;

	/// Replaces the current history entry with `href`.
	fn replace_state(&self, href: &str) -> Result<(), HostError>;

	/// Returns the vertical offset of the element with the given id, if the
	/// element exists.
	fn element_offset_top(&self, id: &str) -> Option<f64>;

	/// Scrolls the document to the given position.
	fn scroll_to(&self, x: f64, y: f64);

	/// Opens `href` in a new browsing context.
	fn open_window(&self, href: &str, target: &str, features: &str) -> Result<(), HostError>;

	/// Registers a listener for back/forward navigation.
	///
	/// The listener stays registered until the returned subscription drops.
	fn on_popstate(&self, listener: Rc<dyn Fn()>) -> Subscription;
}

/// Returns the browser host if running inside a browser window.
#[cfg(target_arch = "wasm32")]
pub fn detect_host() -> Option<Rc<dyn BrowserHost>> {
	WebHost::detect().map(|host| Rc::new(host) as Rc<dyn BrowserHost>)
}

/// Returns the browser host if running inside a browser window.
///
/// Always `None` on non-WASM targets.
#[cfg(not(target_arch = "wasm32"))]
pub fn detect_host() -> Option<Rc<dyn BrowserHost>> {
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_host_error_display() {
		assert_eq!(
			HostError::Unavailable("history").to_string(),
			"history not available"
		);
		assert_eq!(
			HostError::Js("SecurityError".to_string()).to_string(),
			"browser error: SecurityError"
		);
	}

	#[cfg(not(target_arch = "wasm32"))]
	#[rstest]
	fn test_detect_host_native() {
		assert!(detect_host().is_none());
	}
}
