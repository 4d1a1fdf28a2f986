//! Router context handed to links.

use std::fmt;
use std::rc::Rc;

use waymark_core::{Location, Ref};

use crate::controller::NavigationOutcome;

/// What a [`Link`](crate::Link) needs from the router.
pub trait Navigator {
	/// Returns the current location.
	fn location(&self) -> Location;

	/// Navigates to `to`.
	fn navigate(&self, to: &Ref) -> NavigationOutcome;

	/// Builds the href for `to`.
	fn build_href(&self, to: &Ref) -> String;

	/// Opens `href` in a new browsing context with the given window features.
	fn open_new_window(&self, href: &str, features: &str);
}

/// Navigator used when no router has been provided.
///
/// Reports the not-found location, builds empty hrefs and ignores
/// navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedNavigator;

impl Navigator for DetachedNavigator {
	fn location(&self) -> Location {
		Location::not_found()
	}

	fn navigate(&self, to: &Ref) -> NavigationOutcome {
		tracing::debug!(route = to.name(), "navigation without a router ignored");
		NavigationOutcome::Rejected
	}

	fn build_href(&self, _to: &Ref) -> String {
		String::new()
	}

	fn open_new_window(&self, _href: &str, _features: &str) {}
}

/// Shared handle to the active [`Navigator`].
///
/// The default value is backed by [`DetachedNavigator`].
#[derive(Clone)]
pub struct RouterContext(Rc<dyn Navigator>);

impl RouterContext {
	/// Wraps a navigator.
	pub fn new(navigator: Rc<dyn Navigator>) -> Self {
		Self(navigator)
	}

	/// Returns the wrapped navigator.
	pub fn navigator(&self) -> &Rc<dyn Navigator> {
		&self.0
	}

	/// Returns the current location.
	pub fn location(&self) -> Location {
		self.0.location()
	}

	/// Navigates to `to`.
	pub fn navigate(&self, to: &Ref) -> NavigationOutcome {
		self.0.navigate(to)
	}

	/// Builds the href for `to`.
	pub fn build_href(&self, to: &Ref) -> String {
		self.0.build_href(to)
	}

	/// Opens `href` in a new browsing context.
	pub fn open_new_window(&self, href: &str, features: &str) {
		self.0.open_new_window(href, features)
	}
}

impl Default for RouterContext {
	fn default() -> Self {
		Self(Rc::new(DetachedNavigator))
	}
}

impl fmt::Debug for RouterContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("RouterContext")
			.field(&self.0.location().name())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_context_is_detached() {
		// Arrange
		let context = RouterContext::default();
		let to = Ref::new("post").with_param("id", 1);

		// Act & Assert
		assert!(context.location().is_not_found());
		assert_eq!(context.build_href(&to), "");
		assert_eq!(context.navigate(&to), NavigationOutcome::Rejected);
	}
}
