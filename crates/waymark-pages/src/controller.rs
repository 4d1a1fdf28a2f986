//! Navigation controller.
//!
//! Owns the current [`Location`] and keeps it in sync with the browser:
//!
//! - back/forward (`popstate`) re-resolves the host URL and replaces the
//!   location unconditionally
//! - [`NavigationController::navigate`] either scrolls within the current
//!   page or pushes a history entry and replaces the location
//! - after every replacement the scroll position is corrected: to the hash
//!   target if it exists, otherwise to the top when the page changed (or the
//!   hash changed under [`ScrollOnMissingHash::Top`])
//!
//! The popstate listener and the scroll correction are registered once, at
//! construction, and released by [`NavigationController::teardown`] or when
//! the last handle is dropped.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use waymark_core::{Ref, Route, RouterCore};
//! use waymark_pages::host::MemoryHost;
//! use waymark_pages::{NavigationController, NavigationOutcome, RouterOptions};
//!
//! let core = RouterCore::new([
//!     Route::new("home", "/").unwrap(),
//!     Route::new("post", "/posts/:id").unwrap(),
//! ])
//! .unwrap();
//! let host = MemoryHost::new("/");
//! let controller = NavigationController::with_host(core, Rc::new(host.clone()), RouterOptions::default());
//!
//! let outcome = controller.navigate(&Ref::new("post").with_param("id", 7));
//! assert_eq!(outcome, NavigationOutcome::Pushed);
//! assert_eq!(controller.location().name(), "post");
//! assert_eq!(host.history_len(), 2);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use waymark_core::{Location, Ref, Resolver, is_same_page};

use crate::context::{Navigator, RouterContext};
use crate::host::{BrowserHost, detect_host};
use crate::link::Link;
use crate::options::{RouterOptions, ScrollOnMissingHash};
use crate::reactive::{Signal, Subscription};

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// Same page; scrolled to the hash target.
	Scrolled,
	/// Same page with no reachable hash target; nothing happened.
	Unchanged,
	/// A history entry was pushed and the location replaced.
	Pushed,
	/// The current history entry was replaced and the location replaced.
	Replaced,
	/// No browser host; the stored location was replaced.
	Updated,
	/// The target could not be turned into an href, or the host refused
	/// the history change.
	Rejected,
}

impl NavigationOutcome {
	/// Whether the current location changed.
	pub fn changed_location(self) -> bool {
		matches!(self, Self::Pushed | Self::Replaced | Self::Updated)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
	Push,
	Replace,
}

struct Inner<R> {
	resolver: Rc<R>,
	host: Option<Rc<dyn BrowserHost>>,
	location: Signal<Location>,
	options: RouterOptions,
	subscriptions: RefCell<Vec<Subscription>>,
}

/// Handle to the router state. Clones share the same state.
pub struct NavigationController<R: Resolver + 'static> {
	inner: Rc<Inner<R>>,
}

impl<R: Resolver + 'static> NavigationController<R> {
	/// Creates a controller driven by a browser host.
	///
	/// The initial location is resolved from the host's current URL.
	pub fn with_host(resolver: R, host: Rc<dyn BrowserHost>, options: RouterOptions) -> Self {
		let resolver = Rc::new(resolver);
		let initial = resolver.resolve_location(&host.current_url());
		tracing::debug!(route = initial.name(), "router initialised");

		let location = Signal::new(initial.clone());
		let scroll = register_scroll_correction(
			&location,
			Rc::downgrade(&host),
			options.scroll_on_missing_hash(),
			initial,
		);
		let popstate = register_popstate(&location, &resolver, &host);

		Self {
			inner: Rc::new(Inner {
				resolver,
				host: Some(host),
				location,
				options,
				subscriptions: RefCell::new(vec![scroll, popstate]),
			}),
		}
	}

	/// Creates a controller with no browser host.
	///
	/// History and scrolling are skipped; navigation only replaces the
	/// stored location.
	pub fn headless(resolver: R, initial_url: &str, options: RouterOptions) -> Self {
		let resolver = Rc::new(resolver);
		let initial = resolver.resolve_location(initial_url);
		tracing::debug!(route = initial.name(), "headless router initialised");

		Self {
			inner: Rc::new(Inner {
				resolver,
				host: None,
				location: Signal::new(initial),
				options,
				subscriptions: RefCell::new(Vec::new()),
			}),
		}
	}

	/// Uses the browser host when running in a browser, otherwise runs
	/// headless from `fallback_url`.
	pub fn detect(resolver: R, fallback_url: &str, options: RouterOptions) -> Self {
		match detect_host() {
			Some(host) => Self::with_host(resolver, host, options),
			None => Self::headless(resolver, fallback_url, options),
		}
	}

	/// Returns the current location.
	pub fn location(&self) -> Location {
		self.inner.location.get()
	}

	/// Returns the reactive cell holding the current location.
	pub fn location_signal(&self) -> Signal<Location> {
		self.inner.location.clone()
	}

	/// Registers a callback run after every location replacement.
	pub fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn(&Location) + 'static,
	{
		self.inner.location.subscribe(callback)
	}

	/// Navigates to `to`, pushing a history entry for a different page.
	pub fn navigate(&self, to: &Ref) -> NavigationOutcome {
		self.go(to, HistoryMode::Push)
	}

	/// Navigates to `to`, replacing the current history entry for a
	/// different page.
	pub fn replace(&self, to: &Ref) -> NavigationOutcome {
		self.go(to, HistoryMode::Replace)
	}

	/// Builds the href for `to`, or an empty string if that fails.
	pub fn build_href(&self, to: &Ref) -> String {
		self.inner.resolver.build_href(to)
	}

	/// Returns the resolver.
	pub fn resolver(&self) -> &R {
		&self.inner.resolver
	}

	/// Returns the options.
	pub fn options(&self) -> &RouterOptions {
		&self.inner.options
	}

	/// Returns the browser host, if any.
	pub fn host(&self) -> Option<&Rc<dyn BrowserHost>> {
		self.inner.host.as_ref()
	}

	/// Whether the controller is driven by a browser host.
	pub fn is_browser(&self) -> bool {
		self.inner.host.is_some()
	}

	/// Releases the popstate listener and the scroll correction.
	///
	/// Calling it more than once is harmless.
	pub fn teardown(&self) {
		let released = std::mem::take(&mut *self.inner.subscriptions.borrow_mut());
		if !released.is_empty() {
			tracing::debug!(count = released.len(), "router listeners released");
		}
	}

	/// Returns a context backed by this controller.
	pub fn context(&self) -> RouterContext {
		RouterContext::new(Rc::new(self.clone()))
	}

	/// Creates a link to `to` bound to this controller.
	pub fn link(&self, to: Ref) -> Link {
		Link::new(to).with_context(self.context())
	}

	fn go(&self, to: &Ref, mode: HistoryMode) -> NavigationOutcome {
		let inner = &self.inner;
		let href = match inner.resolver.try_build_href(to) {
			Ok(href) => href,
			Err(err) => {
				tracing::warn!(route = to.name(), error = %err, "navigation rejected");
				return NavigationOutcome::Rejected;
			}
		};
		let target = inner.resolver.ref_to_location(to);
		// A not-found target never counts as the page already shown.
		let same_page = |current: &Location| !target.is_not_found() && is_same_page(current, &target);

		let Some(host) = &inner.host else {
			if inner.location.with(same_page) {
				tracing::debug!(route = to.name(), "same page, nothing to do");
				return NavigationOutcome::Unchanged;
			}
			tracing::debug!(route = target.name(), href = %href, "location updated without history");
			inner.location.set(target);
			return NavigationOutcome::Updated;
		};

		let current = inner.resolver.resolve_location(&host.current_url());
		if same_page(&current) {
			if let Some(top) = to.hash().and_then(|hash| host.element_offset_top(hash)) {
				tracing::debug!(route = to.name(), hash = ?to.hash(), "scrolling within page");
				host.scroll_to(0.0, top);
				return NavigationOutcome::Scrolled;
			}
			tracing::debug!(route = to.name(), "same page, nothing to do");
			return NavigationOutcome::Unchanged;
		}

		let (result, outcome) = match mode {
			HistoryMode::Push => (host.push_state(&href), NavigationOutcome::Pushed),
			HistoryMode::Replace => (host.replace_state(&href), NavigationOutcome::Replaced),
		};
		if let Err(err) = result {
			tracing::warn!(href = %href, error = %err, "history update failed");
			return NavigationOutcome::Rejected;
		}

		tracing::debug!(route = target.name(), href = %href, ?mode, "navigated");
		inner.location.set(target);
		outcome
	}
}

fn register_popstate<R: Resolver + 'static>(
	location: &Signal<Location>,
	resolver: &Rc<R>,
	host: &Rc<dyn BrowserHost>,
) -> Subscription {
	let location = location.clone();
	let resolver = Rc::clone(resolver);
	let weak_host = Rc::downgrade(host);

	host.on_popstate(Rc::new(move || {
		let Some(host) = weak_host.upgrade() else {
			return;
		};
		let next = resolver.resolve_location(&host.current_url());
		tracing::debug!(route = next.name(), "history traversal");
		location.set(next);
	}))
}

fn register_scroll_correction(
	location: &Signal<Location>,
	host: Weak<dyn BrowserHost>,
	policy: ScrollOnMissingHash,
	initial: Location,
) -> Subscription {
	let previous = RefCell::new(initial);
	location.subscribe(move |next| {
		let previous = previous.replace(next.clone());
		if let Some(host) = host.upgrade() {
			correct_scroll(host.as_ref(), policy, &previous, next);
		}
	})
}

/// Scrolls after the location changed from `previous` to `next`.
fn correct_scroll(
	host: &dyn BrowserHost,
	policy: ScrollOnMissingHash,
	previous: &Location,
	next: &Location,
) {
	if let Some(top) = next.hash().and_then(|hash| host.element_offset_top(hash)) {
		host.scroll_to(0.0, top);
		return;
	}

	let hash_changed = previous.hash() != next.hash();
	if !is_same_page(previous, next) || (hash_changed && policy == ScrollOnMissingHash::Top) {
		host.scroll_to(0.0, 0.0);
	}
}

impl<R: Resolver + 'static> Navigator for NavigationController<R> {
	fn location(&self) -> Location {
		NavigationController::location(self)
	}

	fn navigate(&self, to: &Ref) -> NavigationOutcome {
		NavigationController::navigate(self, to)
	}

	fn build_href(&self, to: &Ref) -> String {
		NavigationController::build_href(self, to)
	}

	fn open_new_window(&self, href: &str, features: &str) {
		match &self.inner.host {
			Some(host) => {
				if let Err(err) = host.open_window(href, "_blank", features) {
					tracing::warn!(href = %href, error = %err, "failed to open window");
				}
			}
			None => tracing::debug!(href = %href, "no browser host, window not opened"),
		}
	}
}

impl<R: Resolver + 'static> Clone for NavigationController<R> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<R: Resolver + 'static> fmt::Debug for NavigationController<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavigationController")
			.field("location", &self.inner.location.get())
			.field("options", &self.inner.options)
			.field("is_browser", &self.is_browser())
			.field("listeners", &self.inner.subscriptions.borrow().len())
			.finish()
	}
}
