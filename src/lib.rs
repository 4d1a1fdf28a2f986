//! # Waymark
//!
//! Client-side routing for single-page applications.
//!
//! - [`routing`]: a closed set of named routes, URL to location resolution
//!   and reference to href building
//! - [`pages`]: the navigation controller (history, back/forward, scroll
//!   correction) and the `Link` component
//!
//! Most applications only need the [`prelude`].
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use waymark::prelude::*;
//!
//! let core = RouterCore::new([
//!     Route::new("home", "/").unwrap(),
//!     Route::new("post", "/posts/:id").unwrap(),
//! ])
//! .unwrap();
//!
//! let location = core.resolve_location("/posts/42");
//! assert_eq!(location.name(), "post");
//!
//! let host = MemoryHost::new("/");
//! let router = NavigationController::with_host(core, Rc::new(host.clone()), RouterOptions::default());
//! router.navigate(&Ref::new("post").with_param("id", 7));
//! assert_eq!(host.current_url(), "/posts/7");
//! ```

pub mod pages;
pub mod routing;

pub mod prelude {
	pub use crate::pages::{
		BrowserHost, ClickEvent, ClickOutcome, Component, ElementView, IntoView, Link, LinkMode,
		MemoryHost, NavigationController, NavigationOutcome, Navigator, RouterContext,
		RouterOptions, ScrollOnMissingHash, Subscription, SyntheticClick, View, detect_host,
	};
	pub use crate::routing::{
		Location, NOT_FOUND, ParamMap, Ref, Resolver, Route, RouterCore, RouterError, ValueKind,
		is_equal, is_same_page,
	};
}
