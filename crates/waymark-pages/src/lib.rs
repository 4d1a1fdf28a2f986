//! # Waymark Pages
//!
//! Browser-side routing on top of `waymark-core`:
//!
//! - [`NavigationController`]: current location, history integration and
//!   scroll correction
//! - [`Link`]: an element that navigates through the router on click
//! - [`RouterContext`] / [`Navigator`]: what links use to reach the router
//! - [`host`]: the browser abstraction, with an in-memory host for native
//!   targets and tests
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use waymark_core::{Ref, Route, RouterCore};
//! use waymark_pages::host::{BrowserHost, MemoryHost};
//! use waymark_pages::{ClickOutcome, NavigationController, RouterOptions, SyntheticClick};
//!
//! let core = RouterCore::new([
//!     Route::new("home", "/").unwrap(),
//!     Route::new("post", "/posts/:id").unwrap(),
//! ])
//! .unwrap();
//! let host = MemoryHost::new("/");
//! let controller = NavigationController::with_host(core, Rc::new(host.clone()), RouterOptions::default());
//!
//! let link = controller.link(Ref::new("post").with_param("id", 42));
//! assert!(matches!(link.handle_click(&SyntheticClick::new()), ClickOutcome::Navigated(_)));
//! assert_eq!(host.current_url(), "/posts/42");
//! ```

pub mod context;
pub mod controller;
pub mod event;
pub mod host;
pub mod link;
pub mod options;
pub mod reactive;
pub mod view;

pub use context::{DetachedNavigator, Navigator, RouterContext};
pub use controller::{NavigationController, NavigationOutcome};
pub use event::{ClickEvent, SyntheticClick};
pub use host::{BrowserHost, HostError, MemoryHost, detect_host};
pub use link::{ClickOutcome, Link, LinkMode, window_features};
pub use options::{RouterOptions, ScrollOnMissingHash};
pub use reactive::{Signal, Subscription};
pub use view::{ClickHandler, Component, ElementView, IntoView, View};
