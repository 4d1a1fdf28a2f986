//! # Waymark Core
//!
//! Route resolution for single-page applications:
//!
//! - [`RouterCore`]: resolves URLs into [`Location`]s and builds hrefs from
//!   [`Ref`]s over a closed set of [`Route`]s
//! - [`PathPattern`]: `:param`, `{param}` and `{param:*}` path patterns
//! - [`is_equal`] / [`is_same_page`]: structural equality and the same-page
//!   rule used by navigation
//!
//! Nothing in this crate touches a browser; see `waymark-pages` for the
//! navigation controller and link rendering.
//!
//! ## Example
//!
//! ```
//! use waymark_core::{Ref, Resolver, Route, RouterCore};
//!
//! let core = RouterCore::new([
//!     Route::new("home", "/").unwrap(),
//!     Route::new("post", "/posts/:id").unwrap(),
//! ])
//! .unwrap();
//!
//! let location = core.resolve_location("/posts/42");
//! assert_eq!(location.name(), "post");
//! assert_eq!(core.build_href(&location.to_ref()), "/posts/42");
//! ```

pub mod equality;
pub mod error;
pub mod location;
pub mod pattern;
pub mod resolver;
pub mod route;

pub use equality::{is_equal, is_equal_maps};
pub use error::RouterError;
pub use location::{Location, NOT_FOUND, PageIdentity, ParamMap, Ref, is_same_page};
pub use pattern::PathPattern;
pub use resolver::{Resolver, RouterCore};
pub use route::{QueryField, Route, ValueKind};
