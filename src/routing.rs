//! Route resolution
//!
//! This module provides access to waymark-core: route definitions, path
//! patterns, URL resolution, href building and the same-page rule.
//!
//! ## Example
//!
//! ```rust
//! use waymark::routing::{Ref, Resolver, Route, RouterCore};
//!
//! let core = RouterCore::new([Route::new("post", "/posts/:id").unwrap()]).unwrap();
//! assert_eq!(core.build_href(&Ref::new("post").with_param("id", 7)), "/posts/7");
//! ```

// Re-export all waymark-core functionality
pub use waymark_core::*;
