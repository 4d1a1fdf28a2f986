//! Browser navigation
//!
//! This module provides access to waymark-pages: the navigation controller,
//! browser hosts, the router context and the link component.

// Re-export all waymark-pages functionality
pub use waymark_pages::*;
