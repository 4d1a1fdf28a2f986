//! Error types for route configuration and href building.

use thiserror::Error;

/// Error type for router operations.
///
/// Resolution of inbound URLs never produces these errors; an unknown URL
/// resolves to the not-found location instead. Errors only surface while
/// configuring routes or when building an href for an unusable reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A path pattern failed validation or compilation.
	#[error("Invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The offending pattern string.
		pattern: String,
		/// Why it was rejected.
		reason: String,
	},
	/// Two routes were registered under the same name.
	#[error("Duplicate route name: {0}")]
	DuplicateRouteName(String),
	/// A route tried to use the reserved not-found name.
	#[error("Reserved route name: {0}")]
	ReservedRouteName(String),
	/// A reference named a route that does not exist.
	#[error("Invalid route name: {0}")]
	InvalidRouteName(String),
	/// A reference lacks a parameter required by the route pattern.
	#[error("Missing parameter '{param}' for route '{route}'")]
	MissingParameter {
		/// Route name.
		route: String,
		/// Missing parameter name.
		param: String,
	},
	/// A URL could not be parsed.
	#[error("Invalid URL: {0}")]
	InvalidUrl(String),
}
