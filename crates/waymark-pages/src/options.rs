//! Router configuration.

use serde::{Deserialize, Serialize};

/// What to do after a location change whose hash target does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollOnMissingHash {
	/// Scroll to the top of the document.
	#[default]
	Top,
	/// Leave the scroll position as it is.
	Preserve,
}

/// Options for [`NavigationController`](crate::NavigationController).
///
/// Deserialises from camelCase JSON, with every field optional:
///
/// ```
/// use waymark_pages::{RouterOptions, ScrollOnMissingHash};
///
/// let options = RouterOptions::from_json(r#"{"scrollOnMissingHash":"preserve"}"#).unwrap();
/// assert_eq!(options.scroll_on_missing_hash(), ScrollOnMissingHash::Preserve);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouterOptions {
	scroll_on_missing_hash: ScrollOnMissingHash,
}

impl RouterOptions {
	/// Creates the default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the missing-hash scroll policy.
	pub fn with_scroll_on_missing_hash(mut self, policy: ScrollOnMissingHash) -> Self {
		self.scroll_on_missing_hash = policy;
		self
	}

	/// Returns the missing-hash scroll policy.
	pub fn scroll_on_missing_hash(&self) -> ScrollOnMissingHash {
		self.scroll_on_missing_hash
	}

	/// Parses options from a JSON document.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
