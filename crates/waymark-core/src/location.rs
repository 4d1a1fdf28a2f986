//! Locations and references.
//!
//! A [`Location`] is the resolved identity of a URL. A [`Ref`] is what a
//! caller wants to navigate to before it has been resolved. Both carry the
//! same four fields; they are kept as distinct types so that an unresolved
//! target can never be stored as the current location by accident.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::equality::is_equal_maps;

/// Key/value map used for route params and query values.
pub type ParamMap = serde_json::Map<String, Value>;

/// Reserved route name carried by locations that match no route.
pub const NOT_FOUND: &str = "$not_found";

/// The resolved, structured identity of a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
	name: String,
	#[serde(default)]
	params: ParamMap,
	#[serde(default)]
	query: ParamMap,
	#[serde(default, deserialize_with = "deserialize_hash")]
	hash: Option<String>,
}

impl Location {
	/// Creates a location from its parts.
	pub fn new(
		name: impl Into<String>,
		params: ParamMap,
		query: ParamMap,
		hash: Option<String>,
	) -> Self {
		Self {
			name: name.into(),
			params,
			query,
			hash: hash.filter(|h| !h.is_empty()),
		}
	}

	/// The location every unmatched URL resolves to.
	pub fn not_found() -> Self {
		Self::new(NOT_FOUND, ParamMap::new(), ParamMap::new(), None)
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the path params.
	pub fn params(&self) -> &ParamMap {
		&self.params
	}

	/// Returns the query values.
	pub fn query(&self) -> &ParamMap {
		&self.query
	}

	/// Returns the hash without the leading `#`.
	pub fn hash(&self) -> Option<&str> {
		self.hash.as_deref()
	}

	/// Returns whether this location matched no route.
	pub fn is_not_found(&self) -> bool {
		self.name == NOT_FOUND
	}

	/// Converts this location into a reference to the same place.
	pub fn to_ref(&self) -> Ref {
		Ref {
			name: self.name.clone(),
			params: self.params.clone(),
			query: self.query.clone(),
			hash: self.hash.clone(),
		}
	}
}

/// A navigation target supplied by application code.
///
/// # Example
///
/// ```
/// use waymark_core::Ref;
///
/// let to = Ref::new("post").with_param("id", "7").with_hash("comments");
/// assert_eq!(to.name(), "post");
/// assert_eq!(to.hash(), Some("comments"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ref {
	name: String,
	#[serde(default)]
	params: ParamMap,
	#[serde(default)]
	query: ParamMap,
	#[serde(default, deserialize_with = "deserialize_hash")]
	hash: Option<String>,
}

/// Reads a hash, treating `""` as no hash.
fn deserialize_hash<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let hash = Option::<String>::deserialize(deserializer)?;
	Ok(hash.filter(|h| !h.is_empty()))
}

impl Ref {
	/// Creates a reference to the named route with no params.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	/// Sets a path param.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.params.insert(key.into(), value.into());
		self
	}

	/// Sets a query value.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.query.insert(key.into(), value.into());
		self
	}

	/// Sets the hash. An empty string clears it.
	pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
		let hash = hash.into();
		self.hash = (!hash.is_empty()).then_some(hash);
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the path params.
	pub fn params(&self) -> &ParamMap {
		&self.params
	}

	/// Returns the query values.
	pub fn query(&self) -> &ParamMap {
		&self.query
	}

	/// Returns the hash, if any.
	pub fn hash(&self) -> Option<&str> {
		self.hash.as_deref()
	}
}

/// Anything that identifies a page: a route name plus params and query.
pub trait PageIdentity {
	/// Route name.
	fn route_name(&self) -> &str;
	/// Path params.
	fn route_params(&self) -> &ParamMap;
	/// Query values.
	fn route_query(&self) -> &ParamMap;
	/// Hash, excluded from page identity.
	fn route_hash(&self) -> Option<&str>;
}

impl PageIdentity for Location {
	fn route_name(&self) -> &str {
		&self.name
	}

	fn route_params(&self) -> &ParamMap {
		&self.params
	}

	fn route_query(&self) -> &ParamMap {
		&self.query
	}

	fn route_hash(&self) -> Option<&str> {
		self.hash()
	}
}

impl PageIdentity for Ref {
	fn route_name(&self) -> &str {
		&self.name
	}

	fn route_params(&self) -> &ParamMap {
		&self.params
	}

	fn route_query(&self) -> &ParamMap {
		&self.query
	}

	fn route_hash(&self) -> Option<&str> {
		self.hash()
	}
}

/// Returns whether `a` and `b` denote the same page.
///
/// Name, params and query must match; the hash is ignored.
pub fn is_same_page<A, B>(a: &A, b: &B) -> bool
where
	A: PageIdentity + ?Sized,
	B: PageIdentity + ?Sized,
{
	a.route_name() == b.route_name()
		&& is_equal_maps(a.route_params(), b.route_params())
		&& is_equal_maps(a.route_query(), b.route_query())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn post(id: &str) -> Location {
		let mut params = ParamMap::new();
		params.insert("id".to_string(), json!(id));
		Location::new("post", params, ParamMap::new(), None)
	}

	#[rstest]
	fn test_same_page_ignores_hash() {
		let location = post("42");
		let to = Ref::new("post").with_param("id", "42").with_hash("comments");

		assert!(is_same_page(&location, &to));
	}

	#[rstest]
	fn test_different_params_is_different_page() {
		let to = Ref::new("post").with_param("id", "7");
		assert!(!is_same_page(&post("42"), &to));
	}

	#[rstest]
	fn test_different_name_is_different_page() {
		let to = Ref::new("draft").with_param("id", "42");
		assert!(!is_same_page(&post("42"), &to));
	}

	#[rstest]
	fn test_query_participates_in_identity() {
		let to = Ref::new("post").with_param("id", "42").with_query("page", 2);
		assert!(!is_same_page(&post("42"), &to));
	}

	#[rstest]
	fn test_empty_hash_is_none() {
		let location = Location::new("home", ParamMap::new(), ParamMap::new(), Some(String::new()));
		assert_eq!(location.hash(), None);
		assert_eq!(Ref::new("home").with_hash("").hash(), None);
	}

	#[rstest]
	fn test_to_ref_round_trips_identity() {
		let location = post("42");
		assert!(is_same_page(&location, &location.to_ref()));
	}

	#[rstest]
	fn test_not_found_location() {
		let location = Location::not_found();
		assert!(location.is_not_found());
		assert!(location.params().is_empty());
	}

	#[rstest]
	#[case(r#"{"name":"post","params":{"id":"7"},"hash":""}"#, None)]
	#[case(r#"{"name":"post","params":{"id":"7"},"hash":null}"#, None)]
	#[case(r#"{"name":"post","params":{"id":"7"}}"#, None)]
	#[case(r#"{"name":"post","params":{"id":"7"},"hash":"top"}"#, Some("top"))]
	fn test_deserialize_normalises_empty_hash(#[case] json: &str, #[case] expected: Option<&str>) {
		// Act
		let to: Ref = serde_json::from_str(json).unwrap();
		let location: Location = serde_json::from_str(json).unwrap();

		// Assert
		assert_eq!(to.hash(), expected);
		assert_eq!(location.hash(), expected);
	}

	#[rstest]
	fn test_deserialized_location_equals_constructed() {
		let location: Location = serde_json::from_str(r#"{"name":"post","params":{"id":"7"},"hash":""}"#).unwrap();
		assert_eq!(location, post("7"));
	}
}
