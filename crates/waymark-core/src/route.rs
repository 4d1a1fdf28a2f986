//! Declarative route descriptors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::RouterError;
use crate::pattern::PathPattern;

/// The type a raw path segment or query value is parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
	/// Kept as a string.
	#[default]
	String,
	/// Parsed as an integer, falling back to a float.
	Number,
	/// `true` or `false`.
	Boolean,
}

impl ValueKind {
	/// Parses a decoded raw string, returning `None` if it does not fit.
	pub fn parse(self, raw: &str) -> Option<Value> {
		match self {
			Self::String => Some(Value::String(raw.to_string())),
			Self::Number => {
				if let Ok(int) = raw.parse::<i64>() {
					Some(Value::Number(int.into()))
				} else {
					raw.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
				}
			}
			Self::Boolean => match raw {
				"true" => Some(Value::Bool(true)),
				"false" => Some(Value::Bool(false)),
				_ => None,
			},
		}
	}
}

/// Renders a scalar value into its raw URL form.
///
/// Returns `None` for `null` and composite values, which have no URL form.
pub(crate) fn format_scalar(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	}
}

/// A query key a route accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
	name: String,
	kind: ValueKind,
	multiple: bool,
}

impl QueryField {
	/// Returns the query key.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the value kind.
	pub fn kind(&self) -> ValueKind {
		self.kind
	}

	/// Returns whether the key collects every occurrence into a list.
	pub fn is_multiple(&self) -> bool {
		self.multiple
	}
}

/// A named route: path pattern plus param and query schema.
///
/// # Example
///
/// ```
/// use waymark_core::{Route, ValueKind};
///
/// let route = Route::new("post", "/posts/:id")
///     .unwrap()
///     .param_kind("id", ValueKind::Number)
///     .query("ref", ValueKind::String);
/// assert_eq!(route.name(), "post");
/// ```
#[derive(Debug, Clone)]
pub struct Route {
	name: String,
	pattern: PathPattern,
	param_kinds: HashMap<String, ValueKind>,
	query: Vec<QueryField>,
}

impl Route {
	/// Creates a route. Params default to [`ValueKind::String`].
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the pattern does not compile.
	pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, RouterError> {
		Ok(Self {
			name: name.into(),
			pattern: PathPattern::new(pattern)?,
			param_kinds: HashMap::new(),
			query: Vec::new(),
		})
	}

	/// Sets the kind of a path param.
	pub fn param_kind(mut self, param: impl Into<String>, kind: ValueKind) -> Self {
		self.param_kinds.insert(param.into(), kind);
		self
	}

	/// Declares a single-valued query key.
	pub fn query(self, name: impl Into<String>, kind: ValueKind) -> Self {
		self.with_query_field(name.into(), kind, false)
	}

	/// Declares a query key that collects repeated occurrences into a list.
	pub fn query_list(self, name: impl Into<String>, kind: ValueKind) -> Self {
		self.with_query_field(name.into(), kind, true)
	}

	fn with_query_field(mut self, name: String, kind: ValueKind, multiple: bool) -> Self {
		self.query.retain(|field| field.name != name);
		self.query.push(QueryField {
			name,
			kind,
			multiple,
		});
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the kind of a path param.
	pub fn kind_of(&self, param: &str) -> ValueKind {
		self.param_kinds.get(param).copied().unwrap_or_default()
	}

	/// Returns the declared query keys in declaration order.
	pub fn query_fields(&self) -> &[QueryField] {
		&self.query
	}

	/// Returns the declared query key with the given name.
	pub fn query_field(&self, name: &str) -> Option<&QueryField> {
		self.query.iter().find(|field| field.name == name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(ValueKind::String, "42", Some(json!("42")))]
	#[case(ValueKind::Number, "42", Some(json!(42)))]
	#[case(ValueKind::Number, "-1.5", Some(json!(-1.5)))]
	#[case(ValueKind::Number, "abc", None)]
	#[case(ValueKind::Number, "NaN", None)]
	#[case(ValueKind::Boolean, "true", Some(json!(true)))]
	#[case(ValueKind::Boolean, "yes", None)]
	fn test_value_kind_parse(
		#[case] kind: ValueKind,
		#[case] raw: &str,
		#[case] expected: Option<Value>,
	) {
		assert_eq!(kind.parse(raw), expected);
	}

	#[rstest]
	fn test_format_scalar() {
		assert_eq!(format_scalar(&json!("a b")), Some("a b".to_string()));
		assert_eq!(format_scalar(&json!(7)), Some("7".to_string()));
		assert_eq!(format_scalar(&json!(false)), Some("false".to_string()));
		assert_eq!(format_scalar(&json!(null)), None);
		assert_eq!(format_scalar(&json!([1])), None);
	}

	#[rstest]
	fn test_route_schema() {
		// Arrange & Act
		let route = Route::new("search", "/search")
			.unwrap()
			.query("q", ValueKind::String)
			.query_list("tag", ValueKind::String)
			.query("q", ValueKind::Number);

		// Assert
		let names: Vec<&str> = route.query_fields().iter().map(QueryField::name).collect();
		assert_eq!(names, vec!["tag", "q"]);
		assert_eq!(route.query_field("q").map(QueryField::kind), Some(ValueKind::Number));
		assert!(route.query_field("tag").unwrap().is_multiple());
		assert_eq!(route.kind_of("missing"), ValueKind::String);
	}

	#[rstest]
	fn test_route_rejects_invalid_pattern() {
		let result = Route::new("broken", "/a/{id");
		assert!(matches!(result, Err(RouterError::InvalidPattern { .. })));
	}
}
