//! Deep structural equality over parameter values.
//!
//! Objects and arrays are treated as key/value mappings (arrays keyed by
//! their decimal indices). Every other value compares strictly: numbers by
//! numeric value, strings and booleans by content, `null` only to `null`.
//! Key order never matters.

use serde_json::Value;

use crate::location::ParamMap;

/// Returns `true` if `a` and `b` are structurally equal.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use waymark_core::is_equal;
///
/// assert!(is_equal(&json!({"a": 1, "b": [1, 2]}), &json!({"b": [1, 2], "a": 1})));
/// assert!(!is_equal(&json!({}), &json!({"a": null})));
/// ```
pub fn is_equal(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Object(a_map), Value::Object(b_map)) => is_equal_maps(a_map, b_map),
		(Value::Array(a_items), Value::Array(b_items)) => {
			a_items.len() == b_items.len()
				&& a_items
					.iter()
					.zip(b_items)
					.all(|(x, y)| is_equal(x, y))
		}
		(Value::Array(items), Value::Object(map)) | (Value::Object(map), Value::Array(items)) => {
			array_equals_object(items, map)
		}
		(Value::Object(_) | Value::Array(_), _) | (_, Value::Object(_) | Value::Array(_)) => false,
		_ => strict_equal(a, b),
	}
}

/// Compares two parameter maps with [`is_equal`] semantics.
pub fn is_equal_maps(a: &ParamMap, b: &ParamMap) -> bool {
	a.len() == b.len()
		&& a
			.iter()
			.all(|(key, value)| b.get(key).is_some_and(|other| is_equal(value, other)))
}

/// An array equals an object keyed by the array's decimal indices.
fn array_equals_object(items: &[Value], map: &ParamMap) -> bool {
	items.len() == map.len()
		&& items.iter().enumerate().all(|(i, item)| {
			map.get(&i.to_string())
				.is_some_and(|other| is_equal(item, other))
		})
}

fn strict_equal(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
			// Large integers lose precision as f64; fall back to exact comparison.
			(Some(fx), Some(fy)) if x.is_f64() || y.is_f64() => fx == fy,
			_ => x == y,
		},
		_ => a == b,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!({}), json!({}), true)]
	#[case(json!({"a": 1}), json!({"a": 1}), true)]
	#[case(json!({"a": 1, "b": 2}), json!({"b": 2, "a": 1}), true)]
	#[case(json!({"a": 1}), json!({"a": 2}), false)]
	#[case(json!({"a": 1}), json!({"a": 1, "b": null}), false)]
	#[case(json!({"a": {"b": [1, 2]}}), json!({"a": {"b": [1, 2]}}), true)]
	#[case(json!({"a": {"b": [1, 2]}}), json!({"a": {"b": [2, 1]}}), false)]
	#[case(json!([1, 2]), json!({"0": 1, "1": 2}), true)]
	#[case(json!(1), json!(1.0), true)]
	#[case(json!("1"), json!(1), false)]
	#[case(json!(null), json!(null), true)]
	#[case(json!(null), json!({}), false)]
	#[case(json!({}), json!("x"), false)]
	fn test_is_equal(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
		assert_eq!(is_equal(&a, &b), expected);
		assert_eq!(is_equal(&b, &a), expected);
	}

	#[rstest]
	fn test_is_equal_maps_extra_key() {
		// Arrange
		let mut a = ParamMap::new();
		a.insert("id".to_string(), json!("42"));
		let mut b = a.clone();
		b.insert("extra".to_string(), json!(""));

		// Act & Assert
		assert!(is_equal_maps(&a, &a.clone()));
		assert!(!is_equal_maps(&a, &b));
		assert!(!is_equal_maps(&b, &a));
	}

	#[rstest]
	fn test_wide_objects_compare_by_key() {
		// Arrange
		let a: ParamMap = (0..2000).map(|i| (format!("k{}", i), json!(i))).collect();
		let mut b: ParamMap = a.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect();

		// Act & Assert
		assert!(is_equal(&Value::Object(a.clone()), &Value::Object(b.clone())));
		b.insert("k1999".to_string(), json!("changed"));
		assert!(!is_equal(&Value::Object(a), &Value::Object(b)));
	}

	#[rstest]
	#[case(json!([1, 2]), json!({"1": 2, "0": 1}), true)]
	#[case(json!([1, 2]), json!({"0": 1, "2": 2}), false)]
	#[case(json!([]), json!({}), true)]
	#[case(json!([{"a": [1]}]), json!({"0": {"a": {"0": 1}}}), true)]
	fn test_array_object_equivalence(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
		assert_eq!(is_equal(&a, &b), expected);
		assert_eq!(is_equal(&b, &a), expected);
	}

	#[rstest]
	fn test_large_integers_compare_exactly() {
		assert!(!is_equal(&json!(u64::MAX), &json!(u64::MAX - 1)));
		assert!(is_equal(&json!(u64::MAX), &json!(u64::MAX)));
	}
}
