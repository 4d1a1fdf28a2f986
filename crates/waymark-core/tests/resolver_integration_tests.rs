//! Integration tests for route resolution
//!
//! These tests verify:
//! 1. URL to location resolution for the documented example routes
//! 2. Reference to href building
//! 3. The not-found sentinel for unmatched URLs
//! 4. Same-page comparison over resolved locations

use rstest::{fixture, rstest};
use serde_json::json;
use waymark_core::{Ref, Resolver, Route, RouterCore, is_same_page};

#[fixture]
fn blog() -> RouterCore {
	RouterCore::new([
		Route::new("home", "/").unwrap(),
		Route::new("post", "/posts/:id").unwrap(),
	])
	.unwrap()
}

#[rstest]
fn test_resolve_documented_example(blog: RouterCore) {
	// Act
	let location = blog.resolve_location("/posts/42");

	// Assert
	assert_eq!(location.name(), "post");
	assert_eq!(location.params().len(), 1);
	assert_eq!(location.params().get("id"), Some(&json!("42")));
	assert!(location.query().is_empty());
	assert_eq!(location.hash(), None);
}

#[rstest]
fn test_build_documented_example(blog: RouterCore) {
	let href = blog.build_href(&Ref::new("post").with_param("id", "7"));
	assert_eq!(href, "/posts/7");
}

#[rstest]
fn test_home_resolves_from_full_url(blog: RouterCore) {
	let location = blog.resolve_location("http://localhost:8080/?utm=1#intro");

	assert_eq!(location.name(), "home");
	assert!(location.query().is_empty());
	assert_eq!(location.hash(), Some("intro"));
}

#[rstest]
#[case("/posts/")]
#[case("/posts/1/2")]
#[case("/unknown")]
fn test_unmatched_urls_are_not_found(blog: RouterCore, #[case] url: &str) {
	assert!(blog.resolve_location(url).is_not_found());
}

#[rstest]
fn test_hash_only_difference_is_same_page(blog: RouterCore) {
	let a = blog.resolve_location("/posts/42#top");
	let b = blog.resolve_location("/posts/42#comments");
	let c = blog.resolve_location("/posts/43#top");

	assert!(is_same_page(&a, &b));
	assert!(!is_same_page(&a, &c));
}

#[rstest]
fn test_href_round_trip_preserves_location(blog: RouterCore) {
	let location = blog.resolve_location("/posts/caf%C3%A9#s%C3%A9ance");

	assert_eq!(location.params().get("id"), Some(&json!("café")));
	assert_eq!(location.hash(), Some("séance"));
	assert_eq!(
		blog.resolve_location(&blog.build_href(&location.to_ref())),
		location
	);
}

#[rstest]
fn test_deserialized_ref_with_empty_hash(blog: RouterCore) {
	// Arrange
	let to: Ref = serde_json::from_str(r#"{"name":"post","params":{"id":"7"},"hash":""}"#).unwrap();

	// Act
	let href = blog.build_href(&to);

	// Assert
	assert_eq!(href, "/posts/7");
	assert_eq!(blog.resolve_location(&href), blog.ref_to_location(&to));
}
