//! Bidirectional resolution between URLs, references and locations.

use std::collections::HashMap;

use serde_json::Value;
use url::Url;

use crate::error::RouterError;
use crate::location::{Location, NOT_FOUND, ParamMap, Ref};
use crate::route::{QueryField, Route, format_scalar};

/// Origin used to parse path-only URLs. Never appears in produced hrefs.
const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

/// Converts between URLs, references and locations.
///
/// Implementations must be pure: the same input always yields the same
/// output for the lifetime of the resolver.
pub trait Resolver {
	/// Resolves a URL (absolute or path-absolute) into a location.
	///
	/// URLs that match no route resolve to [`Location::not_found`].
	fn resolve_location(&self, url: &str) -> Location;

	/// Converts a reference into the location it denotes.
	///
	/// References that cannot be resolved yield [`Location::not_found`].
	fn ref_to_location(&self, to: &Ref) -> Location;

	/// Builds the href for a reference.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidRouteName`] for an unknown route and
	/// [`RouterError::MissingParameter`] when a pattern param is absent.
	fn try_build_href(&self, to: &Ref) -> Result<String, RouterError>;

	/// Builds the href for a reference, or an empty string if that fails.
	fn build_href(&self, to: &Ref) -> String {
		self.try_build_href(to).unwrap_or_else(|err| {
			tracing::warn!(route = to.name(), error = %err, "failed to build href");
			String::new()
		})
	}
}

/// Resolver over a closed set of routes.
///
/// # Example
///
/// ```
/// use waymark_core::{Ref, Resolver, Route, RouterCore};
///
/// let core = RouterCore::new([
///     Route::new("home", "/").unwrap(),
///     Route::new("post", "/posts/:id").unwrap(),
/// ])
/// .unwrap();
///
/// let location = core.resolve_location("/posts/42");
/// assert_eq!(location.name(), "post");
/// assert_eq!(core.build_href(&Ref::new("post").with_param("id", "7")), "/posts/7");
/// ```
#[derive(Debug, Clone)]
pub struct RouterCore {
	routes: Vec<Route>,
	named_routes: HashMap<String, usize>,
}

impl RouterCore {
	/// Creates a resolver from routes, tried in order during resolution.
	///
	/// # Errors
	///
	/// Returns [`RouterError::DuplicateRouteName`] if two routes share a name
	/// and [`RouterError::ReservedRouteName`] if a route uses the not-found
	/// name.
	pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, RouterError> {
		let routes: Vec<Route> = routes.into_iter().collect();
		let mut named_routes = HashMap::with_capacity(routes.len());

		for (index, route) in routes.iter().enumerate() {
			if route.name() == NOT_FOUND {
				return Err(RouterError::ReservedRouteName(route.name().to_string()));
			}
			if named_routes.insert(route.name().to_string(), index).is_some() {
				return Err(RouterError::DuplicateRouteName(route.name().to_string()));
			}
		}

		tracing::debug!(routes = routes.len(), "router core configured");
		Ok(Self {
			routes,
			named_routes,
		})
	}

	/// Returns the number of routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named_routes.contains_key(name)
	}

	/// Returns the route with the given name.
	pub fn route(&self, name: &str) -> Option<&Route> {
		self.named_routes.get(name).map(|&index| &self.routes[index])
	}

	/// Returns all routes in resolution order.
	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Matches an encoded path, returning the route and its typed params.
	///
	/// A route whose captures do not decode or parse under the declared
	/// kinds is skipped and the next route is tried.
	pub fn match_path(&self, path: &str) -> Option<(&Route, ParamMap)> {
		self.routes.iter().find_map(|route| {
			let raw = route.pattern().matches(path)?;
			let mut params = ParamMap::new();
			for name in route.pattern().param_names() {
				let encoded = raw.get(name)?;
				let decoded = urlencoding::decode(encoded).ok()?;
				let value = route.kind_of(name).parse(&decoded)?;
				params.insert(name.clone(), value);
			}
			Some((route, params))
		})
	}
}

impl Resolver for RouterCore {
	fn resolve_location(&self, url: &str) -> Location {
		let parsed = match parse_url(url) {
			Ok(parsed) => parsed,
			Err(err) => {
				tracing::warn!(url, error = %err, "unparseable url resolved as not found");
				return Location::not_found();
			}
		};

		let Some((route, params)) = self.match_path(parsed.path()) else {
			tracing::debug!(path = parsed.path(), "no route matched");
			return Location::not_found();
		};

		let pairs: Vec<(String, String)> =
			serde_urlencoded::from_str(parsed.query().unwrap_or("")).unwrap_or_default();
		let query = parse_query(route.query_fields(), &pairs);

		let hash = parsed
			.fragment()
			.and_then(|fragment| urlencoding::decode(fragment).ok())
			.map(|fragment| fragment.into_owned());

		Location::new(route.name(), params, query, hash)
	}

	fn ref_to_location(&self, to: &Ref) -> Location {
		let Some(route) = self.route(to.name()) else {
			tracing::warn!(route = to.name(), "reference to unknown route");
			return Location::not_found();
		};

		let mut params = ParamMap::new();
		for name in route.pattern().param_names() {
			let value = to
				.params()
				.get(name)
				.and_then(format_scalar)
				.and_then(|raw| route.kind_of(name).parse(&raw));
			match value {
				Some(value) => {
					params.insert(name.clone(), value);
				}
				None => {
					tracing::warn!(route = to.name(), param = %name, "reference param missing or invalid");
					return Location::not_found();
				}
			}
		}

		let query = normalize_query(route.query_fields(), to.query());
		Location::new(route.name(), params, query, to.hash().map(str::to_string))
	}

	fn try_build_href(&self, to: &Ref) -> Result<String, RouterError> {
		let route = self
			.route(to.name())
			.ok_or_else(|| RouterError::InvalidRouteName(to.name().to_string()))?;
		let pattern = route.pattern();

		let mut encoded = HashMap::with_capacity(pattern.param_names().len());
		for name in pattern.param_names() {
			let raw = to.params().get(name).and_then(format_scalar).ok_or_else(|| {
				RouterError::MissingParameter {
					route: route.name().to_string(),
					param: name.clone(),
				}
			})?;
			let value = if pattern.is_wildcard(name) {
				raw.split('/')
					.map(|segment| urlencoding::encode(segment).into_owned())
					.collect::<Vec<_>>()
					.join("/")
			} else {
				urlencoding::encode(&raw).into_owned()
			};
			encoded.insert(name.clone(), value);
		}

		let mut href = pattern
			.reverse(&encoded)
			.map_err(|param| RouterError::MissingParameter {
				route: route.name().to_string(),
				param,
			})?;

		let pairs = query_pairs(route.query_fields(), to.query());
		if !pairs.is_empty() {
			let query = serde_urlencoded::to_string(&pairs)
				.map_err(|e| RouterError::InvalidUrl(e.to_string()))?;
			href.push('?');
			href.push_str(&query);
		}

		if let Some(hash) = to.hash() {
			href.push('#');
			href.push_str(&urlencoding::encode(hash));
		}

		Ok(href)
	}
}

fn parse_url(input: &str) -> Result<Url, RouterError> {
	let base = Url::parse(PLACEHOLDER_ORIGIN).map_err(|e| RouterError::InvalidUrl(e.to_string()))?;
	base.join(input)
		.map_err(|e| RouterError::InvalidUrl(format!("{}: {}", input, e)))
}

/// Keeps declared query keys whose values parse under their kind.
fn parse_query(fields: &[QueryField], pairs: &[(String, String)]) -> ParamMap {
	let mut query = ParamMap::new();
	for field in fields {
		let mut values = pairs
			.iter()
			.filter(|(key, _)| key == field.name())
			.filter_map(|(_, raw)| field.kind().parse(raw));

		if field.is_multiple() {
			let values: Vec<Value> = values.collect();
			if !values.is_empty() {
				query.insert(field.name().to_string(), Value::Array(values));
			}
		} else if let Some(value) = values.next() {
			query.insert(field.name().to_string(), value);
		}
	}
	query
}

/// Raw string values for each declared query key, in declaration order.
fn query_pairs(fields: &[QueryField], query: &ParamMap) -> Vec<(String, String)> {
	let mut pairs = Vec::new();
	for field in fields {
		let Some(value) = query.get(field.name()) else {
			continue;
		};
		match value {
			Value::Array(items) if field.is_multiple() => {
				pairs.extend(
					items
						.iter()
						.filter_map(format_scalar)
						.map(|raw| (field.name().to_string(), raw)),
				);
			}
			other => {
				if let Some(raw) = format_scalar(other) {
					pairs.push((field.name().to_string(), raw));
				}
			}
		}
	}
	pairs
}

/// Normalizes reference query values the same way resolution would.
fn normalize_query(fields: &[QueryField], query: &ParamMap) -> ParamMap {
	parse_query(fields, &query_pairs(fields, query))
}
