//! Path pattern matching for route resolution.
//!
//! Patterns are compiled once into a token list and an anchored regex.

use std::collections::HashMap;

use crate::error::RouterError;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
	Literal(String),
	Param { name: String, wildcard: bool },
}

/// A compiled path pattern.
///
/// Supported syntax:
/// - `/posts/` - literal text, matched exactly
/// - `/posts/:id` or `/posts/{id}` - captures one segment (excludes `/`)
/// - `/files/{path:*}` - captures the rest of the path (includes `/`)
///
/// # Example
///
/// ```
/// use waymark_core::PathPattern;
///
/// let pattern = PathPattern::new("/posts/:id").unwrap();
/// let params = pattern.matches("/posts/42").unwrap();
/// assert_eq!(params.get("id").map(String::as_str), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	pattern: String,
	tokens: Vec<Token>,
	regex: regex::Regex,
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the pattern is too long, has
	/// too many segments, has an unterminated or empty `{}` parameter, repeats
	/// a parameter name, or compiles to an invalid regex.
	pub fn new(pattern: &str) -> Result<Self, RouterError> {
		let invalid = |reason: String| RouterError::InvalidPattern {
			pattern: pattern.to_string(),
			reason,
		};

		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(invalid(format!(
				"length {} exceeds maximum allowed length of {} bytes",
				pattern.len(),
				MAX_PATTERN_LENGTH
			)));
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(invalid(format!(
				"{} path segments, exceeding maximum of {}",
				segment_count, MAX_PATH_SEGMENTS
			)));
		}

		let tokens = tokenize(pattern).map_err(invalid)?;

		let mut param_names: Vec<String> = Vec::new();
		let mut regex_str = String::from("^");
		for token in &tokens {
			match token {
				Token::Literal(text) => regex_str.push_str(&regex::escape(text)),
				Token::Param { name, wildcard } => {
					if param_names.contains(name) {
						return Err(invalid(format!("duplicate parameter '{}'", name)));
					}
					param_names.push(name.clone());
					if *wildcard {
						regex_str.push_str(&format!("(?P<{}>.*)", name));
					} else {
						regex_str.push_str(&format!("(?P<{}>[^/]+)", name));
					}
				}
			}
		}
		regex_str.push('$');

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| invalid(format!("failed to compile pattern regex: {}", e)))?;

		Ok(Self {
			pattern: pattern.to_string(),
			tokens,
			regex,
			param_names,
		})
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns whether the pattern has no parameters.
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Returns whether the named parameter captures the rest of the path.
	pub fn is_wildcard(&self, name: &str) -> bool {
		self.tokens.iter().any(|token| {
			matches!(token, Token::Param { name: n, wildcard: true } if n == name)
		})
	}

	/// Matches a path, returning raw (still percent-encoded) captures.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(path).map(|caps| {
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}

	/// Builds a path from already-encoded parameter values.
	///
	/// On failure returns the name of the first missing parameter.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Result<String, String> {
		let mut path = String::with_capacity(self.pattern.len());
		for token in &self.tokens {
			match token {
				Token::Literal(text) => path.push_str(text),
				Token::Param { name, .. } => {
					let value = params.get(name).ok_or_else(|| name.clone())?;
					path.push_str(value);
				}
			}
		}
		Ok(path)
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

fn is_name_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

fn flush(literal: &mut String, tokens: &mut Vec<Token>) {
	if !literal.is_empty() {
		tokens.push(Token::Literal(std::mem::take(literal)));
	}
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, String> {
	let mut tokens = Vec::new();
	let mut literal = String::new();
	let mut chars = pattern.chars().peekable();

	while let Some(c) = chars.next() {
		match c {
			'{' => {
				let mut body = String::new();
				let mut closed = false;
				for next in chars.by_ref() {
					if next == '}' {
						closed = true;
						break;
					}
					body.push(next);
				}
				if !closed {
					return Err("unterminated parameter".to_string());
				}
				let (name, wildcard) = match body.strip_suffix(":*") {
					Some(name) => (name, true),
					None => (body.as_str(), false),
				};
				if name.is_empty() || !name.chars().all(is_name_char) {
					return Err(format!("invalid parameter name '{}'", name));
				}
				flush(&mut literal, &mut tokens);
				tokens.push(Token::Param {
					name: name.to_string(),
					wildcard,
				});
			}
			':' if chars.peek().copied().is_some_and(is_name_char) => {
				let mut name = String::new();
				while let Some(&next) = chars.peek() {
					if !is_name_char(next) {
						break;
					}
					name.push(next);
					chars.next();
				}
				flush(&mut literal, &mut tokens);
				tokens.push(Token::Param {
					name,
					wildcard: false,
				});
			}
			_ => literal.push(c),
		}
	}
	flush(&mut literal, &mut tokens);

	Ok(tokens)
}
