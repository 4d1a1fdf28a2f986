//! Link component.
//!
//! A [`Link`] renders an element that navigates through the router when
//! clicked, while keeping native browser behaviour where users expect it:
//!
//! - a custom click handler runs first and may prevent default
//! - in `Anchor` mode, meta/ctrl clicks are left to the browser
//! - `target="_blank"`, and meta/ctrl clicks in `Block` mode, open a new
//!   window carrying only the `noreferrer`/`noopener` parts of `rel`
//! - everything else calls `navigate`
//!
//! ## Example
//!
//! ```
//! use waymark_core::Ref;
//! use waymark_pages::{Component, Link};
//!
//! let html = Link::new(Ref::new("home")).child("Home").render().render_to_string();
//! // Without a router the href is empty.
//! assert_eq!(html, r#"<a href="">Home</a>"#);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use waymark_core::Ref;

use crate::context::RouterContext;
use crate::controller::NavigationOutcome;
use crate::event::ClickEvent;
use crate::view::{ClickHandler, Component, ElementView, IntoView, View};

/// How a link renders and reacts to modifier clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkMode {
	/// An anchor with `href`, `target` and `rel`. Modifier clicks are native.
	#[default]
	Anchor,
	/// A clickable block without `href`. Modifier clicks open a new window.
	Block,
}

impl LinkMode {
	fn default_tag(self) -> &'static str {
		match self {
			LinkMode::Anchor => "a",
			LinkMode::Block => "div",
		}
	}
}

/// What a click on a link did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
	/// Left to the browser.
	Native,
	/// Opened the href in a new window.
	NewWindow,
	/// Handed to the router.
	Navigated(NavigationOutcome),
}

/// A link to a route.
#[derive(Clone)]
pub struct Link {
	to: Ref,
	target: Option<String>,
	rel: Option<String>,
	mode: LinkMode,
	tag: Option<Cow<'static, str>>,
	component: Option<ElementView>,
	on_click: Option<ClickHandler>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
	context: RouterContext,
}

impl Link {
	/// Creates an anchor link to `to` with no router attached.
	pub fn new(to: Ref) -> Self {
		Self {
			to,
			target: None,
			rel: None,
			mode: LinkMode::default(),
			tag: None,
			component: None,
			on_click: None,
			attrs: Vec::new(),
			children: Vec::new(),
			context: RouterContext::default(),
		}
	}

	/// Sets the browsing context, e.g. `_blank`.
	pub fn target(mut self, target: impl Into<String>) -> Self {
		self.target = Some(target.into());
		self
	}

	/// Sets the `rel` attribute.
	pub fn rel(mut self, rel: impl Into<String>) -> Self {
		self.rel = Some(rel.into());
		self
	}

	/// Sets the mode.
	pub fn mode(mut self, mode: LinkMode) -> Self {
		self.mode = mode;
		self
	}

	/// Renders with the given tag instead of the mode's default.
	pub fn tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
		self.tag = Some(tag.into());
		self
	}

	/// Renders by cloning `component` and injecting the link's props.
	pub fn component(mut self, component: ElementView) -> Self {
		self.component = Some(component);
		self
	}

	/// Sets a handler run before the link's own click handling.
	pub fn on_click(mut self, handler: ClickHandler) -> Self {
		self.on_click = Some(handler);
		self
	}

	/// Adds an attribute. Extra attributes override injected ones.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_view()));
		self
	}

	/// Binds the link to a router.
	pub fn with_context(mut self, context: RouterContext) -> Self {
		self.context = context;
		self
	}

	/// Returns the destination.
	pub fn to(&self) -> &Ref {
		&self.to
	}

	/// Returns the mode.
	pub fn link_mode(&self) -> LinkMode {
		self.mode
	}

	/// Returns the href of the destination.
	pub fn href(&self) -> String {
		self.context.build_href(&self.to)
	}

	fn extra_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.rev()
			.find(|(existing, _)| existing == name)
			.map(|(_, value)| value.as_ref())
	}

	fn effective_target(&self) -> Option<&str> {
		self.extra_attr("target").or(self.target.as_deref())
	}

	fn effective_rel(&self) -> Option<&str> {
		self.extra_attr("rel").or(self.rel.as_deref())
	}

	/// Handles a click on the rendered element.
	pub fn handle_click(&self, event: &dyn ClickEvent) -> ClickOutcome {
		if let Some(custom) = &self.on_click {
			custom(event);
		}

		let modifier = event.has_new_window_modifier();
		if event.default_prevented() || (self.mode != LinkMode::Block && modifier) {
			return ClickOutcome::Native;
		}

		event.prevent_default();
		event.stop_propagation();

		if self.effective_target() == Some("_blank") || (self.mode == LinkMode::Block && modifier) {
			let href = self.href();
			let features = window_features(self.effective_rel());
			tracing::debug!(href = %href, features = %features, "opening link in new window");
			self.context.open_new_window(&href, &features);
			return ClickOutcome::NewWindow;
		}

		ClickOutcome::Navigated(self.context.navigate(&self.to))
	}

	fn click_handler(&self) -> ClickHandler {
		let link = self.clone();
		Rc::new(move |event: &dyn ClickEvent| {
			link.handle_click(event);
		})
	}
}

/// Window features forwarded from a `rel` value.
///
/// Only `noreferrer` and `noopener` survive, in that order, comma-joined.
pub fn window_features(rel: Option<&str>) -> String {
	let Some(rel) = rel else {
		return String::new();
	};
	["noreferrer", "noopener"]
		.into_iter()
		.filter(|feature| {
			rel.split_whitespace()
				.any(|token| token.eq_ignore_ascii_case(feature))
		})
		.collect::<Vec<_>>()
		.join(",")
}

impl Component for Link {
	fn render(&self) -> View {
		let mut el = match &self.component {
			Some(component) => component.clone(),
			None => {
				let tag = self
					.tag
					.clone()
					.unwrap_or(Cow::Borrowed(self.mode.default_tag()));
				ElementView::new(tag)
			}
		};

		if self.mode == LinkMode::Anchor {
			el.set_attr("href", self.href());
			if let Some(target) = &self.target {
				el.set_attr("target", target.clone());
			}
			if let Some(rel) = &self.rel {
				el.set_attr("rel", rel.clone());
			}
		}
		for (name, value) in &self.attrs {
			el.set_attr(name.clone(), value.clone());
		}
		if !self.children.is_empty() {
			el.set_children(self.children.clone());
		}

		el.on_click(self.click_handler()).into_view()
	}

	fn name() -> &'static str {
		"Link"
	}
}

impl fmt::Debug for Link {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Link")
			.field("to", &self.to)
			.field("target", &self.target)
			.field("rel", &self.rel)
			.field("mode", &self.mode)
			.field("tag", &self.tag)
			.field("component", &self.component)
			.field("has_click_handler", &self.on_click.is_some())
			.field("attrs", &self.attrs)
			.field("children", &self.children)
			.finish()
	}
}
