//! Browser host backed by `web_sys::Window`.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{BrowserHost, HostError};
use crate::reactive::Subscription;

/// The real browser window.
#[derive(Debug, Clone)]
pub struct WebHost {
	window: web_sys::Window,
}

impl WebHost {
	/// Returns the host for the global window, if there is one.
	///
	/// Returns `None` inside workers and other contexts without `window`.
	pub fn detect() -> Option<Self> {
		web_sys::window().map(|window| Self { window })
	}

	fn history(&self) -> Result<web_sys::History, HostError> {
		self.window
			.history()
			.map_err(|_| HostError::Unavailable("history"))
	}
}

fn js_error(value: JsValue) -> HostError {
	HostError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl BrowserHost for WebHost {
	fn current_url(&self) -> String {
		self.window.location().href().unwrap_or_else(|_| "/".to_string())
	}

	fn push_state(&self, href: &str) -> Result<(), HostError> {
		self.history()?
			.push_state_with_url(&JsValue::NULL, "", Some(href))
			.map_err(js_error)
	}

	fn replace_state(&self, href: &str) -> Result<(), HostError> {
		self.history()?
			.replace_state_with_url(&JsValue::NULL, "", Some(href))
			.map_err(js_error)
	}

	fn element_offset_top(&self, id: &str) -> Option<f64> {
		let element = self.window.document()?.get_element_by_id(id)?;
		let element = element.dyn_into::<web_sys::HtmlElement>().ok()?;
		Some(f64::from(element.offset_top()))
	}

	fn scroll_to(&self, x: f64, y: f64) {
		self.window.scroll_to_with_x_and_y(x, y);
	}

	fn open_window(&self, href: &str, target: &str, features: &str) -> Result<(), HostError> {
		self.window
			.open_with_url_and_target_and_features(href, target, features)
			.map(|_| ())
			.map_err(js_error)
	}

	fn on_popstate(&self, listener: Rc<dyn Fn()>) -> Subscription {
		let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			listener();
		}) as Box<dyn FnMut(_)>);

		if let Err(err) = self
			.window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		{
			tracing::warn!(error = %js_error(err), "failed to register popstate listener");
			return Subscription::noop();
		}

		let window = self.window.clone();
		Subscription::new(move || {
			if let Err(err) = window
				.remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			{
				tracing::warn!(error = %js_error(err), "failed to remove popstate listener");
			}
		})
	}
}
