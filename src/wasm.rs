//! JavaScript bindings for the browser dashboard.
//!
//! Results are returned as JSON strings in the same camelCase shape the
//! dashboard already uses for its input.

use log::{Level, info};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::components::journey_graph::{JourneySession, Seed};
use crate::error::{GraphError, Result};

/// Initialize logging and panic hooks for the WASM target.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("journey-graph: logging initialized");
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
	serde_json::to_string(value).map_err(GraphError::Serialize)
}

fn js_err(err: GraphError) -> JsError {
	JsError::new(&err.to_string())
}

/// One journey graph snapshot with its layout and highlight state.
#[wasm_bindgen]
pub struct JourneyGraph {
	session: JourneySession,
}

#[wasm_bindgen]
impl JourneyGraph {
	/// Parse `{ nodes, links }` JSON and build the graph model.
	#[wasm_bindgen(constructor)]
	pub fn new(json: &str) -> std::result::Result<JourneyGraph, JsError> {
		let session = JourneySession::from_json(json).map_err(js_err)?;
		info!(
			"journey-graph: loaded {} nodes, {} links",
			session.graph().node_count(),
			session.graph().link_count()
		);
		Ok(Self { session })
	}

	/// Lay out for a canvas of the given size; returns the layout as JSON.
	pub fn layout(&mut self, width: f64, height: f64) -> std::result::Result<String, JsError> {
		to_json(self.session.relayout(width, height)).map_err(js_err)
	}

	/// Highlight the subgraph around node `id`; returns the highlight as JSON.
	#[wasm_bindgen(js_name = highlightNode)]
	pub fn highlight_node(&mut self, id: String) -> std::result::Result<String, JsError> {
		to_json(self.session.hover(Some(Seed::Node(id)))).map_err(js_err)
	}

	/// Highlight the subgraph around link `index`; returns the highlight as JSON.
	#[wasm_bindgen(js_name = highlightLink)]
	pub fn highlight_link(&mut self, index: usize) -> std::result::Result<String, JsError> {
		to_json(self.session.hover(Some(Seed::Link(index)))).map_err(js_err)
	}

	/// Hover the element under the point; returns the highlight as JSON.
	#[wasm_bindgen(js_name = hoverAt)]
	pub fn hover_at(&mut self, x: f64, y: f64) -> std::result::Result<String, JsError> {
		to_json(self.session.hover_at(x, y)).map_err(js_err)
	}

	/// Pin or unpin the element under the point; returns the highlight as JSON.
	#[wasm_bindgen(js_name = clickAt)]
	pub fn click_at(&mut self, x: f64, y: f64) -> std::result::Result<String, JsError> {
		to_json(self.session.click_at(x, y)).map_err(js_err)
	}

	/// Drop hover and pin.
	pub fn clear(&mut self) {
		self.session.clear();
	}
}
