//! journey-graph: layout and highlighting engine for user-journey graphs.
//!
//! Takes a weighted, multi-stage graph of visitor paths (page A -> page B ->
//! page C ...), arranges it in one column per stage with few crossings, and
//! answers "what is connected to this element" for hover and click
//! highlighting. Drawing the result is left to the host.
//!
//! On `wasm32` the engine is also exported to JavaScript through
//! `wasm-bindgen`; results cross that boundary as JSON.

pub mod components;
mod error;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use components::journey_graph::config::LayoutConfig;
pub use components::journey_graph::{
	Connection, GraphData, GraphLink, GraphModel, GraphNode, HighlightState, InputLink, InputNode,
	InteractionState, JourneySession, LayoutResult, LinkPosition, NodePosition, Seed,
	find_connected_from_link, find_connected_from_node, layout, layout_with_config,
};
pub use error::{GraphError, Result};

#[cfg(target_arch = "wasm32")]
pub use wasm::{JourneyGraph, init_logging};
