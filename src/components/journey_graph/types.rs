//! Input data structures supplied by the analytics layer.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single page/stage node in the journey.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputNode {
	/// Unique identifier across the whole input graph.
	pub id: String,
	/// Display name (page title, URL, ...).
	#[serde(default)]
	pub name: String,
	/// Stage index in the journey, 0 being the entry stage.
	pub depth: u32,
	/// Visitors that passed through this node, including off-graph traffic.
	#[serde(default)]
	pub total_traffic: f64,
}

/// A weighted transition between two nodes.
///
/// `source` and `target` are positions in [`GraphData::nodes`], not depths.
/// They are signed so that garbage indices still parse and get dropped when
/// the model is built.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct InputLink {
	/// Index of the source node.
	pub source: i64,
	/// Index of the target node.
	pub target: i64,
	/// Visitors that took this transition.
	#[serde(default)]
	pub value: f64,
}

/// Complete input snapshot: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphData {
	/// Journey nodes.
	#[serde(default)]
	pub nodes: Vec<InputNode>,
	/// Transitions between nodes.
	#[serde(default)]
	pub links: Vec<InputLink>,
}

impl GraphData {
	/// Parse graph data from JSON text of the form `{ nodes: [...], links: [...] }`.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::GraphError;

	#[test]
	fn parses_camel_case_fields() {
		let data = GraphData::from_json(
			r#"{"nodes":[{"id":"a","name":"Home","depth":0,"totalTraffic":12.5}],
				"links":[{"source":0,"target":-3,"value":4}]}"#,
		)
		.unwrap();
		assert_eq!(data.nodes[0].total_traffic, 12.5);
		assert_eq!(data.nodes[0].name, "Home");
		assert_eq!(data.links[0].target, -3);
		assert_eq!(data.links[0].value, 4.0);
	}

	#[test]
	fn missing_arrays_and_optional_fields_default() {
		let data = GraphData::from_json(r#"{"nodes":[{"id":"x","depth":2}]}"#).unwrap();
		assert!(data.links.is_empty());
		assert_eq!(data.nodes[0].name, "");
		assert_eq!(data.nodes[0].total_traffic, 0.0);
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = GraphData::from_json("{\"nodes\": [").unwrap_err();
		assert!(matches!(err, GraphError::Parse(_)));
	}
}
