//! End-to-end scenarios through the public API: JSON in, layout and
//! highlights out.

// Integration tests only touch part of the dependency set.
#![allow(unused_crate_dependencies)]

use journey_graph::{
	GraphData, GraphModel, JourneySession, find_connected_from_link, find_connected_from_node,
	layout,
};

const FORK: &str = r#"{
	"nodes": [
		{"id": "a", "name": "Landing", "depth": 0, "totalTraffic": 100},
		{"id": "b", "name": "Pricing", "depth": 1, "totalTraffic": 60},
		{"id": "c", "name": "Docs", "depth": 1, "totalTraffic": 40}
	],
	"links": [
		{"source": 0, "target": 1, "value": 60},
		{"source": 0, "target": 2, "value": 40}
	]
}"#;

#[test]
fn fork_builds_expected_model() {
	let data = GraphData::from_json(FORK).unwrap();
	let graph = GraphModel::new(&data);
	assert_eq!(graph.max_depth(), 1);
	assert_eq!(graph.max_column_count(), 2);
	assert_eq!(graph.links().len(), 2);
	assert_eq!(graph.node_by_id("a").unwrap().outgoing_total, 100.0);
}

#[test]
fn empty_input_is_empty_everywhere() {
	let graph = GraphModel::new(&GraphData::from_json(r#"{"nodes": [], "links": []}"#).unwrap());
	assert!(graph.is_empty());
	let result = layout(&graph, 1024.0, 768.0);
	assert!(result.node_positions.is_empty());
	assert!(result.link_positions.is_empty());
	assert_eq!(
		serde_json::to_string(&result).unwrap(),
		r#"{"nodePositions":[],"linkPositions":[]}"#
	);
}

#[test]
fn link_to_missing_node_is_dropped() {
	let data = GraphData::from_json(
		r#"{"nodes": [
				{"id": "a", "depth": 0, "totalTraffic": 1},
				{"id": "b", "depth": 1, "totalTraffic": 1},
				{"id": "c", "depth": 1, "totalTraffic": 1}
			],
			"links": [{"source": 0, "target": 5, "value": 3}]}"#,
	)
	.unwrap();
	let graph = GraphModel::new(&data);
	assert_eq!(graph.links().len(), 0);
	assert!(layout(&graph, 800.0, 600.0).link_positions.is_empty());
}

#[test]
fn isolated_node_highlights_alone() {
	let data = GraphData::from_json(
		r#"{"nodes": [
				{"id": "a", "depth": 0, "totalTraffic": 5},
				{"id": "b", "depth": 1, "totalTraffic": 5},
				{"id": "lonely", "depth": 1, "totalTraffic": 2}
			],
			"links": [{"source": 0, "target": 1, "value": 5}]}"#,
	)
	.unwrap();
	let graph = GraphModel::new(&data);
	let state = find_connected_from_node(&graph, "lonely");
	assert_eq!(state.node_ids.len(), 1);
	assert!(state.contains_node("lonely"));
	assert!(state.link_indices.is_empty());
}

#[test]
fn highlight_serializes_as_sorted_arrays() {
	let graph = GraphModel::new(&GraphData::from_json(FORK).unwrap());
	let state = find_connected_from_link(&graph, 1);
	assert_eq!(
		serde_json::to_string(&state).unwrap(),
		r#"{"nodeIds":["a","c"],"linkIndices":[1]}"#
	);
}

#[test]
fn layout_output_uses_camel_case() {
	let graph = GraphModel::new(&GraphData::from_json(FORK).unwrap());
	let json = serde_json::to_value(layout(&graph, 800.0, 600.0)).unwrap();
	let link = &json["linkPositions"][0];
	for key in ["index", "source", "target", "value", "sourceY", "targetY", "sourceWidth", "targetWidth", "width"] {
		assert!(link.get(key).is_some(), "missing {key}");
	}
	assert!(json["nodePositions"][0].get("totalTraffic").is_some());
}

#[test]
fn session_resize_keeps_highlight() {
	let mut session = JourneySession::from_json(FORK).unwrap();
	session.relayout(800.0, 600.0);
	let a = session.layout().node_position("a").unwrap().clone();
	session.click_at(a.x + 1.0, a.y + 1.0);
	assert_eq!(session.highlight().node_ids.len(), 3);

	session.relayout(400.0, 300.0);
	assert_eq!(session.highlight().node_ids.len(), 3);
	assert_eq!(session.layout().node_positions.len(), 3);
}
