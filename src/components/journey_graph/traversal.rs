//! Connected-subgraph queries for hover and click highlighting.
//!
//! Both queries walk upstream and downstream from a seed. The upstream walk
//! only follows incoming connections and the downstream walk only outgoing
//! ones; the seed is the only place the two directions meet.
//!
//! The walks use an explicit worklist so graph size never threatens the call
//! stack.
//!
//! Note the guards differ: [`find_connected_from_node`] stops at nodes it has
//! already collected, while [`find_connected_from_link`] stops at links it has
//! already collected and may therefore re-enter a node through a different
//! link. The two only disagree on graphs with parallel edges.

use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{Connection, GraphModel, GraphNode};

/// Node ids and link indices that belong to a highlighted subgraph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightState {
	/// Ids of highlighted nodes.
	pub node_ids: BTreeSet<String>,
	/// Indices of highlighted links.
	pub link_indices: BTreeSet<usize>,
}

impl HighlightState {
	/// True when nothing is highlighted.
	pub fn is_empty(&self) -> bool {
		self.node_ids.is_empty() && self.link_indices.is_empty()
	}

	/// Whether node `id` is highlighted.
	pub fn contains_node(&self, id: &str) -> bool {
		self.node_ids.contains(id)
	}

	/// Whether link `index` is highlighted.
	pub fn contains_link(&self, index: usize) -> bool {
		self.link_indices.contains(&index)
	}
}

#[derive(Clone, Copy)]
enum Direction {
	Upstream,
	Downstream,
}

impl Direction {
	fn connections(self, node: &GraphNode) -> &[Connection] {
		match self {
			Direction::Upstream => &node.incoming,
			Direction::Downstream => &node.outgoing,
		}
	}

	/// Link joining `node` to its neighbour `other` in this direction.
	fn link_between(self, graph: &GraphModel, node: &GraphNode, other: &str) -> Option<usize> {
		match self {
			Direction::Upstream => graph.link_index(other, &node.id),
			Direction::Downstream => graph.link_index(&node.id, other),
		}
	}
}

/// Everything connected to `node_id` through directed paths in either
/// direction. Unknown ids yield an empty state.
///
/// Both walks share one visited set, so on a cyclic graph a node already
/// reached upstream is not expanded downstream and its descendants may be
/// missed. On acyclic journeys the result is the full upstream and downstream
/// closure.
pub fn find_connected_from_node(graph: &GraphModel, node_id: &str) -> HighlightState {
	let mut state = HighlightState::default();
	let Some(start) = graph.node_by_id(node_id) else {
		return state;
	};
	state.node_ids.insert(start.id.clone());

	walk_nodes(graph, start.index, Direction::Upstream, &mut state);
	walk_nodes(graph, start.index, Direction::Downstream, &mut state);
	state
}

/// Every connection's link is collected; a neighbour is only expanded the
/// first time it joins `node_ids`.
fn walk_nodes(graph: &GraphModel, start: usize, direction: Direction, state: &mut HighlightState) {
	let mut stack = vec![start];
	while let Some(index) = stack.pop() {
		let node = &graph.nodes()[index];
		for conn in direction.connections(node) {
			if let Some(link) = direction.link_between(graph, node, &conn.node_id) {
				state.link_indices.insert(link);
			}
			if state.node_ids.insert(conn.node_id.clone()) {
				stack.push(conn.node_index);
			}
		}
	}
}

/// Everything connected to link `link_index`: upstream of its source and
/// downstream of its target. Out-of-range indices yield an empty state.
pub fn find_connected_from_link(graph: &GraphModel, link_index: usize) -> HighlightState {
	let mut state = HighlightState::default();
	let Some(link) = graph.link(link_index) else {
		return state;
	};
	state.node_ids.insert(link.source_id.clone());
	state.node_ids.insert(link.target_id.clone());
	state.link_indices.insert(link.index);

	walk_links(graph, link.source_index, Direction::Upstream, &mut state);
	walk_links(graph, link.target_index, Direction::Downstream, &mut state);
	state
}

/// A neighbour is expanded whenever the link reaching it is new.
fn walk_links(graph: &GraphModel, start: usize, direction: Direction, state: &mut HighlightState) {
	let mut stack = vec![start];
	while let Some(index) = stack.pop() {
		let node = &graph.nodes()[index];
		for conn in direction.connections(node) {
			let Some(link) = direction.link_between(graph, node, &conn.node_id) else {
				continue;
			};
			if state.link_indices.insert(link) {
				state.node_ids.insert(conn.node_id.clone());
				stack.push(conn.node_index);
			}
		}
	}
}
