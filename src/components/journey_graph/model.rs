//! Immutable, index-based graph model built from one input snapshot.
//!
//! Nodes and links live in flat arrays; adjacency is stored as lists of
//! [`Connection`]s that refer to neighbours by index. Nothing holds an owning
//! reference to another node, so the model is trivially `Send + Sync` and can
//! contain cycles without any special handling.
//!
//! # Known limitation
//!
//! Links are looked up by their `(source, target)` pair. Two input links with
//! the same endpoints both appear in [`GraphModel::links`] and both feed the
//! adjacency aggregates, but the pair index only remembers the last one.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use super::types::GraphData;

/// One side of an edge as seen from a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	/// Id of the node on the other end.
	pub node_id: String,
	/// Index of the node on the other end.
	pub node_index: usize,
	/// Flow carried by the link.
	pub value: f64,
}

/// A node with its adjacency lists and flow aggregates.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Position in the input node array.
	pub index: usize,
	/// Unique node id.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Stage index, 0 being the entry stage.
	pub depth: u32,
	/// Visitors through this node, including off-graph traffic.
	pub total_traffic: f64,
	/// Links leaving this node.
	pub outgoing: Vec<Connection>,
	/// Links entering this node.
	pub incoming: Vec<Connection>,
	/// Sum of `outgoing` values.
	pub outgoing_total: f64,
	/// Sum of `incoming` values.
	pub incoming_total: f64,
	/// Length of `outgoing`.
	pub outgoing_count: usize,
	/// Length of `incoming`.
	pub incoming_count: usize,
}

/// A link whose endpoints both resolved to nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Position in [`GraphModel::links`]; the identity used for highlighting.
	pub index: usize,
	/// Id of the source node.
	pub source_id: String,
	/// Id of the target node.
	pub target_id: String,
	/// Index of the source node.
	pub source_index: usize,
	/// Index of the target node.
	pub target_index: usize,
	/// Flow carried by the link.
	pub value: f64,
}

/// Adjacency-indexed journey graph.
///
/// Built once; any data change means building a new model.
#[derive(Clone, Debug)]
pub struct GraphModel {
	nodes: Vec<GraphNode>,
	links: Vec<GraphLink>,
	by_id: HashMap<String, usize>,
	columns: BTreeMap<u32, Vec<usize>>,
	pair_index: HashMap<(usize, usize), usize>,
	max_depth: u32,
	max_column_count: usize,
	max_traffic: f64,
	max_column_traffic: f64,
}

/// Negative and NaN weights are treated as no traffic at all.
fn sanitize(value: f64, what: &str) -> f64 {
	if value >= 0.0 {
		value
	} else {
		warn!("journey-graph: clamping invalid {} {} to 0", what, value);
		0.0
	}
}

fn resolve(raw: i64, node_count: usize) -> Option<usize> {
	usize::try_from(raw).ok().filter(|&idx| idx < node_count)
}

impl GraphModel {
	/// Build the model from an input snapshot.
	///
	/// Links whose `source` or `target` does not name an existing node are
	/// skipped with a warning; this never fails.
	pub fn new(data: &GraphData) -> Self {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut by_id = HashMap::with_capacity(data.nodes.len());
		let mut columns: BTreeMap<u32, Vec<usize>> = BTreeMap::new();

		for (index, input) in data.nodes.iter().enumerate() {
			if by_id.insert(input.id.clone(), index).is_some() {
				warn!("journey-graph: duplicate node id {:?}", input.id);
			}
			columns.entry(input.depth).or_default().push(index);
			nodes.push(GraphNode {
				index,
				id: input.id.clone(),
				name: input.name.clone(),
				depth: input.depth,
				total_traffic: sanitize(input.total_traffic, "node traffic"),
				outgoing: Vec::new(),
				incoming: Vec::new(),
				outgoing_total: 0.0,
				incoming_total: 0.0,
				outgoing_count: 0,
				incoming_count: 0,
			});
		}

		let mut links = Vec::with_capacity(data.links.len());
		let mut pair_index = HashMap::with_capacity(data.links.len());

		for raw in &data.links {
			let (Some(src), Some(tgt)) = (
				resolve(raw.source, nodes.len()),
				resolve(raw.target, nodes.len()),
			) else {
				warn!(
					"journey-graph: dropping link {} -> {} (no such node)",
					raw.source, raw.target
				);
				continue;
			};
			let value = sanitize(raw.value, "link value");
			let (source_id, target_id) = (nodes[src].id.clone(), nodes[tgt].id.clone());

			let source = &mut nodes[src];
			source.outgoing.push(Connection {
				node_id: target_id.clone(),
				node_index: tgt,
				value,
			});
			source.outgoing_total += value;
			source.outgoing_count += 1;

			let target = &mut nodes[tgt];
			target.incoming.push(Connection {
				node_id: source_id.clone(),
				node_index: src,
				value,
			});
			target.incoming_total += value;
			target.incoming_count += 1;

			let index = links.len();
			if pair_index.insert((src, tgt), index).is_some() {
				warn!(
					"journey-graph: duplicate link {} -> {}, highlighting uses the last one",
					source_id, target_id
				);
			}
			links.push(GraphLink {
				index,
				source_id,
				target_id,
				source_index: src,
				target_index: tgt,
				value,
			});
		}

		let max_depth = columns.keys().next_back().copied().unwrap_or(0);
		let max_column_count = columns.values().map(Vec::len).max().unwrap_or(0);
		let max_traffic = nodes
			.iter()
			.map(|n| n.total_traffic)
			.fold(0.0, f64::max)
			.max(1.0);
		let max_column_traffic = columns
			.values()
			.map(|column| column.iter().map(|&i| nodes[i].total_traffic).sum::<f64>())
			.fold(0.0, f64::max)
			.max(1.0);

		debug!(
			"journey-graph: built model with {} nodes, {} links, max depth {}",
			nodes.len(),
			links.len(),
			max_depth
		);

		Self {
			nodes,
			links,
			by_id,
			columns,
			pair_index,
			max_depth,
			max_column_count,
			max_traffic,
			max_column_traffic,
		}
	}

	/// All nodes, in input order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// All resolved links, in input order minus the dropped ones.
	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of resolved links.
	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// True when the input had no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Node with the given id.
	pub fn node_by_id(&self, id: &str) -> Option<&GraphNode> {
		self.by_id.get(id).map(|&i| &self.nodes[i])
	}

	/// Node at the given input position.
	pub fn node_by_index(&self, index: usize) -> Option<&GraphNode> {
		self.nodes.get(index)
	}

	/// Link at the given index.
	pub fn link(&self, index: usize) -> Option<&GraphLink> {
		self.links.get(index)
	}

	/// Node indices at `depth` in input order; empty for an unknown depth.
	pub fn column(&self, depth: u32) -> &[usize] {
		self.columns.get(&depth).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Nodes at `depth` in input order; empty for an unknown depth.
	pub fn nodes_at_depth(&self, depth: u32) -> Vec<&GraphNode> {
		self.column(depth).iter().map(|&i| &self.nodes[i]).collect()
	}

	/// Depths that hold at least one node, ascending.
	pub fn depths(&self) -> impl Iterator<Item = u32> + '_ {
		self.columns.keys().copied()
	}

	/// Index of the link from `source_id` to `target_id`, if any.
	pub fn link_index(&self, source_id: &str, target_id: &str) -> Option<usize> {
		let src = *self.by_id.get(source_id)?;
		let tgt = *self.by_id.get(target_id)?;
		self.pair_index.get(&(src, tgt)).copied()
	}

	/// Highest node depth, 0 for an empty graph.
	pub fn max_depth(&self) -> u32 {
		self.max_depth
	}

	/// Largest number of nodes sharing a depth.
	pub fn max_column_count(&self) -> usize {
		self.max_column_count
	}

	/// Largest single-node traffic, never below 1.
	pub fn max_traffic(&self) -> f64 {
		self.max_traffic
	}

	/// Largest summed traffic of one depth column, never below 1.
	pub fn max_column_traffic(&self) -> f64 {
		self.max_column_traffic
	}
}

impl Default for GraphModel {
	fn default() -> Self {
		Self::new(&GraphData::default())
	}
}

impl From<&GraphData> for GraphModel {
	fn from(data: &GraphData) -> Self {
		Self::new(data)
	}
}
