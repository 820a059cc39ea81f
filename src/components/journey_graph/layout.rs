//! Column layout for the journey graph.
//!
//! Nodes are placed in one column per depth. Within a column, nodes are
//! ordered by an iterative barycenter heuristic to reduce link crossings, then
//! stacked top-to-bottom with traffic-proportional heights. Links become bands
//! whose thickness at each end is the link's share of that node's flow.
//!
//! The output is plain pixel geometry; drawing it is the caller's business.

use log::debug;
use serde::Serialize;

use super::config::{LayoutConfig, Metrics};
use super::model::{Connection, GraphModel, GraphNode};

/// Computed rectangle for one node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePosition {
	/// Node id, as given in the input.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Rectangle width.
	pub width: f64,
	/// Rectangle height.
	pub height: f64,
	/// Column index.
	pub depth: u32,
	/// Traffic the height was derived from.
	pub total_traffic: f64,
}

impl NodePosition {
	fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
	}
}

/// Computed band for one link.
///
/// `source_y`/`target_y` are the vertical centres of the band at each end;
/// `source_width`/`target_width` its thickness there. `width` is the smaller
/// of the two.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPosition {
	/// Index of the link in [`GraphModel::links`].
	pub index: usize,
	/// Placed source node.
	pub source: NodePosition,
	/// Placed target node.
	pub target: NodePosition,
	/// Flow carried by the link.
	pub value: f64,
	/// Band centre at the source end.
	pub source_y: f64,
	/// Band centre at the target end.
	pub target_y: f64,
	/// Band thickness at the source end.
	pub source_width: f64,
	/// Band thickness at the target end.
	pub target_width: f64,
	/// Nominal thickness used for hit-testing.
	pub width: f64,
}

impl LinkPosition {
	/// Distance test against the band centre line, linearly interpolated
	/// between the two node edges.
	fn hit(&self, x: f64, y: f64, slop: f64) -> bool {
		let x0 = self.source.x + self.source.width;
		let x1 = self.target.x;
		if x1 <= x0 || x <= x0 || x >= x1 {
			return false;
		}
		let t = (x - x0) / (x1 - x0);
		let centre = self.source_y + (self.target_y - self.source_y) * t;
		(y - centre).abs() <= self.width / 2.0 + slop
	}
}

/// Node and link geometry for one canvas size.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
	/// Nodes ordered by depth, then by final column order.
	pub node_positions: Vec<NodePosition>,
	/// Links in stacking order.
	pub link_positions: Vec<LinkPosition>,
	#[serde(skip)]
	link_hit_slop: f64,
}

impl LayoutResult {
	/// True when nothing was laid out.
	pub fn is_empty(&self) -> bool {
		self.node_positions.is_empty()
	}

	/// Position of the node with `id`.
	pub fn node_position(&self, id: &str) -> Option<&NodePosition> {
		self.node_positions.iter().find(|p| p.id == id)
	}

	/// Node whose rectangle contains the point. Later nodes win on overlap.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&NodePosition> {
		self.node_positions.iter().rev().find(|p| p.contains(x, y))
	}

	/// Thinnest link band passing within reach of the point.
	pub fn link_at(&self, x: f64, y: f64) -> Option<&LinkPosition> {
		self.link_positions
			.iter()
			.filter(|l| l.hit(x, y, self.link_hit_slop))
			.fold(None, |best: Option<&LinkPosition>, l| match best {
				Some(b) if b.width <= l.width => Some(b),
				_ => Some(l),
			})
	}
}

/// Lay out `graph` on a `width` x `height` canvas with the default tunables.
pub fn layout(graph: &GraphModel, width: f64, height: f64) -> LayoutResult {
	layout_with_config(graph, width, height, &LayoutConfig::default())
}

/// Lay out `graph` on a `width` x `height` canvas.
pub fn layout_with_config(
	graph: &GraphModel,
	width: f64,
	height: f64,
	config: &LayoutConfig,
) -> LayoutResult {
	if graph.is_empty() {
		return LayoutResult::default();
	}

	let metrics = Metrics::new(
		config,
		width,
		height,
		graph.max_depth(),
		graph.max_column_count(),
		graph.max_column_traffic(),
	);
	debug!(
		"journey-graph: layout {}x{} spacing={:.2} scale={:.4}",
		width, height, metrics.depth_spacing, metrics.height_scale
	);

	let heights: Vec<f64> = graph
		.nodes()
		.iter()
		.map(|n| (n.total_traffic * metrics.height_scale).max(config.min_node_height))
		.collect();

	let mut columns: Vec<(u32, Vec<usize>)> = graph
		.depths()
		.map(|depth| (depth, graph.column(depth).to_vec()))
		.collect();

	let mut stacker = Stacker {
		heights: &heights,
		top: config.padding_top,
		available: metrics.available_height,
		centres: vec![0.0; graph.node_count()],
	};
	for (_, column) in &columns {
		stacker.restack(column);
	}
	minimize_crossings(graph, &mut columns, &mut stacker, config.iterations);

	// Final placement reuses the same stacking as the sweeps.
	let mut slots: Vec<Option<usize>> = vec![None; graph.node_count()];
	let mut node_positions = Vec::with_capacity(graph.node_count());
	for (depth, column) in &columns {
		let x = config.padding_left + f64::from(*depth) * metrics.depth_spacing;
		for (&i, y) in column.iter().zip(stacker.tops(column)) {
			let node = &graph.nodes()[i];
			slots[i] = Some(node_positions.len());
			node_positions.push(NodePosition {
				id: node.id.clone(),
				name: node.name.clone(),
				x,
				y,
				width: config.node_width,
				height: heights[i],
				depth: node.depth,
				total_traffic: node.total_traffic,
			});
		}
	}

	let link_positions = stack_links(graph, &node_positions, &slots);

	LayoutResult {
		node_positions,
		link_positions,
		link_hit_slop: config.link_hit_slop,
	}
}

/// Vertical stacking within one column.
///
/// Nodes keep their traffic-proportional heights and the leftover space of
/// the column is spread evenly between them. A single node has no padding.
struct Stacker<'a> {
	heights: &'a [f64],
	top: f64,
	available: f64,
	/// Vertical centre per node index, refreshed by [`Stacker::restack`].
	centres: Vec<f64>,
}

impl Stacker<'_> {
	fn tops(&self, column: &[usize]) -> Vec<f64> {
		let total: f64 = column.iter().map(|&i| self.heights[i]).sum();
		let padding = if column.len() > 1 {
			((self.available - total) / (column.len() - 1) as f64).max(0.0)
		} else {
			0.0
		};

		let mut y = self.top;
		column
			.iter()
			.map(|&i| {
				let top = y;
				y += self.heights[i] + padding;
				top
			})
			.collect()
	}

	fn restack(&mut self, column: &[usize]) {
		for (&i, top) in column.iter().zip(self.tops(column)) {
			self.centres[i] = top + self.heights[i] / 2.0;
		}
	}

	/// Value-weighted mean centre of `neighbours`, or `fallback` if they carry
	/// no weight.
	fn barycenter(&self, neighbours: &[Connection], fallback: f64) -> f64 {
		let (sum, weight) = neighbours.iter().fold((0.0, 0.0), |(sum, weight), c| {
			(sum + c.value * self.centres[c.node_index], weight + c.value)
		});
		if weight > 0.0 { sum / weight } else { fallback }
	}

	/// Stable-sort `column` by barycenter and restack it immediately.
	fn reorder(&mut self, column: &mut Vec<usize>, graph: &GraphModel, side: Side) {
		let mut keyed: Vec<(usize, f64)> = column
			.iter()
			.map(|&i| {
				let node = &graph.nodes()[i];
				(i, self.barycenter(side.neighbours(node), self.centres[i]))
			})
			.collect();
		keyed.sort_by(|a, b| a.1.total_cmp(&b.1));
		*column = keyed.into_iter().map(|(i, _)| i).collect();
		self.restack(column);
	}
}

#[derive(Clone, Copy)]
enum Side {
	Incoming,
	Outgoing,
}

impl Side {
	fn neighbours(self, node: &GraphNode) -> &[Connection] {
		match self {
			Side::Incoming => &node.incoming,
			Side::Outgoing => &node.outgoing,
		}
	}
}

/// Alternate forward sweeps (by incoming neighbours) and backward sweeps (by
/// outgoing neighbours) for a fixed number of iterations.
fn minimize_crossings(
	graph: &GraphModel,
	columns: &mut [(u32, Vec<usize>)],
	stacker: &mut Stacker<'_>,
	iterations: usize,
) {
	let max_depth = graph.max_depth();
	for _ in 0..iterations {
		for (_, column) in columns.iter_mut().filter(|(depth, _)| *depth >= 1) {
			stacker.reorder(column, graph, Side::Incoming);
		}
		for (_, column) in columns
			.iter_mut()
			.rev()
			.filter(|(depth, _)| *depth < max_depth)
		{
			stacker.reorder(column, graph, Side::Outgoing);
		}
	}
}

/// Share of a node's height available to one side's flow. A node whose total
/// traffic exceeds the flow on that side gets proportionally less.
fn flow_factor(flow: f64, total: f64) -> f64 {
	if total > 0.0 {
		(flow / total).min(1.0)
	} else {
		1.0
	}
}

/// Thickness of a link at one end. With no measurable flow on that side the
/// node's links split the available height evenly.
fn band_width(value: f64, side_total: f64, side_count: usize, available: f64) -> f64 {
	let share = if side_total > 0.0 {
		value / side_total
	} else {
		// value / value would be 0 / 0 here, and full height per link would overflow the node
		1.0 / side_count.max(1) as f64
	};
	share * available
}

fn stack_links(
	graph: &GraphModel,
	positions: &[NodePosition],
	slots: &[Option<usize>],
) -> Vec<LinkPosition> {
	let node_count = graph.node_count();
	let mut out_available = vec![0.0; node_count];
	let mut in_available = vec![0.0; node_count];
	for node in graph.nodes() {
		if let Some(slot) = slots[node.index] {
			let height = positions[slot].height;
			out_available[node.index] =
				height * flow_factor(node.outgoing_total, node.total_traffic);
			in_available[node.index] =
				height * flow_factor(node.incoming_total, node.total_traffic);
		}
	}

	let mut resolved: Vec<_> = graph
		.links()
		.iter()
		.filter_map(|link| {
			match (slots[link.source_index], slots[link.target_index]) {
				(Some(s), Some(t)) => Some((link, s, t)),
				_ => {
					debug!("journey-graph: omitting unplaced link {}", link.index);
					None
				}
			}
		})
		.collect();
	resolved.sort_by(|a, b| {
		positions[a.1]
			.y
			.total_cmp(&positions[b.1].y)
			.then(positions[a.2].y.total_cmp(&positions[b.2].y))
	});

	let mut out_offset = vec![0.0; node_count];
	let mut in_offset = vec![0.0; node_count];
	resolved
		.into_iter()
		.map(|(link, s, t)| {
			let source_node = &graph.nodes()[link.source_index];
			let target_node = &graph.nodes()[link.target_index];
			let (source, target) = (&positions[s], &positions[t]);

			let source_width = band_width(
				link.value,
				source_node.outgoing_total,
				source_node.outgoing_count,
				out_available[link.source_index],
			);
			let target_width = band_width(
				link.value,
				target_node.incoming_total,
				target_node.incoming_count,
				in_available[link.target_index],
			);

			let source_y = source.y + out_offset[link.source_index] + source_width / 2.0;
			let target_y = target.y + in_offset[link.target_index] + target_width / 2.0;
			out_offset[link.source_index] += source_width;
			in_offset[link.target_index] += target_width;

			LinkPosition {
				index: link.index,
				source: source.clone(),
				target: target.clone(),
				value: link.value,
				source_y,
				target_y,
				source_width,
				target_width,
				width: source_width.min(target_width),
			}
		})
		.collect()
}
