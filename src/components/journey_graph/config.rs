//! Layout tunables.
//!
//! Every fixed dimension the layout engine uses is a named constant here so
//! tests can reason about exact positions. [`LayoutConfig`] bundles them; the
//! default value is built from the constants, and a host may override a subset
//! from JSON since every field falls back to its default.

use log::warn;
use serde::{Deserialize, Serialize};

/// Space left of the first column, in pixels.
pub const PADDING_LEFT: f64 = 20.0;
/// Space right of the last column's label area, in pixels.
pub const PADDING_RIGHT: f64 = 20.0;
/// Space above the tallest column, in pixels.
pub const PADDING_TOP: f64 = 20.0;
/// Space below the tallest column, in pixels.
pub const PADDING_BOTTOM: f64 = 20.0;
/// Width of every node rectangle.
pub const NODE_WIDTH: f64 = 12.0;
/// Room reserved right of the last column for its labels.
pub const LABEL_MARGIN: f64 = 140.0;
/// Visible floor so zero-traffic nodes stay clickable.
pub const MIN_NODE_HEIGHT: f64 = 4.0;
/// Share of the vertical space the busiest column's traffic may occupy.
pub const HEIGHT_FILL_RATIO: f64 = 0.8;
/// Forward + backward barycenter sweeps.
pub const BARYCENTER_ITERATIONS: usize = 4;
/// Gap reserved between stacked nodes when deriving the height scale.
pub const NODE_GAP: f64 = 8.0;
/// Extra tolerance around a link band when hit-testing.
pub const LINK_HIT_SLOP: f64 = 2.0;

/// Complete layout configuration.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
	/// Space left of the first column.
	pub padding_left: f64,
	/// Space right of the last column's label area.
	pub padding_right: f64,
	/// Space above every column.
	pub padding_top: f64,
	/// Space below every column.
	pub padding_bottom: f64,
	/// Width of every node rectangle.
	pub node_width: f64,
	/// Room reserved for the last column's labels.
	pub label_margin: f64,
	/// Floor applied to every node height.
	pub min_node_height: f64,
	/// Clamped to `0..=1`; keep it below 1 to leave breathing room between nodes.
	pub height_fill_ratio: f64,
	/// Number of forward + backward barycenter sweeps.
	pub iterations: usize,
	/// Gap reserved between stacked nodes when deriving the height scale.
	pub node_gap: f64,
	/// Extra tolerance around a link band when hit-testing.
	pub link_hit_slop: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			padding_left: PADDING_LEFT,
			padding_right: PADDING_RIGHT,
			padding_top: PADDING_TOP,
			padding_bottom: PADDING_BOTTOM,
			node_width: NODE_WIDTH,
			label_margin: LABEL_MARGIN,
			min_node_height: MIN_NODE_HEIGHT,
			height_fill_ratio: HEIGHT_FILL_RATIO,
			iterations: BARYCENTER_ITERATIONS,
			node_gap: NODE_GAP,
			link_hit_slop: LINK_HIT_SLOP,
		}
	}
}

/// Canvas-dependent values derived once per layout call.
#[derive(Clone, Debug, PartialEq)]
pub struct Metrics {
	/// Horizontal distance between adjacent depth columns.
	pub depth_spacing: f64,
	/// Vertical space available to each column.
	pub available_height: f64,
	/// Pixels per unit of traffic.
	pub height_scale: f64,
}

impl Metrics {
	/// Derive spacing and scale for a canvas of `width` x `height`.
	///
	/// Degenerate canvases (smaller than the reserved padding) collapse to
	/// zero spacing/scale instead of going negative.
	pub fn new(
		config: &LayoutConfig,
		width: f64,
		height: f64,
		max_depth: u32,
		max_column_count: usize,
		max_column_traffic: f64,
	) -> Self {
		let usable_width = width
			- config.padding_left
			- config.padding_right
			- config.node_width
			- config.label_margin;
		let depth_spacing = if max_depth == 0 {
			0.0
		} else {
			(usable_width / f64::from(max_depth)).max(0.0)
		};

		let available_height = (height - config.padding_top - config.padding_bottom).max(0.0);
		let gaps = config.node_gap * max_column_count.saturating_sub(1) as f64;
		let fill_ratio = config.height_fill_ratio.clamp(0.0, 1.0);
		if fill_ratio != config.height_fill_ratio {
			warn!(
				"journey-graph: height fill ratio {} out of range, using {}",
				config.height_fill_ratio, fill_ratio
			);
		}
		let fillable = (available_height * fill_ratio - gaps).max(0.0);
		let height_scale = fillable / max_column_traffic.max(f64::MIN_POSITIVE);

		Self {
			depth_spacing,
			available_height,
			height_scale,
		}
	}
}
