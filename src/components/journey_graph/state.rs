//! Interaction session: the current model, its layout, and what is highlighted.
//!
//! A hover highlight follows the pointer; a click pins a highlight that stays
//! until the same element or empty space is clicked. The pinned selection
//! always wins over the hover.

use log::debug;

use super::layout::{LayoutResult, layout};
use super::model::GraphModel;
use super::traversal::{HighlightState, find_connected_from_link, find_connected_from_node};
use super::types::GraphData;
use crate::error::Result;

/// The element a highlight grows from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
	/// Highlight grows from a node.
	Node(String),
	/// Highlight grows from a link, by index.
	Link(usize),
}

impl Seed {
	fn expand(&self, graph: &GraphModel) -> HighlightState {
		match self {
			Seed::Node(id) => find_connected_from_node(graph, id),
			Seed::Link(index) => find_connected_from_link(graph, *index),
		}
	}
}

/// Hovered and pinned seeds plus the resulting highlight.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
	hovered: Option<Seed>,
	pinned: Option<Seed>,
	highlight: HighlightState,
}

impl InteractionState {
	/// Element under the pointer, if any.
	pub fn hovered(&self) -> Option<&Seed> {
		self.hovered.as_ref()
	}

	/// Clicked element, if any.
	pub fn pinned(&self) -> Option<&Seed> {
		self.pinned.as_ref()
	}

	/// Highlight of the pinned seed if any, else of the hovered seed.
	pub fn highlight(&self) -> &HighlightState {
		&self.highlight
	}

	/// Update the hovered element. Re-hovering the same element is a no-op.
	pub fn set_hover(&mut self, graph: &GraphModel, seed: Option<Seed>) {
		if self.hovered == seed {
			return;
		}
		self.hovered = seed;
		self.refresh(graph);
	}

	/// Pin `seed`, or unpin when it is already pinned or `None`.
	pub fn toggle_pin(&mut self, graph: &GraphModel, seed: Option<Seed>) {
		self.pinned = match seed {
			Some(s) if self.pinned.as_ref() != Some(&s) => Some(s),
			_ => None,
		};
		self.refresh(graph);
	}

	/// Forget both hover and pin.
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	fn refresh(&mut self, graph: &GraphModel) {
		self.highlight = self
			.pinned
			.as_ref()
			.or(self.hovered.as_ref())
			.map(|seed| seed.expand(graph))
			.unwrap_or_default();
	}
}

/// A graph snapshot with its current layout and interaction state.
///
/// Replacing the data means building a new session; resizing only needs
/// [`JourneySession::relayout`].
#[derive(Clone, Debug, Default)]
pub struct JourneySession {
	graph: GraphModel,
	layout: LayoutResult,
	interaction: InteractionState,
}

impl JourneySession {
	/// Build a session for one snapshot; call [`JourneySession::relayout`] before hit-testing.
	pub fn new(data: &GraphData) -> Self {
		Self {
			graph: GraphModel::new(data),
			layout: LayoutResult::default(),
			interaction: InteractionState::default(),
		}
	}

	/// Build a session from `{ nodes, links }` JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(Self::new(&GraphData::from_json(text)?))
	}

	/// The underlying graph model.
	pub fn graph(&self) -> &GraphModel {
		&self.graph
	}

	/// The latest layout.
	pub fn layout(&self) -> &LayoutResult {
		&self.layout
	}

	/// Hover and pin state.
	pub fn interaction(&self) -> &InteractionState {
		&self.interaction
	}

	/// The active highlight.
	pub fn highlight(&self) -> &HighlightState {
		self.interaction.highlight()
	}

	/// Recompute the layout for a new canvas size.
	pub fn relayout(&mut self, width: f64, height: f64) -> &LayoutResult {
		self.layout = layout(&self.graph, width, height);
		&self.layout
	}

	/// Element under the point in the current layout; nodes take precedence.
	pub fn seed_at(&self, x: f64, y: f64) -> Option<Seed> {
		if let Some(node) = self.layout.node_at(x, y) {
			return Some(Seed::Node(node.id.clone()));
		}
		self.layout.link_at(x, y).map(|link| Seed::Link(link.index))
	}

	/// Hover `seed` directly, bypassing hit-testing.
	pub fn hover(&mut self, seed: Option<Seed>) -> &HighlightState {
		self.interaction.set_hover(&self.graph, seed);
		self.interaction.highlight()
	}

	/// Hover whatever lies under the point.
	pub fn hover_at(&mut self, x: f64, y: f64) -> &HighlightState {
		let seed = self.seed_at(x, y);
		self.hover(seed)
	}

	/// Pin or unpin whatever lies under the point.
	pub fn click_at(&mut self, x: f64, y: f64) -> &HighlightState {
		let seed = self.seed_at(x, y);
		debug!("journey-graph: click at ({:.1}, {:.1}) -> {:?}", x, y, seed);
		self.interaction.toggle_pin(&self.graph, seed);
		self.interaction.highlight()
	}

	/// Drop hover and pin.
	pub fn clear(&mut self) {
		self.interaction.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::journey_graph::model::tests::fork;

	fn session() -> JourneySession {
		let mut session = JourneySession::new(&fork());
		session.relayout(600.0, 400.0);
		session
	}

	fn centre_of(session: &JourneySession, id: &str) -> (f64, f64) {
		let p = session.layout().node_position(id).unwrap();
		(p.x + p.width / 2.0, p.y + p.height / 2.0)
	}

	#[test]
	fn hover_over_node_highlights_its_subgraph() {
		let mut session = session();
		let (x, y) = centre_of(&session, "b");
		let state = session.hover_at(x, y).clone();
		assert!(state.contains_node("a"));
		assert!(state.contains_node("b"));
		assert!(!state.contains_node("c"));
		assert_eq!(session.interaction().hovered(), Some(&Seed::Node("b".into())));
	}

	#[test]
	fn hover_over_empty_space_clears() {
		let mut session = session();
		let (x, y) = centre_of(&session, "b");
		session.hover_at(x, y);
		assert!(session.hover_at(1.0, 1.0).is_empty());
	}

	#[test]
	fn pinned_selection_beats_hover() {
		let mut session = session();
		let (cx, cy) = centre_of(&session, "c");
		session.click_at(cx, cy);
		let (bx, by) = centre_of(&session, "b");
		let state = session.hover_at(bx, by);
		assert!(state.contains_node("c"));
		assert!(!state.contains_node("b"));

		// clicking the pinned node again releases it back to the hover
		let state = session.click_at(cx, cy);
		assert!(state.contains_node("b"));
		assert!(!state.contains_node("c"));
	}

	#[test]
	fn hovering_a_link_uses_link_traversal() {
		let mut session = session();
		let link = session
			.layout()
			.link_positions
			.iter()
			.find(|l| l.index == 1)
			.unwrap()
			.clone();
		let x = (link.source.x + link.source.width + link.target.x) / 2.0;
		let y = (link.source_y + link.target_y) / 2.0;
		let state = session.hover_at(x, y);
		assert!(state.contains_link(1));
		assert!(!state.contains_link(0));
		assert!(!state.contains_node("b"));
	}

	#[test]
	fn clear_resets_everything() {
		let mut session = session();
		session.hover(Some(Seed::Link(0)));
		session.clear();
		assert!(session.highlight().is_empty());
		assert!(session.interaction().pinned().is_none());
	}

	#[test]
	fn bad_json_is_reported() {
		assert!(JourneySession::from_json("not json").is_err());
		let session = JourneySession::from_json(r#"{"nodes":[]}"#).unwrap();
		assert!(session.graph().is_empty());
	}
}
