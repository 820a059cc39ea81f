//! Multi-stage journey graph: model, column layout and highlight traversal.
//!
//! Three pieces, each depending only on the ones before it:
//! - [`GraphModel`] indexes the raw `{ nodes, links }` snapshot once
//! - [`layout`] orders every depth column with a barycenter heuristic and
//!   produces pixel rectangles and flow bands
//! - [`find_connected_from_node`] / [`find_connected_from_link`] collect the
//!   subgraph to highlight for a hovered or clicked element
//!
//! [`JourneySession`] ties them together for an interactive host.
//!
//! # Example
//!
//! ```
//! use journey_graph::{GraphData, GraphModel, InputLink, InputNode, layout};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         InputNode { id: "home".into(), name: "Home".into(), depth: 0, total_traffic: 100.0 },
//!         InputNode { id: "cart".into(), name: "Cart".into(), depth: 1, total_traffic: 40.0 },
//!     ],
//!     links: vec![InputLink { source: 0, target: 1, value: 40.0 }],
//! };
//!
//! let graph = GraphModel::new(&data);
//! let result = layout(&graph, 800.0, 600.0);
//! assert_eq!(result.node_positions.len(), 2);
//! ```

pub mod config;
mod layout;
mod model;
mod state;
mod traversal;
mod types;

pub use layout::{LayoutResult, LinkPosition, NodePosition, layout, layout_with_config};
pub use model::{Connection, GraphLink, GraphModel, GraphNode};
pub use state::{InteractionState, JourneySession, Seed};
pub use traversal::{HighlightState, find_connected_from_link, find_connected_from_node};
pub use types::{GraphData, InputLink, InputNode};
