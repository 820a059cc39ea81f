//! Graph components.

pub mod journey_graph;
