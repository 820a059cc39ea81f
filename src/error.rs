//! Error type for the JSON boundary.
//!
//! Graph construction, layout and traversal never fail; unresolved references
//! are skipped. Only decoding input and encoding output can go wrong.

use thiserror::Error;

/// Errors raised at the serialization boundary.
#[derive(Debug, Error)]
pub enum GraphError {
	/// Input text was not a valid `{ nodes, links }` document.
	#[error("failed to parse graph data: {0}")]
	Parse(#[from] serde_json::Error),
	/// A layout or highlight result could not be encoded.
	#[error("failed to serialize result: {0}")]
	Serialize(#[source] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;
