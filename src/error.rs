//! Error types shared by both diagram renderers.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while decoding a payload or preparing a diagram.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramError {
	/// The caller handed over an error instead of a graph, or the graph failed to decode.
	#[error("graph payload rejected: {0}")]
	Payload(String),

	/// Two nodes share the same id.
	#[error("duplicate node id '{0}'")]
	DuplicateNode(String),

	/// An edge names a node that is not in the graph.
	#[error("edge {from} -> {to} references a missing node")]
	DanglingEdge {
		/// Source node id as given by the edge.
		from: String,
		/// Target node id as given by the edge.
		to: String,
	},

	/// A node sits outside the layer taxonomy.
	#[error("node '{node}' has unknown layer '{layer}'")]
	UnknownLayer {
		/// Offending node id.
		node: String,
		/// Layer name as given by the node (empty when absent).
		layer: String,
	},

	/// The `#network` element has no usable size.
	#[error("invalid canvas size: {0}")]
	InvalidCanvas(String),

	/// A required DOM element is missing.
	#[error("missing element #{0}")]
	MissingElement(String),

	/// Diagram options failed to decode.
	#[error("invalid diagram options: {0}")]
	Config(String),
}

/// Result type alias for diagram operations.
pub type Result<T> = std::result::Result<T, DiagramError>;

impl From<DiagramError> for JsValue {
	fn from(err: DiagramError) -> Self {
		js_sys::Error::new(&err.to_string()).into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = DiagramError::DanglingEdge {
			from: "3".into(),
			to: "9".into(),
		};
		assert_eq!(err.to_string(), "edge 3 -> 9 references a missing node");

		let err = DiagramError::UnknownLayer {
			node: "4".into(),
			layer: "dmz".into(),
		};
		assert_eq!(err.to_string(), "node '4' has unknown layer 'dmz'");

		let err = DiagramError::MissingElement("network".into());
		assert_eq!(err.to_string(), "missing element #network");
	}
}
