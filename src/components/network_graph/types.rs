use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DiagramError, Result};

/// Node identifier. The analysis back-end emits both integers and strings, so
/// either form is accepted and kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct NodeId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Int(i64),
	Float(f64),
	Text(String),
}

/// Floats in `[I64_LOW, I64_HIGH)` convert to `i64` without saturating.
const I64_LOW: f64 = i64::MIN as f64;
const I64_HIGH: f64 = i64::MAX as f64;

impl From<RawId> for NodeId {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Int(i) => Self(i.to_string()),
			RawId::Float(f) if f.fract() == 0.0 && (I64_LOW..I64_HIGH).contains(&f) => {
				Self((f as i64).to_string())
			}
			RawId::Float(f) => Self(f.to_string()),
			RawId::Text(s) => Self(s),
		}
	}
}

impl NodeId {
	/// Borrow the id as text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		Self(s.to_string())
	}
}

impl From<u32> for NodeId {
	fn from(i: u32) -> Self {
		Self(i.to_string())
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A fact, derivation or host in an assessment graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique key, also used for the `node_<id>` element id.
	pub id: NodeId,
	/// Legend category (`Derived Fact`, `Derivation`, `Primitive Fact`).
	#[serde(default)]
	pub node_type: Option<String>,
	/// Network zone name, model-driven graphs only.
	#[serde(default)]
	pub layer: Option<String>,
	/// Human readable fact text.
	#[serde(default)]
	pub description: Option<String>,
	/// CVSS-style base score.
	#[serde(default)]
	pub base_score: Option<f64>,
	/// CVSS-style exploitability score.
	#[serde(default)]
	pub exploitability_score: Option<f64>,
	/// CVSS-style impact score.
	#[serde(default)]
	pub impact_score: Option<f64>,
	/// Host vendor, model-driven graphs only.
	#[serde(default)]
	pub vendor: Option<String>,
	/// Host product, model-driven graphs only.
	#[serde(default)]
	pub product: Option<String>,
}

impl GraphNode {
	/// A node with only an id set.
	pub fn new(id: impl Into<NodeId>) -> Self {
		Self {
			id: id.into(),
			node_type: None,
			layer: None,
			description: None,
			base_score: None,
			exploitability_score: None,
			impact_score: None,
			vendor: None,
			product: None,
		}
	}

	/// Set the legend category.
	pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
		self.node_type = Some(node_type.into());
		self
	}

	/// Set the network zone.
	pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
		self.layer = Some(layer.into());
		self
	}
}

/// A derivation or attack step between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// Id of the node the edge leaves.
	pub source: NodeId,
	/// Id of the node the edge enters.
	pub target: NodeId,
	/// Weight; drawn as `sqrt(value)` stroke width.
	#[serde(default)]
	pub value: Option<f64>,
}

impl GraphEdge {
	/// An unweighted edge.
	pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			value: None,
		}
	}

	/// Stroke width for the data-driven view. Missing or unusable weights draw at 1.
	pub fn stroke_width(&self) -> f64 {
		self.value
			.filter(|v| v.is_finite() && *v >= 0.0)
			.map_or(1.0, f64::sqrt)
	}
}

/// Input graph for a single render pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Nodes in payload order.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Edges in payload order.
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// Map every node id to its position in `nodes`, rejecting duplicates.
	pub fn index_by_id(&self) -> Result<HashMap<&NodeId, usize>> {
		let mut index = HashMap::with_capacity(self.nodes.len());
		for (i, node) in self.nodes.iter().enumerate() {
			if index.insert(&node.id, i).is_some() {
				return Err(DiagramError::DuplicateNode(node.id.to_string()));
			}
		}
		Ok(index)
	}

	/// Resolve every edge to `(source, target)` node positions.
	pub fn resolve_edges(&self) -> Result<Vec<(usize, usize)>> {
		let index = self.index_by_id()?;
		self.edges
			.iter()
			.map(|edge| match (index.get(&edge.source), index.get(&edge.target)) {
				(Some(&src), Some(&tgt)) => Ok((src, tgt)),
				_ => Err(DiagramError::DanglingEdge {
					from: edge.source.to_string(),
					to: edge.target.to_string(),
				}),
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_mixed_id_forms_decode_to_text() {
		let graph: GraphData = serde_json::from_str(
			r#"{
				"nodes": [
					{"id": 1, "description": "Something!", "node_type": "Leaf", "base_score": 10},
					{"id": 2.0, "node_type": "Leaf"}
				],
				"edges": [{"source": "1", "target": 2}],
				"computation_time": 0.25
			}"#,
		)
		.unwrap();

		assert_eq!(graph.nodes[0].id.as_str(), "1");
		assert_eq!(graph.nodes[1].id.as_str(), "2");
		assert_eq!(graph.nodes[0].base_score, Some(10.0));
		assert_eq!(graph.nodes[1].description, None);
		assert_eq!(graph.resolve_edges().unwrap(), vec![(0, 1)]);
	}

	#[test]
	fn test_huge_float_ids_stay_distinct() {
		let graph: GraphData = serde_json::from_str(
			r#"{"nodes": [{"id": 1e20}, {"id": 2e20}, {"id": -3.0}], "edges": []}"#,
		)
		.unwrap();
		assert_eq!(graph.nodes[0].id.as_str(), "100000000000000000000");
		assert_eq!(graph.nodes[1].id.as_str(), "200000000000000000000");
		assert_eq!(graph.nodes[2].id.as_str(), "-3");
		assert!(graph.index_by_id().is_ok());
	}

	#[test]
	fn test_dangling_edge_is_rejected() {
		let graph = GraphData {
			nodes: vec![GraphNode::new("a")],
			edges: vec![GraphEdge::new("a", "b")],
		};
		assert_eq!(
			graph.resolve_edges(),
			Err(DiagramError::DanglingEdge {
				from: "a".into(),
				to: "b".into()
			})
		);
	}

	#[test]
	fn test_duplicate_node_is_rejected() {
		let graph = GraphData {
			nodes: vec![GraphNode::new("a"), GraphNode::new("a")],
			edges: vec![],
		};
		assert_eq!(
			graph.index_by_id().unwrap_err(),
			DiagramError::DuplicateNode("a".into())
		);
	}

	#[test]
	fn test_stroke_width() {
		let mut edge = GraphEdge::new("a", "b");
		assert_eq!(edge.stroke_width(), 1.0);
		edge.value = Some(4.0);
		assert_eq!(edge.stroke_width(), 2.0);
		edge.value = Some(-1.0);
		assert_eq!(edge.stroke_width(), 1.0);
	}
}
