//! Turns a graph payload into the drawable pieces of each diagram.
//!
//! Nothing in here touches the DOM; the components only bind these values to
//! SVG attributes.

use super::decorations::{LegendEntry, legend_entries};
use super::layered::{LayeredLayout, Point, Segment};
use super::scale::OrdinalScale;
use super::state::ForceLayout;
use super::types::{GraphData, GraphNode, NodeId};
use crate::config::DiagramConfig;
use crate::error::Result;

/// Canvas size read from the `#network` element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

/// Element id of the circle drawn for `id`.
pub fn node_dom_id(id: &NodeId) -> String {
	format!("node_{id}")
}

/// A node ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	/// `id` attribute of the circle.
	pub dom_id: String,
	/// Category colour.
	pub fill: &'static str,
	/// Payload node, shown in the tooltip.
	pub node: GraphNode,
}

/// An edge between two node positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEdge {
	/// Source node position in the input graph.
	pub source: usize,
	/// Target node position in the input graph.
	pub target: usize,
	/// Line width from the edge value.
	pub stroke_width: f64,
}

/// Legend, nodes, edges, and the running layout of a data-driven diagram.
pub struct DataDrivenScene {
	/// Legend rows, drawn first.
	pub legend: Vec<LegendEntry>,
	/// Nodes in payload order.
	pub nodes: Vec<SceneNode>,
	/// Edges in payload order.
	pub edges: Vec<SceneEdge>,
	/// Simulation seeded with the input graph.
	pub layout: ForceLayout,
}

/// Prepare a data-driven diagram. The payload follows the error-first
/// convention: an error is handed straight back and nothing is built.
pub fn data_driven_scene(
	payload: Result<GraphData>,
	config: &DiagramConfig,
	size: CanvasSize,
) -> Result<DataDrivenScene> {
	let graph = payload?;
	let layout = ForceLayout::new(
		&graph,
		&config.simulation,
		config.node_radius,
		size.width,
		size.height,
	)?;

	let mut scale = OrdinalScale::new();
	let legend = legend_entries(&config.legend, &mut scale);
	let edges = layout
		.edges()
		.iter()
		.zip(&graph.edges)
		.map(|(&(source, target), edge)| SceneEdge {
			source,
			target,
			stroke_width: edge.stroke_width(),
		})
		.collect();
	let nodes = graph
		.nodes
		.into_iter()
		.map(|node| SceneNode {
			dom_id: node_dom_id(&node.id),
			fill: scale.color(node.node_type.as_deref().unwrap_or_default()),
			node,
		})
		.collect();

	Ok(DataDrivenScene {
		legend,
		nodes,
		edges,
		layout,
	})
}

/// Placed nodes and offset edges of a model-driven diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelDrivenScene {
	/// Nodes with their fixed centres.
	pub nodes: Vec<(SceneNode, Point)>,
	/// Edge segments, in edge order.
	pub segments: Vec<Segment>,
}

/// Prepare a model-driven diagram; nodes are coloured by zone.
pub fn model_driven_scene(
	payload: Result<GraphData>,
	config: &DiagramConfig,
	size: CanvasSize,
) -> Result<ModelDrivenScene> {
	let graph = payload?;
	let layout = LayeredLayout::compute(&graph, &config.layers, size.width, size.height)?;

	let mut scale = OrdinalScale::new();
	let nodes = graph
		.nodes
		.into_iter()
		.zip(layout.positions)
		.map(|(node, point)| {
			let fill = scale.color(node.layer.as_deref().unwrap_or_default());
			let scene = SceneNode {
				dom_id: node_dom_id(&node.id),
				fill,
				node,
			};
			(scene, point)
		})
		.collect();

	Ok(ModelDrivenScene {
		nodes,
		segments: layout.segments,
	})
}
