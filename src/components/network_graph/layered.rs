//! Fixed layered placement for model-driven graphs.
//!
//! Nodes are bucketed by zone. A node's x comes from its zone's index and its
//! y from its rank inside the bucket, so nothing moves after the first render.

use super::layers::LayerTaxonomy;
use super::types::GraphData;
use crate::error::{DiagramError, Result};

/// Offset applied to edge endpoints so arrowheads do not land on node centres.
pub const EDGE_OFFSET: f64 = 2.5;

/// Number of horizontal bands the canvas width is divided into.
const BANDS: f64 = 10.0;

/// Node centre on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
}

/// A straight edge from `(x1, y1)` to `(x2, y2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
	/// Start x, beside the source.
	pub x1: f64,
	/// Start y.
	pub y1: f64,
	/// End x, beside the target.
	pub x2: f64,
	/// End y.
	pub y2: f64,
}

/// Placed nodes and edges, indexed like the input graph.
#[derive(Clone, Debug, PartialEq)]
pub struct LayeredLayout {
	/// Centre of each node.
	pub positions: Vec<Point>,
	/// Zone index of each node.
	pub layer_of: Vec<usize>,
	/// One offset segment per edge.
	pub segments: Vec<Segment>,
}

impl LayeredLayout {
	/// Place every node of `data` on a `width` × `height` canvas.
	///
	/// # Errors
	///
	/// Fails on duplicate ids, dangling edges, or a node whose layer is
	/// missing or not part of `layers`.
	pub fn compute(
		data: &GraphData,
		layers: &LayerTaxonomy,
		width: f64,
		height: f64,
	) -> Result<Self> {
		let layer_of = data
			.nodes
			.iter()
			.map(|node| {
				let layer = node.layer.as_deref().unwrap_or_default();
				layers.index_of(layer).ok_or_else(|| DiagramError::UnknownLayer {
					node: node.id.to_string(),
					layer: layer.to_string(),
				})
			})
			.collect::<Result<Vec<_>>>()?;

		let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); layers.len()];
		for (i, &layer) in layer_of.iter().enumerate() {
			buckets[layer].push(i);
		}

		let mut positions = vec![Point { x: 0.0, y: 0.0 }; data.nodes.len()];
		for (layer, bucket) in buckets.iter().enumerate() {
			let spacing = height / (bucket.len() as f64 + 1.0);
			for (rank, &i) in bucket.iter().enumerate() {
				positions[i] = Point {
					x: band_x(layer, width),
					y: (rank as f64 + 1.0) * spacing,
				};
			}
		}

		let segments = data
			.resolve_edges()?
			.into_iter()
			.map(|(src, tgt)| segment(positions[src], positions[tgt]))
			.collect();

		Ok(Self {
			positions,
			layer_of,
			segments,
		})
	}
}

/// Left edge of band `layer`, nudged right by 5.
pub fn band_x(layer: usize, width: f64) -> f64 {
	width - (BANDS - layer as f64) * width / BANDS + 5.0
}

/// Edge between two placed nodes. The line leaves the source slightly to the
/// right and enters the target slightly to the left; the vertical nudge points
/// each end toward the other node.
pub fn segment(source: Point, target: Point) -> Segment {
	let y1 = if source.y > target.y { -EDGE_OFFSET } else { EDGE_OFFSET };
	let y2 = if source.y < target.y { -EDGE_OFFSET } else { EDGE_OFFSET };
	Segment {
		x1: source.x + EDGE_OFFSET,
		y1: source.y + y1,
		x2: target.x - EDGE_OFFSET,
		y2: target.y + y2,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::{GraphEdge, GraphNode};

	fn graph(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: nodes
				.iter()
				.map(|(id, layer)| GraphNode::new(*id).with_layer(*layer))
				.collect(),
			edges: edges.iter().map(|(s, t)| GraphEdge::new(*s, *t)).collect(),
		}
	}

	#[test]
	fn test_same_layer_ranks_are_evenly_spaced() {
		let data = graph(
			&[("a", "corp_lan"), ("x", "remote_attack"), ("b", "corp_lan"), ("c", "corp_lan")],
			&[],
		);
		let layout = LayeredLayout::compute(&data, &LayerTaxonomy::default(), 1000.0, 800.0).unwrap();

		let ys: Vec<f64> = [0, 2, 3].iter().map(|&i| layout.positions[i].y).collect();
		assert_eq!(ys, vec![200.0, 400.0, 600.0]);
		assert_eq!(layout.positions[1].y, 400.0);
		assert!(ys.windows(2).all(|w| w[0] < w[1]));
	}

	#[test]
	fn test_band_x_moves_right_with_layer_index() {
		let layers = LayerTaxonomy::default();
		let xs: Vec<f64> = (0..layers.len()).map(|i| band_x(i, 1000.0)).collect();

		assert_eq!(xs[0], 5.0);
		assert_eq!(xs[8], 805.0);
		assert!(xs.windows(2).all(|w| w[0] < w[1]));
	}

	#[test]
	fn test_edge_offsets_follow_vertical_order() {
		let down = segment(Point { x: 10.0, y: 100.0 }, Point { x: 110.0, y: 300.0 });
		assert_eq!(
			down,
			Segment {
				x1: 12.5,
				y1: 102.5,
				x2: 107.5,
				y2: 297.5
			}
		);

		let up = segment(Point { x: 10.0, y: 300.0 }, Point { x: 110.0, y: 100.0 });
		assert_eq!((up.y1, up.y2), (297.5, 102.5));

		let level = segment(Point { x: 10.0, y: 50.0 }, Point { x: 110.0, y: 50.0 });
		assert_eq!((level.y1, level.y2), (52.5, 52.5));
	}

	#[test]
	fn test_segments_stay_near_node_centres() {
		let data = graph(
			&[("0", "remote_attack"), ("1", "corp_fw_1"), ("2", "corp_fw_1")],
			&[("0", "1"), ("0", "2"), ("2", "1")],
		);
		let layout = LayeredLayout::compute(&data, &LayerTaxonomy::default(), 900.0, 600.0).unwrap();
		let index = data.resolve_edges().unwrap();

		for (seg, (src, tgt)) in layout.segments.iter().zip(index) {
			let (s, t) = (layout.positions[src], layout.positions[tgt]);
			assert!((seg.x1 - s.x).abs() <= EDGE_OFFSET && (seg.y1 - s.y).abs() <= EDGE_OFFSET);
			assert!((seg.x2 - t.x).abs() <= EDGE_OFFSET && (seg.y2 - t.y).abs() <= EDGE_OFFSET);
		}
	}

	#[test]
	fn test_unknown_layer_is_rejected() {
		let data = graph(&[("a", "corp_lan"), ("b", "internet")], &[]);
		let err = LayeredLayout::compute(&data, &LayerTaxonomy::default(), 100.0, 100.0).unwrap_err();
		assert_eq!(
			err,
			DiagramError::UnknownLayer {
				node: "b".into(),
				layer: "internet".into()
			}
		);

		let data = GraphData {
			nodes: vec![GraphNode::new("c")],
			edges: vec![],
		};
		assert!(LayeredLayout::compute(&data, &LayerTaxonomy::default(), 100.0, 100.0).is_err());
	}
}
