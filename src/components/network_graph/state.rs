use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::types::GraphData;
use crate::config::SimulationConfig;
use crate::error::Result;

/// Spread of the initial phyllotaxis placement.
const INITIAL_RADIUS: f64 = 10.0;

#[derive(Clone, Debug, Default)]
struct NodeInfo {
	/// Position of the node in the input graph.
	index: usize,
}

/// Node currently held by the pointer, if any.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A node is being dragged.
	pub active: bool,
	node_idx: Option<DefaultNodeIdx>,
	/// Pinned coordinates of the dragged node.
	pub fixed: Option<(f64, f64)>,
}

/// d3-style cooling: alpha eases toward its target every tick and the
/// simulation stops once alpha drops below the minimum.
#[derive(Clone, Debug)]
struct Cooling {
	alpha: f64,
	alpha_target: f64,
	decay: f64,
	min: f64,
}

impl Cooling {
	fn new(config: &SimulationConfig) -> Self {
		Self {
			alpha: 1.0,
			alpha_target: 0.0,
			decay: config.alpha_decay,
			min: config.alpha_min,
		}
	}

	fn step(&mut self) -> f64 {
		self.alpha += (self.alpha_target - self.alpha) * self.decay;
		self.alpha
	}

	fn is_cold(&self) -> bool {
		self.alpha < self.min
	}
}

/// Snapshot of node positions for one frame, indexed like the input graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	/// `(x, y)` per node.
	pub positions: Vec<(f64, f64)>,
}

impl Frame {
	/// Position of node `index`, or the origin if it is out of range.
	pub fn position(&self, index: usize) -> (f64, f64) {
		self.positions.get(index).copied().unwrap_or_default()
	}
}

/// Force layout of a data-driven graph, bounded to the canvas.
pub struct ForceLayout {
	graph: ForceGraph<NodeInfo, ()>,
	/// Pointer drag in progress.
	pub drag: DragState,
	cooling: Cooling,
	width: f64,
	height: f64,
	/// False once the simulation has cooled and no node is held.
	pub running: bool,
	margin: f64,
	tick_seconds: f32,
	drag_alpha_target: f64,
	indices: Vec<DefaultNodeIdx>,
	edges: Vec<(usize, usize)>,
}

impl ForceLayout {
	/// Build the layout, starting nodes on a phyllotaxis spiral around the centre.
	///
	/// # Errors
	///
	/// Fails on duplicate node ids or edges that reference missing nodes.
	pub fn new(
		data: &GraphData,
		config: &SimulationConfig,
		node_radius: f64,
		width: f64,
		height: f64,
	) -> Result<Self> {
		let edges = data.resolve_edges()?;
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: config.force_charge,
			force_spring: config.force_spring,
			force_max: config.force_max,
			node_speed: config.node_speed,
			damping_factor: config.damping_factor,
		});

		let golden = PI * (3.0 - 5f64.sqrt());
		let indices = (0..data.nodes.len())
			.map(|i| {
				let (radius, angle) = (
					INITIAL_RADIUS * (0.5 + i as f64).sqrt(),
					i as f64 * golden,
				);
				graph.add_node(NodeData {
					x: (width / 2.0 + radius * angle.cos()) as f32,
					y: (height / 2.0 + radius * angle.sin()) as f32,
					mass: config.node_mass,
					is_anchor: false,
					user_data: NodeInfo { index: i },
				})
			})
			.collect::<Vec<_>>();

		// Self-loops are drawn but exert no spring force.
		for &(src, tgt) in edges.iter().filter(|(src, tgt)| src != tgt) {
			graph.add_edge(indices[src], indices[tgt], EdgeData::default());
		}

		Ok(Self {
			graph,
			drag: DragState::default(),
			cooling: Cooling::new(config),
			width,
			height,
			running: true,
			margin: node_radius,
			tick_seconds: config.tick_seconds,
			drag_alpha_target: config.drag_alpha_target,
			indices,
			edges,
		})
	}

	/// Resolved `(source, target)` positions of every edge.
	pub fn edges(&self) -> &[(usize, usize)] {
		&self.edges
	}

	/// Advance one frame: integrate forces, recentre, clamp to the canvas.
	/// Does nothing once the simulation has cooled.
	pub fn tick(&mut self) {
		if !self.running {
			return;
		}
		let alpha = self.cooling.step();
		self.graph.update(self.tick_seconds * alpha as f32);
		self.recentre();
		self.clamp();

		if self.cooling.is_cold() && !self.drag.active {
			self.running = false;
			debug!("simulation cooled");
		}
	}

	/// Shift free nodes so the centroid sits at the canvas centre.
	fn recentre(&mut self) {
		let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
		self.graph.visit_nodes(|node| {
			sx += node.x() as f64;
			sy += node.y() as f64;
			n += 1;
		});
		if n == 0 {
			return;
		}
		let (dx, dy) = (
			(self.width / 2.0 - sx / n as f64) as f32,
			(self.height / 2.0 - sy / n as f64) as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x += dx;
				node.data.y += dy;
			}
		});
	}

	fn clamp(&mut self) {
		let (lo, hi_x, hi_y) = (
			self.margin,
			self.width - self.margin,
			self.height - self.margin,
		);
		self.graph.visit_nodes_mut(|node| {
			node.data.x = (node.data.x as f64).min(hi_x).max(lo) as f32;
			node.data.y = (node.data.y as f64).min(hi_y).max(lo) as f32;
		});
	}

	/// Current positions, indexed like the input graph.
	pub fn frame(&self) -> Frame {
		let mut positions = vec![(0.0, 0.0); self.indices.len()];
		self.graph.visit_nodes(|node| {
			if let Some(slot) = positions.get_mut(node.data.user_data.index) {
				*slot = (node.x() as f64, node.y() as f64);
			}
		});
		Frame { positions }
	}

	fn position_of(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	fn pin(&mut self, idx: DefaultNodeIdx, anchor: bool, at: Option<(f64, f64)>) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = anchor;
				if let Some((x, y)) = at {
					node.data.x = x as f32;
					node.data.y = y as f32;
				}
			}
		});
	}

	/// Pin node `index` at its current position and reheat the simulation.
	pub fn drag_start(&mut self, index: usize) {
		let Some(&idx) = self.indices.get(index) else {
			return;
		};
		let fixed = self.position_of(idx);
		self.pin(idx, true, None);
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			fixed,
		};
		self.cooling.alpha_target = self.drag_alpha_target;
		if !self.running {
			debug!("simulation reheated");
		}
		self.running = true;
	}

	/// Move the pin of the dragged node to canvas coordinates `(x, y)`.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		if let Some(idx) = self.drag.node_idx {
			self.drag.fixed = Some((x, y));
			self.pin(idx, true, Some((x, y)));
		}
	}

	/// Release the dragged node and let the simulation settle.
	pub fn drag_end(&mut self) {
		if let Some(idx) = self.drag.node_idx {
			self.pin(idx, false, None);
		}
		self.drag = DragState::default();
		self.cooling.alpha_target = 0.0;
	}

	/// Pinned coordinates of node `index`, if it is being dragged.
	pub fn fixed_position(&self, index: usize) -> Option<(f64, f64)> {
		let idx = self.indices.get(index)?;
		if self.drag.node_idx.as_ref() == Some(idx) {
			self.drag.fixed
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::{GraphEdge, GraphNode};

	fn chain(n: u32) -> GraphData {
		GraphData {
			nodes: (0..n).map(GraphNode::new).collect(),
			edges: (1..n).map(|i| GraphEdge::new(i - 1, i)).collect(),
		}
	}

	fn layout(n: u32) -> ForceLayout {
		ForceLayout::new(&chain(n), &SimulationConfig::default(), 5.0, 400.0, 300.0).unwrap()
	}

	#[test]
	fn test_positions_stay_on_canvas() {
		let mut layout = layout(30);
		for _ in 0..120 {
			layout.tick();
		}
		let frame = layout.frame();
		assert_eq!(frame.positions.len(), 30);
		for &(x, y) in &frame.positions {
			assert!((5.0..=395.0).contains(&x), "x out of bounds: {x}");
			assert!((5.0..=295.0).contains(&y), "y out of bounds: {y}");
		}
	}

	#[test]
	fn test_simulation_cools_down() {
		let mut layout = layout(4);
		for _ in 0..400 {
			layout.tick();
		}
		assert!(!layout.running);
		let before = layout.frame();
		layout.tick();
		assert_eq!(layout.frame(), before);
	}

	#[test]
	fn test_drag_pins_then_releases() {
		let mut layout = layout(5);
		layout.tick();
		let start = layout.frame().position(2);

		layout.drag_start(2);
		assert_eq!(layout.fixed_position(2), Some(start));
		assert_eq!(layout.fixed_position(1), None);
		assert_eq!(layout.cooling.alpha_target, 0.3);

		layout.drag_to(120.0, 80.0);
		assert_eq!(layout.fixed_position(2), Some((120.0, 80.0)));
		layout.tick();
		assert_eq!(layout.frame().position(2), (120.0, 80.0));

		layout.drag_end();
		assert_eq!(layout.fixed_position(2), None);
		assert_eq!(layout.cooling.alpha_target, 0.0);
		assert!(!layout.drag.active);
	}

	#[test]
	fn test_drag_reheats_cooled_simulation() {
		let mut layout = layout(3);
		for _ in 0..400 {
			layout.tick();
		}
		assert!(!layout.running);
		layout.drag_start(0);
		assert!(layout.running);
	}

	#[test]
	fn test_self_loop_is_kept_without_a_spring() {
		let mut data = chain(2);
		data.edges.insert(0, GraphEdge::new("0", "0"));
		let mut layout =
			ForceLayout::new(&data, &SimulationConfig::default(), 5.0, 400.0, 300.0).unwrap();
		assert_eq!(layout.edges(), &[(0, 0), (0, 1)]);
		for _ in 0..50 {
			layout.tick();
		}
		for &(x, y) in &layout.frame().positions {
			assert!(x.is_finite() && y.is_finite());
		}
	}

	#[test]
	fn test_dangling_edge_fails() {
		let mut data = chain(2);
		data.edges.push(GraphEdge::new("1", "7"));
		assert!(ForceLayout::new(&data, &SimulationConfig::default(), 5.0, 100.0, 100.0).is_err());
	}
}
