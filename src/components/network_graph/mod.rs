//! Attack-graph and network diagrams drawn as SVG.

mod component;
mod decorations;
mod layered;
mod layers;
mod render;
pub mod scale;
mod state;
mod tooltip;
mod types;

pub use component::{DataDrivenDiagram, ModelDrivenDiagram};
pub use decorations::{LegendEntry, legend_entries};
pub use layered::{EDGE_OFFSET, LayeredLayout, Point, Segment, band_x, segment};
pub use layers::{DEFAULT_LAYERS, LayerTaxonomy};
pub use render::{
	CanvasSize, DataDrivenScene, ModelDrivenScene, SceneEdge, SceneNode, data_driven_scene,
	model_driven_scene, node_dom_id,
};
pub use state::{ForceLayout, Frame};
pub use tooltip::{TooltipKind, TooltipState};
pub use types::{GraphData, GraphEdge, GraphNode, NodeId};
