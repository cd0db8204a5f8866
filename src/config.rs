//! Diagram options. Every field has a default, so callers only pass overrides.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::components::network_graph::LayerTaxonomy;
use crate::error::{DiagramError, Result};

/// Options shared by both renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
	/// Circle radius; also the clamp margin of the force layout.
	pub node_radius: f64,
	/// Legend drawn by the data-driven view.
	pub legend: LegendConfig,
	/// Zone order of the model-driven view.
	pub layers: LayerTaxonomy,
	/// Force layout tuning.
	pub simulation: SimulationConfig,
	/// Tooltip timings.
	pub tooltip: TooltipConfig,
}

impl Default for DiagramConfig {
	fn default() -> Self {
		Self {
			node_radius: 5.0,
			legend: LegendConfig::default(),
			layers: LayerTaxonomy::default(),
			simulation: SimulationConfig::default(),
			tooltip: TooltipConfig::default(),
		}
	}
}

impl DiagramConfig {
	/// Parse options from JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		serde_json::from_str(text).map_err(|e| DiagramError::Config(e.to_string()))
	}

	/// Decode options handed over from JavaScript. `undefined` and `null` give the defaults.
	pub fn from_js(value: JsValue) -> Result<Self> {
		if value.is_undefined() || value.is_null() {
			return Ok(Self::default());
		}
		serde_wasm_bindgen::from_value(value).map_err(|e| DiagramError::Config(e.to_string()))
	}
}

/// Legend geometry and categories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
	/// Categories, top to bottom.
	pub keys: Vec<String>,
	/// Dot centre x.
	pub dot_x: f64,
	/// Label x.
	pub label_x: f64,
	/// y of the first entry.
	pub first_y: f64,
	/// Vertical distance between entries.
	pub spacing: f64,
	/// Dot radius.
	pub dot_radius: f64,
}

impl Default for LegendConfig {
	fn default() -> Self {
		Self {
			keys: vec![
				"Derived Fact".into(),
				"Derivation".into(),
				"Primitive Fact".into(),
			],
			dot_x: 20.0,
			label_x: 40.0,
			first_y: 40.0,
			spacing: 25.0,
			dot_radius: 7.0,
		}
	}
}

/// Parameters of the data-driven force layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Many-body repulsion.
	pub force_charge: f32,
	/// Link attraction.
	pub force_spring: f32,
	/// Upper bound of a single force.
	pub force_max: f32,
	/// Velocity factor.
	pub node_speed: f32,
	/// Velocity damping per update.
	pub damping_factor: f32,
	/// Node mass.
	pub node_mass: f32,
	/// Seconds simulated per frame before cooling is applied.
	pub tick_seconds: f32,
	/// Fraction of the distance to the alpha target covered per tick.
	pub alpha_decay: f64,
	/// Alpha below which the simulation stops.
	pub alpha_min: f64,
	/// Alpha target while a node is dragged.
	pub drag_alpha_target: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			tick_seconds: 0.016,
			// cools from 1 to alpha_min in 300 ticks
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			alpha_min,
			drag_alpha_target: 0.3,
		}
	}
}

/// Tooltip fade timings in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
	/// Fade-in duration.
	pub show_ms: u32,
	/// Fade-out duration.
	pub hide_ms: u32,
}

impl Default for TooltipConfig {
	fn default() -> Self {
		Self {
			show_ms: 300,
			hide_ms: 0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = DiagramConfig::default();
		assert_eq!(config.node_radius, 5.0);
		assert_eq!(config.legend.keys.len(), 3);
		assert_eq!(config.layers.len(), 9);
		assert_eq!(config.tooltip.show_ms, 300);
		assert_eq!(config.tooltip.hide_ms, 0);
		assert!((config.simulation.alpha_decay - 0.0228).abs() < 1e-3);
	}

	#[test]
	fn test_partial_json_keeps_defaults() {
		let config = DiagramConfig::from_json(
			r#"{"node_radius": 8, "layers": ["wan", "dmz", "lan"], "tooltip": {"show_ms": 150}}"#,
		)
		.unwrap();
		assert_eq!(config.node_radius, 8.0);
		assert_eq!(config.layers.index_of("lan"), Some(2));
		assert_eq!(config.tooltip.show_ms, 150);
		assert_eq!(config.tooltip.hide_ms, 0);
		assert_eq!(config.legend, LegendConfig::default());
	}

	#[test]
	fn test_bad_json_is_config_error() {
		let err = DiagramConfig::from_json(r#"{"node_radius": "big"}"#).unwrap_err();
		assert!(matches!(err, DiagramError::Config(_)));
	}
}
