//! Static SVG pieces drawn before any node: the legend and the arrowhead marker.

use leptos::prelude::*;

use super::scale::OrdinalScale;
use crate::config::LegendConfig;

/// Id referenced by `marker-end` on every edge.
pub const ARROWHEAD_ID: &str = "arrowhead";
/// Stroke colour of edges and arrowheads.
pub const EDGE_STROKE: &str = "#999";

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
	/// Category label.
	pub key: String,
	/// Colour shared with nodes of this category.
	pub color: &'static str,
	/// Centre x of the dot.
	pub dot_x: f64,
	/// Left edge of the label.
	pub label_x: f64,
	/// Shared baseline of dot and label.
	pub y: f64,
	/// Dot radius.
	pub radius: f64,
}

/// Lay out the legend rows and register their keys with `scale`, so nodes of
/// the same category pick up the same colour.
pub fn legend_entries(legend: &LegendConfig, scale: &mut OrdinalScale) -> Vec<LegendEntry> {
	legend
		.keys
		.iter()
		.enumerate()
		.map(|(i, key)| LegendEntry {
			key: key.clone(),
			color: scale.color(key),
			dot_x: legend.dot_x,
			label_x: legend.label_x,
			y: legend.first_y + i as f64 * legend.spacing,
			radius: legend.dot_radius,
		})
		.collect()
}

/// Coloured dot and label per legend row.
#[component]
pub fn Legend(entries: Vec<LegendEntry>) -> impl IntoView {
	let dots = entries
		.iter()
		.map(|e| view! { <circle cx=e.dot_x cy=e.y r=e.radius fill=e.color /> })
		.collect_view();
	let labels = entries
		.into_iter()
		.map(|e| {
			view! {
				<text
					x=e.label_x
					y=e.y
					text-anchor="start"
					style=format!("fill: {}; alignment-baseline: middle", e.color)
				>
					{e.key}
				</text>
			}
		})
		.collect_view();

	view! {
		<g class="legend">
			{dots}
			{labels}
		</g>
	}
}

/// `<marker>` definition referenced by every edge's `marker-end`.
#[component]
pub fn ArrowheadMarker() -> impl IntoView {
	view! {
		<defs>
			<marker
				id=ARROWHEAD_ID
				viewBox="-0 -5 10 10"
				refX="13"
				refY="0"
				orient="auto"
				markerWidth="13"
				markerHeight="13"
				xoverflow="visible"
			>
				<path d="M 0,-5 L 10 ,0 L 0,5" fill=EDGE_STROKE style="stroke: none" />
			</marker>
		</defs>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_legend_geometry() {
		let mut scale = OrdinalScale::new();
		let entries = legend_entries(&LegendConfig::default(), &mut scale);

		assert_eq!(entries.len(), 3);
		assert_eq!(entries[0].key, "Derived Fact");
		assert_eq!(entries[0].y, 40.0);
		assert_eq!(entries[1].y, 65.0);
		assert_eq!(entries[2].y, 90.0);
		assert!(entries.iter().all(|e| e.dot_x == 20.0 && e.label_x == 40.0 && e.radius == 7.0));
	}

	#[test]
	fn test_legend_seeds_scale() {
		let mut scale = OrdinalScale::new();
		let entries = legend_entries(&LegendConfig::default(), &mut scale);
		assert_eq!(scale.color("Primitive Fact"), entries[2].color);
		assert_eq!(scale.color("Leaf"), "#d62728");
	}
}
