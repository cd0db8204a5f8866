//! Hover tooltip: content per diagram kind, placement, and fade state.

use leptos::prelude::*;

use super::types::GraphNode;
use crate::config::TooltipConfig;

const BACKGROUND: &str = "rgba(211, 211, 211, 0.8)";

/// Which diagram the tooltip belongs to; decides fields, width, and placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TooltipKind {
	/// Scores of a logical attack graph fact.
	DataDriven,
	/// Vendor and product of a host.
	ModelDriven,
}

impl TooltipKind {
	fn content_width(self) -> u32 {
		match self {
			Self::DataDriven => 300,
			Self::ModelDriven => 200,
		}
	}

	fn x_shift(self) -> f64 {
		match self {
			Self::DataDriven => 350.0,
			Self::ModelDriven => 150.0,
		}
	}

	/// Labelled lines shown for `node`.
	pub fn lines(self, node: &GraphNode) -> Vec<(&'static str, String)> {
		let id = ("ID", node.id.to_string());
		match self {
			Self::DataDriven => vec![
				id,
				("Description", text(&node.description)),
				("Type", text(&node.node_type)),
				("Base Score", score(node.base_score)),
				("Exploitability Score", score(node.exploitability_score)),
				("Impact Score", score(node.impact_score)),
			],
			Self::ModelDriven => vec![
				id,
				("Vendor", text(&node.vendor)),
				("Product", text(&node.product)),
			],
		}
	}
}

fn text(value: &Option<String>) -> String {
	value.clone().unwrap_or_else(|| "n/a".into())
}

fn score(value: Option<f64>) -> String {
	value.map_or_else(|| "n/a".into(), |v| v.to_string())
}

/// Everything the tooltip overlay renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
	/// Opacity is 1 when set.
	pub visible: bool,
	/// `label: value` rows.
	pub lines: Vec<(&'static str, String)>,
	/// Width of the content box in pixels.
	pub content_width: u32,
	/// Page x of the overlay's left edge.
	pub left: f64,
	/// Page y of the overlay's top edge.
	pub top: f64,
	/// Length of the opacity transition.
	pub transition_ms: u32,
}

impl TooltipState {
	/// Fill in the content for `node` and fade in over `show_ms`. The
	/// overlay stays where it is until [`TooltipState::place`] is called with
	/// its rendered size.
	pub fn show(&mut self, kind: TooltipKind, node: &GraphNode, timings: &TooltipConfig) {
		self.visible = true;
		self.lines = kind.lines(node);
		self.content_width = kind.content_width();
		self.transition_ms = timings.show_ms;
	}

	/// Anchor the overlay beside the pointer's page position, given the
	/// rendered `(width, height)` of the filled tooltip.
	pub fn place(&mut self, kind: TooltipKind, page: (f64, f64), size: (f64, f64)) {
		self.left = page.0 - size.0 + kind.x_shift();
		self.top = page.1 - size.1 - 100.0;
	}

	/// Hide immediately and reset to the origin with empty content.
	pub fn hide(&mut self, timings: &TooltipConfig) {
		*self = Self {
			transition_ms: timings.hide_ms,
			..Self::default()
		};
	}

	/// Inline style of the overlay.
	pub fn style(&self) -> String {
		let background = if self.visible {
			format!("background-color: {BACKGROUND}; ")
		} else {
			String::new()
		};
		format!(
			"position: absolute; pointer-events: none; {}opacity: {}; transition: opacity {}ms; left: {}px; top: {}px;",
			background,
			if self.visible { 1 } else { 0 },
			self.transition_ms,
			self.left,
			self.top,
		)
	}
}

/// Absolutely positioned overlay showing the hovered node's fields.
#[component]
pub fn Tooltip(
	state: RwSignal<TooltipState>,
	overlay_ref: NodeRef<leptos::html::Div>,
) -> impl IntoView {
	view! {
		<div class="tooltip" node_ref=overlay_ref style=move || state.with(TooltipState::style)>
			{move || {
				let (visible, width, lines) =
					state.with(|s| (s.visible, s.content_width, s.lines.clone()));
				if !visible {
					return view! { <div /> }.into_any();
				}
				view! {
					<div style=format!("width: {width}px")>
						{lines
							.into_iter()
							.map(|(label, value)| view! { {format!("{label}: {value}")} <br /> })
							.collect_view()}
					</div>
				}
				.into_any()
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fact() -> GraphNode {
		let mut node = GraphNode::new(7u32).with_type("Derived Fact");
		node.description = Some("execCode(webServer, root)".into());
		node.base_score = Some(7.5);
		node.exploitability_score = Some(10.0);
		node.impact_score = Some(6.4);
		node.vendor = Some("apache".into());
		node.product = Some("httpd".into());
		node
	}

	#[test]
	fn test_data_driven_lines() {
		assert_eq!(
			TooltipKind::DataDriven.lines(&fact()),
			vec![
				("ID", "7".to_string()),
				("Description", "execCode(webServer, root)".to_string()),
				("Type", "Derived Fact".to_string()),
				("Base Score", "7.5".to_string()),
				("Exploitability Score", "10".to_string()),
				("Impact Score", "6.4".to_string()),
			]
		);
	}

	#[test]
	fn test_model_driven_lines() {
		let lines = TooltipKind::ModelDriven.lines(&fact());
		let labels: Vec<_> = lines.iter().map(|(l, _)| *l).collect();
		assert_eq!(labels, vec!["ID", "Vendor", "Product"]);
		assert_eq!(lines[2].1, "httpd");
	}

	#[test]
	fn test_missing_fields_read_na() {
		let lines = TooltipKind::DataDriven.lines(&GraphNode::new("x"));
		assert_eq!(lines[1].1, "n/a");
		assert_eq!(lines[3].1, "n/a");
	}

	#[test]
	fn test_show_then_hide() {
		let timings = TooltipConfig::default();
		let mut state = TooltipState::default();

		state.show(TooltipKind::DataDriven, &fact(), &timings);
		assert!(state.visible);
		assert_eq!(state.transition_ms, 300);
		assert_eq!(state.content_width, 300);
		assert_eq!(state.lines.len(), 6);
		assert!(state.style().contains("opacity: 1"));

		state.place(TooltipKind::DataDriven, (500.0, 400.0), (300.0, 120.0));
		assert_eq!((state.left, state.top), (550.0, 180.0));

		state.show(TooltipKind::ModelDriven, &fact(), &timings);
		state.place(TooltipKind::ModelDriven, (500.0, 400.0), (200.0, 60.0));
		assert_eq!((state.left, state.top), (450.0, 240.0));

		state.hide(&timings);
		assert!(!state.visible);
		assert!(state.lines.is_empty());
		assert_eq!((state.left, state.top, state.transition_ms), (0.0, 0.0, 0));
		assert!(state.style().contains("opacity: 0"));
	}
}
