use leptos::error::Errors;
use leptos::prelude::*;

use crate::components::network_graph::{
	DEFAULT_LAYERS, DataDrivenDiagram, GraphData, GraphEdge, GraphNode, ModelDrivenDiagram,
};

const NODE_TYPES: [&str; 3] = ["Primitive Fact", "Derivation", "Derived Fact"];
const HOSTS: [(&str, &str); 6] = [
	("apache", "http_server"),
	("microsoft", "windows_server_2016"),
	("cisco", "asa"),
	("openbsd", "openssh"),
	("oracle", "mysql"),
	("schneider-electric", "modicon_m340"),
];

/// Sample logical attack graph: a random tree whose node types cycle through
/// the legend categories.
fn generate_sample_attack_graph(n: u32) -> GraphData {
	let nodes: Vec<GraphNode> = (0..n)
		.map(|i| {
			let mut node = GraphNode::new(i).with_type(NODE_TYPES[(i % 3) as usize]);
			node.description = Some(format!("fact {i}"));
			node.base_score = Some(round3(rand_simple(i as usize) * 10.0));
			node.exploitability_score = Some(round3(rand_simple(i as usize + 7) * 10.0));
			node.impact_score = Some(round3(rand_simple(i as usize + 13) * 10.0));
			node
		})
		.collect();

	let edges: Vec<GraphEdge> = (1..n)
		.map(|i| {
			let target = (rand_simple(i as usize) * (i as f64)) as u32;
			GraphEdge {
				value: Some(1.0 + (i % 4) as f64),
				..GraphEdge::new(target, i)
			}
		})
		.collect();

	GraphData { nodes, edges }
}

/// Sample two-site network: hosts spread across every zone, each reachable
/// from one host in the previous zone.
fn generate_sample_network(per_layer: u32) -> GraphData {
	let mut nodes = Vec::new();
	let mut edges = Vec::new();
	for (layer, name) in DEFAULT_LAYERS.iter().enumerate() {
		let count = if layer == 0 { 1 } else { per_layer };
		for k in 0..count {
			let id = nodes.len() as u32;
			let (vendor, product) = HOSTS[(id as usize) % HOSTS.len()];
			let mut node = GraphNode::new(id).with_layer(*name);
			node.vendor = Some(vendor.into());
			node.product = Some(product.into());
			nodes.push(node);

			if layer > 0 {
				let prev_first = if layer == 1 { 0 } else { 1 + (layer as u32 - 2) * per_layer };
				let prev_count = if layer == 1 { 1 } else { per_layer };
				edges.push(GraphEdge::new(prev_first + k % prev_count, id));
			}
		}
	}
	GraphData { nodes, edges }
}

fn round3(v: f64) -> f64 {
	(v * 1000.0).round() / 1000.0
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn error_fallback(errors: ArcRwSignal<Errors>) -> impl IntoView {
	view! {
		<h1>"Uh oh! Something went wrong!"</h1>

		<p>"Errors: "</p>
		<ul>
			{move || {
				errors
					.get()
					.into_iter()
					.map(|(_, e)| view! { <li>{e.to_string()}</li> })
					.collect_view()
			}}
		</ul>
	}
}

/// Data-driven sample page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(move || generate_sample_attack_graph(60));

	view! {
		<ErrorBoundary fallback=error_fallback>
			<div id="networkContainer" class="graph-page">
				<div class="graph-overlay">
					<h1>"Logical Attack Graph"</h1>
					<p class="subtitle">"Drag nodes to reposition. Hover a node for its scores."</p>
				</div>
				<DataDrivenDiagram data=graph_data width=1200.0 height=800.0 />
			</div>
		</ErrorBoundary>
	}
}

/// Model-driven sample page
#[component]
pub fn ModelDriven() -> impl IntoView {
	let graph_data = Signal::derive(move || generate_sample_network(3));

	view! {
		<ErrorBoundary fallback=error_fallback>
			<div id="networkContainer" class="graph-page">
				<div class="graph-overlay">
					<h1>"Model-Driven Vulnerability Graph"</h1>
					<p class="subtitle">"Hosts by network zone. Hover a host for vendor and product."</p>
				</div>
				<ModelDrivenDiagram data=graph_data width=1200.0 height=800.0 />
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sample_graphs_are_consistent() {
		let lag = generate_sample_attack_graph(40);
		assert_eq!(lag.nodes.len(), 40);
		assert_eq!(lag.resolve_edges().unwrap().len(), 39);

		let network = generate_sample_network(3);
		assert_eq!(network.nodes.len(), 1 + 8 * 3);
		assert_eq!(network.resolve_edges().unwrap().len(), network.nodes.len() - 1);
	}
}
