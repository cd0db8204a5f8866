//! JavaScript entry points that mount a diagram into an existing page.
//!
//! The page provides `#networkContainer` holding an `<svg id="network">` with
//! numeric `width`/`height` attributes. The placeholder is replaced by the
//! rendered diagram of the same size and the tooltip overlay is appended to
//! the container.

use std::any::Any;
use std::cell::RefCell;

use leptos::mount::mount_to;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::components::network_graph::{
	CanvasSize, DataDrivenDiagram, GraphData, LayeredLayout, ModelDrivenDiagram,
};
use crate::config::DiagramConfig;
use crate::error::{DiagramError, Result};
use crate::init_logging;

/// Placeholder `<svg>` whose size the diagram takes over.
pub const NETWORK_ID: &str = "network";
/// Element the diagram and tooltip are mounted into.
pub const CONTAINER_ID: &str = "networkContainer";

thread_local! {
	/// Handle of the diagram mounted by the last entry-point call.
	static MOUNTED: RefCell<Option<Box<dyn Any>>> = const { RefCell::new(None) };
}

/// Drop `placeholder` and unmount the diagram from the previous call, which
/// stops its frame loop.
fn unmount_previous(placeholder: &web_sys::Element) {
	placeholder.remove();
	if let Some(previous) = MOUNTED.with(|m| m.borrow_mut().take()) {
		info!("unmounting previous diagram");
		drop(previous);
	}
}

/// Read the canvas size from the `width`/`height` attribute strings.
pub fn parse_canvas_size(width: Option<String>, height: Option<String>) -> Result<CanvasSize> {
	let parse = |name: &str, value: Option<String>| -> Result<f64> {
		let value =
			value.ok_or_else(|| DiagramError::InvalidCanvas(format!("{name} is not set")))?;
		match value.trim().parse::<f64>() {
			Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
			_ => Err(DiagramError::InvalidCanvas(format!("{name}=\"{value}\""))),
		}
	};
	Ok(CanvasSize {
		width: parse("width", width)?,
		height: parse("height", height)?,
	})
}

fn decode_graph(data: JsValue) -> Result<GraphData> {
	serde_wasm_bindgen::from_value(data).map_err(|e| DiagramError::Payload(e.to_string()))
}

fn document() -> Result<Document> {
	web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| DiagramError::MissingElement("document".into()))
}

/// Locate the container and read the placeholder's size without touching the page.
fn mount_target(document: &Document) -> Result<(HtmlElement, web_sys::Element, CanvasSize)> {
	let network = document
		.get_element_by_id(NETWORK_ID)
		.ok_or_else(|| DiagramError::MissingElement(NETWORK_ID.into()))?;
	let size = parse_canvas_size(
		network.get_attribute("width"),
		network.get_attribute("height"),
	)?;
	let container = document
		.get_element_by_id(CONTAINER_ID)
		.and_then(|el| el.dyn_into::<HtmlElement>().ok())
		.ok_or_else(|| DiagramError::MissingElement(CONTAINER_ID.into()))?;
	Ok((container, network, size))
}

/// Render a logical attack graph. The payload is error-first: an error is
/// returned untouched before the page is modified.
pub fn render_data_driven(payload: Result<GraphData>, config: DiagramConfig) -> Result<()> {
	let graph = payload?;
	graph.resolve_edges()?;

	let (container, placeholder, size) = mount_target(&document()?)?;
	unmount_previous(&placeholder);
	info!("mounting data-driven diagram {}x{}", size.width, size.height);
	let handle = mount_to(container, move || {
		view! {
			<DataDrivenDiagram
				data=Signal::derive(move || graph.clone())
				width=size.width
				height=size.height
				config=config
			/>
		}
	});
	MOUNTED.with(|m| *m.borrow_mut() = Some(Box::new(handle)));
	Ok(())
}

/// Render a model-driven vulnerability graph into the nine-zone layout.
pub fn render_model_driven(payload: Result<GraphData>, config: DiagramConfig) -> Result<()> {
	let graph = payload?;

	let (container, placeholder, size) = mount_target(&document()?)?;
	LayeredLayout::compute(&graph, &config.layers, size.width, size.height)?;
	unmount_previous(&placeholder);
	info!("mounting model-driven diagram {}x{}", size.width, size.height);
	let handle = mount_to(container, move || {
		view! {
			<ModelDrivenDiagram
				data=Signal::derive(move || graph.clone())
				width=size.width
				height=size.height
				config=config
			/>
		}
	});
	MOUNTED.with(|m| *m.borrow_mut() = Some(Box::new(handle)));
	Ok(())
}

fn decode(data: JsValue, options: JsValue) -> Result<(Result<GraphData>, DiagramConfig)> {
	init_logging();
	Ok((decode_graph(data), DiagramConfig::from_js(options)?))
}

/// Draw `data` as a force-directed diagram. `options` is an optional
/// `DiagramConfig` object.
#[wasm_bindgen(js_name = generateDataDrivenNetworkDiagram)]
pub fn generate_data_driven_network_diagram(
	data: JsValue,
	options: JsValue,
) -> std::result::Result<(), JsValue> {
	let (payload, config) = decode(data, options)?;
	render_data_driven(payload, config)
		.inspect_err(|e| warn!("data-driven diagram rejected: {e}"))
		.map_err(Into::into)
}

/// Draw `data` as a zone-layered diagram. `options` is an optional
/// `DiagramConfig` object.
#[wasm_bindgen(js_name = generateModelDrivenNetworkDiagram)]
pub fn generate_model_driven_network_diagram(
	data: JsValue,
	options: JsValue,
) -> std::result::Result<(), JsValue> {
	let (payload, config) = decode(data, options)?;
	render_model_driven(payload, config)
		.inspect_err(|e| warn!("model-driven diagram rejected: {e}"))
		.map_err(Into::into)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_canvas_size() {
		let size = parse_canvas_size(Some("960".into()), Some(" 600.5 ".into())).unwrap();
		assert_eq!(size, CanvasSize { width: 960.0, height: 600.5 });

		assert!(matches!(
			parse_canvas_size(None, Some("600".into())),
			Err(DiagramError::InvalidCanvas(_))
		));
		assert!(matches!(
			parse_canvas_size(Some("100%".into()), Some("600".into())),
			Err(DiagramError::InvalidCanvas(_))
		));
		assert!(parse_canvas_size(Some("0".into()), Some("600".into())).is_err());
	}

	#[test]
	fn test_error_payload_propagates_before_dom_access() {
		let err = DiagramError::Payload("upstream failure".into());
		assert_eq!(
			render_data_driven(Err(err.clone()), DiagramConfig::default()),
			Err(err.clone())
		);
		assert_eq!(
			render_model_driven(Err(err.clone()), DiagramConfig::default()),
			Err(err)
		);
	}
}
