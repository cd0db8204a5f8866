use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use super::decorations::{ArrowheadMarker, EDGE_STROKE, Legend};
use super::render::{self, CanvasSize, DataDrivenScene, ModelDrivenScene};
use super::state::{ForceLayout, Frame};
use super::tooltip::{Tooltip, TooltipKind, TooltipState};
use super::types::{GraphData, GraphNode};
use crate::config::{DiagramConfig, TooltipConfig};

const MARKER_URL: &str = "url(#arrowhead)";

type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(frame_loop: &FrameLoop) {
	if let (Some(window), Some(cb)) = (web_sys::window(), frame_loop.borrow().as_ref()) {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Pointer position relative to the element the handler is attached to.
fn local_position(ev: &MouseEvent) -> Option<(f64, f64)> {
	let target: Element = ev.current_target()?.dyn_into().ok()?;
	let rect = target.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn tooltip_size(tooltip_ref: NodeRef<leptos::html::Div>) -> (f64, f64) {
	tooltip_ref
		.try_get_untracked()
		.flatten()
		.map(|el| (el.offset_width() as f64, el.offset_height() as f64))
		.unwrap_or_default()
}

/// Mouse-over fills the tooltip for `node`, then places it beside the pointer
/// on the next frame, once the filled overlay can be measured. Mouse-leave
/// hides it.
fn hover_handlers(
	kind: TooltipKind,
	node: GraphNode,
	tooltip: RwSignal<TooltipState>,
	tooltip_ref: NodeRef<leptos::html::Div>,
	timings: TooltipConfig,
) -> (impl FnMut(MouseEvent) + 'static, impl FnMut(MouseEvent) + 'static) {
	let timings_hide = timings.clone();
	let on_mouseover = move |ev: MouseEvent| {
		let page = (ev.page_x() as f64, ev.page_y() as f64);
		tooltip.update(|t| t.show(kind, &node, &timings));
		let place = Closure::once_into_js(move || {
			let size = tooltip_size(tooltip_ref);
			tooltip.try_update(|t| {
				if t.visible {
					t.place(kind, page, size);
				}
			});
		});
		if let Some(window) = web_sys::window() {
			let _ = window.request_animation_frame(place.unchecked_ref());
		}
	};
	let on_mouseleave = move |_: MouseEvent| tooltip.update(|t| t.hide(&timings_hide));
	(on_mouseover, on_mouseleave)
}

/// Force-directed view of a logical attack graph with legend, drag, and tooltips.
#[component]
pub fn DataDrivenDiagram(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = 960.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
	#[prop(default = DiagramConfig::default())] config: DiagramConfig,
) -> impl IntoView {
	let size = CanvasSize { width, height };
	let tooltip = RwSignal::new(TooltipState::default());
	let tooltip_ref = NodeRef::<leptos::html::Div>::new();

	let diagram = move || {
		render::data_driven_scene(Ok(data.get()), &config, size)
			.inspect_err(|e| warn!("data-driven diagram not drawn: {e}"))
			.map(|scene| data_driven_view(scene, &config, size, tooltip, tooltip_ref))
	};

	view! {
		{diagram}
		<Tooltip state=tooltip overlay_ref=tooltip_ref />
	}
}

fn data_driven_view(
	scene: DataDrivenScene,
	config: &DiagramConfig,
	size: CanvasSize,
	tooltip: RwSignal<TooltipState>,
	tooltip_ref: NodeRef<leptos::html::Div>,
) -> impl IntoView + use<> {
	let DataDrivenScene {
		legend,
		nodes,
		edges,
		layout,
	} = scene;
	info!(
		"data-driven diagram: {} nodes, {} edges",
		nodes.len(),
		edges.len()
	);

	// Disposed with this view, which stops the frame loop below.
	let alive = RwSignal::new(true);
	let frame = RwSignal::new(layout.frame());
	let layout: Rc<RefCell<ForceLayout>> = Rc::new(RefCell::new(layout));
	let animate: FrameLoop = Rc::new(RefCell::new(None));

	// Runs while the simulation is hot; a drag on a cooled layout restarts it.
	let (layout_anim, animate_inner) = (layout.clone(), animate.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		if alive.try_get_untracked() != Some(true) {
			return;
		}
		let (snapshot, running): (Frame, bool) = {
			let mut l = layout_anim.borrow_mut();
			l.tick();
			(l.frame(), l.running)
		};
		let _ = frame.try_set(snapshot);
		if running {
			request_frame(&animate_inner);
		}
	}));
	request_frame(&animate);

	let links = edges
		.into_iter()
		.map(|edge| {
			let (s, t) = (edge.source, edge.target);
			view! {
				<line
					stroke-width=edge.stroke_width
					color="black"
					marker-end=MARKER_URL
					x1=move || frame.with(|f| f.position(s).0)
					y1=move || frame.with(|f| f.position(s).1)
					x2=move || frame.with(|f| f.position(t).0)
					y2=move || frame.with(|f| f.position(t).1)
				/>
			}
		})
		.collect_view();

	let radius = config.node_radius;
	let timings = config.tooltip.clone();
	let circles = nodes
		.into_iter()
		.enumerate()
		.map(|(i, scene_node)| {
			let (layout_md, animate_md) = (layout.clone(), animate.clone());
			let on_mousedown = move |ev: MouseEvent| {
				ev.prevent_default();
				let was_running = {
					let mut l = layout_md.borrow_mut();
					let was_running = l.running;
					l.drag_start(i);
					was_running
				};
				if !was_running {
					request_frame(&animate_md);
				}
			};
			let (on_mouseover, on_mouseleave) = hover_handlers(
				TooltipKind::DataDriven,
				scene_node.node,
				tooltip,
				tooltip_ref,
				timings.clone(),
			);

			view! {
				<g class="nodeWrapper" on:mouseover=on_mouseover on:mouseleave=on_mouseleave>
					<circle
						r=radius
						fill=scene_node.fill
						id=scene_node.dom_id
						cx=move || frame.with(|f| f.position(i).0)
						cy=move || frame.with(|f| f.position(i).1)
						on:mousedown=on_mousedown
					/>
				</g>
			}
		})
		.collect_view();

	let layout_mm = layout.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let mut l = layout_mm.borrow_mut();
		if !l.drag.active {
			return;
		}
		if let Some((x, y)) = local_position(&ev) {
			l.drag_to(x, y);
		}
	};
	let layout_mu = layout.clone();
	let on_mouseup = move |_: MouseEvent| layout_mu.borrow_mut().drag_end();
	let layout_ml = layout;
	let on_mouseleave = move |_: MouseEvent| layout_ml.borrow_mut().drag_end();

	view! {
		<svg
			id="network"
			width=size.width
			height=size.height
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
		>
			<Legend entries=legend />
			<ArrowheadMarker />
			<g class="links" stroke=EDGE_STROKE>
				{links}
			</g>
			<g class="nodes">{circles}</g>
		</svg>
	}
}

/// Zone-layered view of a model-driven vulnerability graph.
#[component]
pub fn ModelDrivenDiagram(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = 960.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
	#[prop(default = DiagramConfig::default())] config: DiagramConfig,
) -> impl IntoView {
	let size = CanvasSize { width, height };
	let tooltip = RwSignal::new(TooltipState::default());
	let tooltip_ref = NodeRef::<leptos::html::Div>::new();

	let diagram = move || {
		render::model_driven_scene(Ok(data.get()), &config, size)
			.inspect_err(|e| warn!("model-driven diagram not drawn: {e}"))
			.map(|scene| model_driven_view(scene, &config, size, tooltip, tooltip_ref))
	};

	view! {
		{diagram}
		<Tooltip state=tooltip overlay_ref=tooltip_ref />
	}
}

fn model_driven_view(
	scene: ModelDrivenScene,
	config: &DiagramConfig,
	size: CanvasSize,
	tooltip: RwSignal<TooltipState>,
	tooltip_ref: NodeRef<leptos::html::Div>,
) -> impl IntoView + use<> {
	let ModelDrivenScene { nodes, segments } = scene;
	info!(
		"model-driven diagram: {} nodes, {} edges",
		nodes.len(),
		segments.len()
	);

	let radius = config.node_radius;
	let timings = config.tooltip.clone();
	let circles = nodes
		.into_iter()
		.map(|(scene_node, point)| {
			let (on_mouseover, on_mouseleave) = hover_handlers(
				TooltipKind::ModelDriven,
				scene_node.node,
				tooltip,
				tooltip_ref,
				timings.clone(),
			);

			view! {
				<g class="nodeWrapper" on:mouseover=on_mouseover on:mouseleave=on_mouseleave>
					<circle
						r=radius
						fill=scene_node.fill
						id=scene_node.dom_id
						cx=point.x
						cy=point.y
					/>
				</g>
			}
		})
		.collect_view();

	let links = segments
		.into_iter()
		.map(|seg| {
			view! {
				<line
					stroke-width=0.75
					color="black"
					marker-end=MARKER_URL
					x1=seg.x1
					y1=seg.y1
					x2=seg.x2
					y2=seg.y2
				/>
			}
		})
		.collect_view();

	view! {
		<svg id="network" width=size.width height=size.height>
			<ArrowheadMarker />
			<g class="nodes">{circles}</g>
			<g class="links" stroke=EDGE_STROKE>
				{links}
			</g>
		</svg>
	}
}
