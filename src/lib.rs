//! Interactive SVG diagrams of security-assessment graphs.
//!
//! Two renderers are provided: a force-directed view of logical attack graphs
//! and a zone-layered view of model-driven vulnerability graphs. Both can be
//! used as Leptos components or mounted from JavaScript through the exports in
//! [`entry`]. A small demo app with sample graphs is wired up in [`App`].

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod components;
pub mod config;
pub mod entry;
pub mod error;
mod pages;

pub use components::network_graph::{DataDrivenDiagram, GraphData, ModelDrivenDiagram};
pub use config::DiagramConfig;
pub use error::DiagramError;

// Top-Level pages
use crate::pages::home::{Home, ModelDriven};
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	console_error_panic_hook::set_once();
	if console_log::init_with_level(Level::Debug).is_ok() {
		info!("Logging initialized");
	}
}

/// An app router which renders the sample diagrams and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Attack Graph Diagrams" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/model") view=ModelDriven />
			</Routes>
		</Router>
	}
}
