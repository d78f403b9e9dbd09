//! Interactive condition/drug regimen graph on a canvas, plus the Leptos
//! client-side app that hosts it.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod components;
mod pages;

pub use components::regimen_graph;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

const GRAPH_CSS: &str = "
.regimen-page { max-width: 1000px; margin: 0 auto; font-family: sans-serif; }
.regimen-page .subtitle { margin: 0 0 16px; color: #64748b; font-size: 14px; }
.regimen-graph { background: #fff; border: 1px solid #e2e8f0; border-radius: 16px; overflow: hidden; }
.regimen-graph-toolbar { position: absolute; top: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; padding: 8px; background: rgba(255, 255, 255, 0.9); border-radius: 8px; }
.regimen-graph-toolbar button { padding: 6px 10px; border: none; background: transparent; color: #475569; cursor: pointer; }
.regimen-graph-toolbar button:hover { background: #f1f5f9; }
.regimen-graph-legend { position: absolute; top: 16px; left: 16px; padding: 12px; background: rgba(255, 255, 255, 0.8); border-radius: 8px; font: 12px monospace; color: #64748b; pointer-events: none; }
.regimen-graph-legend-title { font-weight: bold; color: #1e293b; margin-bottom: 4px; }
";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the homepage and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Regimen Network" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Style>{GRAPH_CSS}</Style>

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
