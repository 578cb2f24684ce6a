//! deepworm: interactive force-directed visualization of the C. elegans
//! connectome.
//!
//! The crate fetches a CSV of neuron-to-neuron connections, classifies each
//! cell by name, aggregates connection counts per cell, and renders the result
//! as a WASM canvas graph with physics-based layout, pan/zoom, drag, hover
//! details and a neurotransmitter filter.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info};

pub mod components;
pub mod config;
pub mod connectome;
pub mod error;
pub mod loader;

pub use components::force_graph::{ForceGraphCanvas, NodeSummary};
pub use config::ViewerConfig;
pub use connectome::{Connectome, NeuronType, NeurotransmitterFilter, classify};

use components::panel::{KeyNotes, NeurotransmitterSelect, NodeInfoPanel};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("deepworm: logging initialized");
}

/// Where the dataset is in its single load.
#[derive(Clone, Debug)]
pub enum LoadState {
	/// Request in flight.
	Loading,
	/// Terminal failure, with the message shown to the user.
	Failed(String),
	/// Dataset parsed and ready to draw.
	Ready(Arc<Connectome>),
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = ViewerConfig::from_document();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="DeepWorm - C. elegans Connectome Visualization" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app">
			<header class="app-header">
				<img src="/favicon.svg" alt="Neural Network" class="app-logo" />
				<h1>"DeepWorm - C. elegans Connectome Visualization"</h1>
			</header>
			<ConnectomeVisualization config=config />
		</div>
	}
}

/// Fetches the dataset once, then shows the graph or a terminal error.
#[component]
pub fn ConnectomeVisualization(config: ViewerConfig) -> impl IntoView {
	let (load_state, set_load_state) = signal(LoadState::Loading);

	let url = config.data_url.clone();
	leptos::task::spawn_local(async move {
		let next = match loader::fetch_connectome(&url).await {
			Ok(connectome) => LoadState::Ready(Arc::new(connectome)),
			Err(e) => {
				error!("deepworm: error reading {}: {}", url, e);
				LoadState::Failed(e.to_string())
			}
		};
		set_load_state.set(next);
	});

	move || match load_state.get() {
		LoadState::Loading => view! { <div class="status">"Loading connectome data..."</div> }.into_any(),
		LoadState::Failed(message) => view! { <div class="status error">"Error: " {message}</div> }.into_any(),
		LoadState::Ready(connectome) => {
			view! { <ConnectomeView connectome=connectome config=config.clone() /> }.into_any()
		}
	}
}

/// Graph canvas with its dropdown, key and hover panel.
#[component]
fn ConnectomeView(connectome: Arc<Connectome>, config: ViewerConfig) -> impl IntoView {
	let (filter, set_filter) = signal(NeurotransmitterFilter::All);
	let (hovered, set_hovered) = signal(None::<NodeSummary>);
	let options = connectome.neurotransmitters();

	view! {
		<div class="connectome">
			<div class="graph-area">
				<NeurotransmitterSelect options=options value=filter on_change=set_filter />
				<ForceGraphCanvas
					connectome=connectome
					filter=filter
					on_hover=Callback::new(move |node| set_hovered.set(node))
					config=config
				/>
			</div>
			<aside class="sidebar">
				<KeyNotes />
				<NodeInfoPanel hovered=hovered />
			</aside>
		</div>
	}
}
