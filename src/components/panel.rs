//! Controls and information panels around the graph canvas.

use leptos::prelude::*;
use log::debug;

use super::force_graph::NodeSummary;
use crate::connectome::NeurotransmitterFilter;

/// Dropdown choosing which neurotransmitter to emphasise.
#[component]
pub fn NeurotransmitterSelect(
	/// Observed neurotransmitters, already sorted.
	options: Vec<String>,
	#[prop(into)] value: Signal<NeurotransmitterFilter>,
	on_change: WriteSignal<NeurotransmitterFilter>,
) -> impl IntoView {
	let all = NeurotransmitterFilter::All.value().to_string();
	view! {
		<select
			id="neurotransmitter-select"
			class="neurotransmitter-select"
			prop:value=move || value.get().value().to_string()
			on:change=move |ev| {
				let selected = event_target_value(&ev);
				debug!("deepworm: neurotransmitter filter -> {}", selected);
				on_change.set(NeurotransmitterFilter::from_value(&selected));
			}
		>
			<option value=all>"All Neurotransmitters"</option>
			{options
				.into_iter()
				.map(|nt| {
					let label = nt.clone();
					view! { <option value=nt>{label}</option> }
				})
				.collect_view()}
		</select>
	}
}

/// How to read the drawing.
#[component]
pub fn KeyNotes() -> impl IntoView {
	view! {
		<div class="key-notes">
			<p>"• Solid lines represent chemical synapses"</p>
			<p>"• Dashed lines represent gap junctions"</p>
			<p>"• Line thickness indicates connection strength"</p>
			<p>"• Node size represents total number of connections"</p>
		</div>
	}
}

/// Details of the hovered node; empty when nothing is hovered.
#[component]
pub fn NodeInfoPanel(#[prop(into)] hovered: Signal<Option<NodeSummary>>) -> impl IntoView {
	move || {
		hovered.get().map(|node| {
			view! {
				<div class="node-info">
					<p class="node-id">{node.id}</p>
					<p class="node-type">"Type: " {node.kind.name()}</p>
					<p class="node-degree">"Connections: " {node.degree}</p>
				</div>
			}
		})
	}
}
