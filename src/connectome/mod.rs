//! Connectome data: CSV records, classification, and the derived graph.
//!
//! Everything here is pure and independent of the browser, so the whole
//! pipeline from CSV text to [`Connectome`] can be exercised natively.

mod classify;
mod filter;
mod graph;
mod record;

pub use classify::{MOTOR_PREFIXES, NeuronType, SENSORY_PREFIXES, classify};
pub use filter::{ACTIVE_OPACITY, DIMMED_OPACITY, NeurotransmitterFilter};
pub use graph::{Connectome, Neuron, Synapse, degrees};
pub use record::{ConnectionRecord, ParsedRows, SynapseType, parse_csv};

use log::{info, warn};

use crate::error::ParseError;

/// Parse CSV text and derive the graph, logging any skipped rows.
pub fn load_from_csv(text: &str) -> Result<Connectome, ParseError> {
	let parsed = parse_csv(text)?;
	if !parsed.row_errors.is_empty() {
		warn!(
			"deepworm: skipped {} malformed CSV rows",
			parsed.row_errors.len()
		);
		for err in &parsed.row_errors {
			warn!("deepworm: {}", err);
		}
	}
	let connectome = Connectome::from_records(&parsed.records);
	info!(
		"deepworm: loaded {} neurons, {} connections",
		connectome.nodes.len(),
		connectome.edges.len()
	);
	Ok(connectome)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn csv_to_graph() {
		let text = "Origin,Target,Type,Neurotransmitter,Number of Connections\n\
			AVAL,AVBL,chemical,ACh,5\n\
			AVBL,AVAL,chemical,ACh,3\n\
			,AVAL,chemical,ACh,9\n";
		let graph = load_from_csv(text).unwrap();
		assert_eq!(graph.nodes.len(), 2);
		assert!(graph.nodes.iter().all(|n| n.degree == 8));
		assert!(graph.nodes.iter().all(|n| n.kind == NeuronType::Interneuron));
	}

	#[test]
	fn bundled_sample_loads_every_row() {
		let text = include_str!("../../data/Connectome.csv");
		let rows = text.lines().skip(1).filter(|l| !l.trim().is_empty()).count();
		let graph = load_from_csv(text).unwrap();
		assert_eq!(graph.edges.len(), rows);
		for kind in [
			NeuronType::Sensory,
			NeuronType::Interneuron,
			NeuronType::Motor,
			NeuronType::Muscle,
		] {
			assert!(graph.nodes.iter().any(|n| n.kind == kind), "{kind}");
		}
		assert!(graph.edges.iter().any(|e| e.synapse.is_gap_junction()));
		assert!(graph.neurotransmitters().contains(&"GABA".to_string()));
	}

	#[test]
	fn header_problems_surface() {
		assert!(load_from_csv("Origin,Target\nA,B\n").is_err());
	}
}
