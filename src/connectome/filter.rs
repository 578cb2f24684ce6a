//! Neurotransmitter filter.
//!
//! Filtering never removes edges; it only dims the ones that don't match.

use super::graph::Synapse;

/// Dropdown value meaning "no filter".
pub const ALL: &str = "all";

/// Opacity of edges that pass the filter.
pub const ACTIVE_OPACITY: f64 = 0.6;
/// Opacity of edges dimmed by the filter.
pub const DIMMED_OPACITY: f64 = 0.1;

/// Which neurotransmitter is currently selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NeurotransmitterFilter {
	#[default]
	All,
	Only(String),
}

impl NeurotransmitterFilter {
	/// Build from a `<select>` value.
	pub fn from_value(value: &str) -> Self {
		if value == ALL {
			Self::All
		} else {
			Self::Only(value.to_string())
		}
	}

	/// Value to put back into the `<select>`.
	pub fn value(&self) -> &str {
		match self {
			Self::All => ALL,
			Self::Only(nt) => nt,
		}
	}

	pub fn matches(&self, neurotransmitter: &str) -> bool {
		match self {
			Self::All => true,
			Self::Only(nt) => nt == neurotransmitter,
		}
	}

	/// Opacity for an edge carrying `neurotransmitter`.
	pub fn opacity(&self, neurotransmitter: &str) -> f64 {
		if self.matches(neurotransmitter) {
			ACTIVE_OPACITY
		} else {
			DIMMED_OPACITY
		}
	}

	pub fn edge_opacity(&self, edge: &Synapse) -> f64 {
		self.opacity(&edge.neurotransmitter)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::connectome::{Connectome, ConnectionRecord, SynapseType};
	use pretty_assertions::assert_eq;

	fn graph() -> Connectome {
		let rows = [
			("AVAL", "AVBL", "Acetylcholine"),
			("AVBL", "RIAL", "Glutamate"),
			("RIAL", "AVAL", "Acetylcholine"),
		];
		let records: Vec<_> = rows
			.iter()
			.map(|(o, t, nt)| ConnectionRecord {
				origin: (*o).into(),
				target: (*t).into(),
				synapse: SynapseType::Chemical,
				neurotransmitter: (*nt).into(),
				connections: 1,
			})
			.collect();
		Connectome::from_records(&records)
	}

	#[test]
	fn all_keeps_every_edge_active() {
		let g = graph();
		let filter = NeurotransmitterFilter::from_value("all");
		assert_eq!(filter, NeurotransmitterFilter::All);
		assert!(g.edges.iter().all(|e| filter.edge_opacity(e) == ACTIVE_OPACITY));
	}

	#[test]
	fn selection_dims_without_removing() {
		let g = graph();
		let before = g.clone();
		let filter = NeurotransmitterFilter::from_value("Glutamate");
		let opacities: Vec<_> = g.edges.iter().map(|e| filter.edge_opacity(e)).collect();
		assert_eq!(opacities, vec![DIMMED_OPACITY, ACTIVE_OPACITY, DIMMED_OPACITY]);
		assert_eq!(g, before);
	}

	#[test]
	fn value_round_trips_through_select() {
		for value in ["all", "Serotonin"] {
			assert_eq!(NeurotransmitterFilter::from_value(value).value(), value);
		}
	}
}
