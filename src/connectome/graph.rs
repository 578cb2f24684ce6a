//! Node and edge derivation from connection records.

use std::collections::{BTreeSet, HashMap};

use super::classify::{NeuronType, classify};
use super::record::{ConnectionRecord, SynapseType};

/// A cell in the connectome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neuron {
	/// Identifier as written in the dataset, e.g. `AVAL`.
	pub id: String,
	pub kind: NeuronType,
	/// Sum of connection counts over every edge touching this cell.
	pub degree: u64,
}

/// A rendered connection between two cells, by index into
/// [`Connectome::nodes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synapse {
	/// Index of the origin node.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
	pub synapse: SynapseType,
	/// Neurotransmitter label; may be empty.
	pub neurotransmitter: String,
	/// Number of synaptic contacts.
	pub connections: u32,
}

/// The derived graph: unique nodes plus one edge per record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Connectome {
	/// Unique cells in first-seen order.
	pub nodes: Vec<Neuron>,
	/// One edge per accepted row.
	pub edges: Vec<Synapse>,
}

impl Connectome {
	/// Build nodes and edges from records.
	///
	/// Nodes appear in first-seen order (origin before target within a row)
	/// and are classified once each.
	pub fn from_records(records: &[ConnectionRecord]) -> Self {
		let mut index: HashMap<&str, usize> = HashMap::new();
		let mut nodes = Vec::new();
		let mut edges = Vec::with_capacity(records.len());
		for record in records {
			let source = intern(&record.origin, &mut index, &mut nodes);
			let target = intern(&record.target, &mut index, &mut nodes);
			edges.push(Synapse {
				source,
				target,
				synapse: record.synapse.clone(),
				neurotransmitter: record.neurotransmitter.clone(),
				connections: record.connections,
			});
		}

		let degree = degrees(nodes.len(), &edges);
		for (node, degree) in nodes.iter_mut().zip(degree) {
			node.degree = degree;
		}

		Self { nodes, edges }
	}

	/// Distinct non-empty neurotransmitter labels, sorted.
	pub fn neurotransmitters(&self) -> Vec<String> {
		self.edges
			.iter()
			.map(|e| e.neurotransmitter.as_str())
			.filter(|nt| !nt.is_empty())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.map(str::to_string)
			.collect()
	}

	/// Look a node up by identifier.
	pub fn node(&self, id: &str) -> Option<&Neuron> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Largest degree in the graph, or 0 when empty.
	pub fn max_degree(&self) -> u64 {
		self.nodes.iter().map(|n| n.degree).max().unwrap_or(0)
	}
}

fn intern<'a>(id: &'a str, index: &mut HashMap<&'a str, usize>, nodes: &mut Vec<Neuron>) -> usize {
	*index.entry(id).or_insert_with(|| {
		nodes.push(Neuron {
			id: id.to_string(),
			kind: classify(id),
			degree: 0,
		});
		nodes.len() - 1
	})
}

/// Per-node degree: one fold over the edge list.
///
/// Each edge adds its count to both endpoints; a self-loop adds it once.
pub fn degrees(node_count: usize, edges: &[Synapse]) -> Vec<u64> {
	let mut degree = vec![0u64; node_count];
	for edge in edges {
		let weight = u64::from(edge.connections);
		degree[edge.source] += weight;
		if edge.target != edge.source {
			degree[edge.target] += weight;
		}
	}
	degree
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn row(origin: &str, target: &str, synapse: SynapseType, nt: &str, n: u32) -> ConnectionRecord {
		ConnectionRecord {
			origin: origin.into(),
			target: target.into(),
			synapse,
			neurotransmitter: nt.into(),
			connections: n,
		}
	}

	#[test]
	fn reciprocal_pair_sums_both_directions() {
		let graph = Connectome::from_records(&[
			row("AVAL", "AVBL", SynapseType::Chemical, "ACh", 5),
			row("AVBL", "AVAL", SynapseType::Chemical, "ACh", 3),
		]);
		assert_eq!(
			graph.nodes,
			vec![
				Neuron {
					id: "AVAL".into(),
					kind: NeuronType::Interneuron,
					degree: 8,
				},
				Neuron {
					id: "AVBL".into(),
					kind: NeuronType::Interneuron,
					degree: 8,
				},
			]
		);
		assert_eq!(graph.edges.len(), 2);
	}

	#[test]
	fn node_set_is_union_of_endpoints() {
		let graph = Connectome::from_records(&[
			row("ASEL", "AIYL", SynapseType::Chemical, "Glutamate", 2),
			row("AIYL", "RIAL", SynapseType::Chemical, "ACh", 1),
			row("RIAL", "SMDVR", SynapseType::GapJunction, "", 4),
			row("SMDVR", "MVR10", SynapseType::Chemical, "ACh", 6),
		]);
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["ASEL", "AIYL", "RIAL", "SMDVR", "MVR10"]);
		let kinds: Vec<_> = graph.nodes.iter().map(|n| n.kind).collect();
		assert_eq!(
			kinds,
			vec![
				NeuronType::Sensory,
				NeuronType::Interneuron,
				NeuronType::Interneuron,
				NeuronType::Motor,
				NeuronType::Muscle,
			]
		);
		let degree = |id: &str| graph.node(id).unwrap().degree;
		assert_eq!(degree("ASEL"), 2);
		assert_eq!(degree("AIYL"), 3);
		assert_eq!(degree("RIAL"), 5);
		assert_eq!(degree("SMDVR"), 10);
		assert_eq!(degree("MVR10"), 6);
		assert_eq!(graph.max_degree(), 10);
	}

	#[test]
	fn self_loop_counts_once() {
		let graph = Connectome::from_records(&[row("DVA", "DVA", SynapseType::Chemical, "ACh", 3)]);
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].degree, 3);
	}

	#[test]
	fn degree_matches_row_sum_for_every_node() {
		let records = vec![
			row("A1", "B1", SynapseType::Chemical, "ACh", 1),
			row("B1", "C1", SynapseType::Chemical, "GABA", 2),
			row("C1", "A1", SynapseType::GapJunction, "", 4),
			row("A1", "C1", SynapseType::Chemical, "ACh", 8),
		];
		let graph = Connectome::from_records(&records);
		for node in &graph.nodes {
			let expected: u64 = records
				.iter()
				.filter(|r| r.origin == node.id || r.target == node.id)
				.map(|r| u64::from(r.connections))
				.sum();
			assert_eq!(node.degree, expected, "{}", node.id);
		}
	}

	#[test]
	fn neurotransmitters_are_sorted_distinct_and_non_empty() {
		let graph = Connectome::from_records(&[
			row("A", "B", SynapseType::Chemical, "Serotonin", 1),
			row("A", "B", SynapseType::GapJunction, "", 1),
			row("B", "C", SynapseType::Chemical, "Acetylcholine", 1),
			row("C", "A", SynapseType::Chemical, "Serotonin", 1),
		]);
		assert_eq!(graph.neurotransmitters(), vec!["Acetylcholine", "Serotonin"]);
	}

	#[test]
	fn empty_input_gives_empty_graph() {
		let graph = Connectome::from_records(&[]);
		assert!(graph.nodes.is_empty());
		assert!(graph.edges.is_empty());
		assert_eq!(graph.max_degree(), 0);
	}
}
