//! Anatomical classification of cells by identifier prefix.

use std::fmt;

/// Identifier prefixes of sensory neurons.
pub const SENSORY_PREFIXES: &[&str] = &[
	"ADF", "ADL", "AFD", "ALM", "AQR", "ASE", "ASG", "ASH", "ASI", "ASJ", "ASK", "AVM", "AWA",
	"AWB", "AWC", "BAG", "CEP", "FLP", "IL1", "IL2", "OLL", "OLQ", "PHA", "PHB", "PHC", "PLM",
	"PVD", "SAA", "SDQ", "URA", "URB", "URX", "URY",
];

/// Identifier prefixes of motor neurons.
pub const MOTOR_PREFIXES: &[&str] = &[
	"DA", "DB", "DD", "VA", "VB", "VC", "VD", "AS", "PDA", "PDB", "RMD", "RME", "RMF", "RMH", "SMB",
	"SMD",
];

/// Anatomical type of a node in the connectome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeuronType {
	Sensory,
	Interneuron,
	Motor,
	Muscle,
	Unknown,
}

impl NeuronType {
	/// Every type, in legend order. The legend itself skips `Unknown`.
	pub const ALL: [NeuronType; 5] = [
		NeuronType::Sensory,
		NeuronType::Interneuron,
		NeuronType::Motor,
		NeuronType::Muscle,
		NeuronType::Unknown,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::Sensory => "Sensory",
			Self::Interneuron => "Interneuron",
			Self::Motor => "Motor",
			Self::Muscle => "Muscle",
			Self::Unknown => "Unknown",
		}
	}
}

impl fmt::Display for NeuronType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Classify a cell by its identifier.
///
/// Rules are checked in order: empty → `Unknown`, leading `M` → `Muscle`,
/// sensory prefix → `Sensory`, motor prefix → `Motor`, anything else is an
/// `Interneuron`. Matching is case-sensitive.
pub fn classify(id: &str) -> NeuronType {
	let id = id.trim();
	if id.is_empty() {
		return NeuronType::Unknown;
	}
	if id.starts_with('M') {
		return NeuronType::Muscle;
	}
	if SENSORY_PREFIXES.iter().any(|p| id.starts_with(p)) {
		return NeuronType::Sensory;
	}
	if MOTOR_PREFIXES.iter().any(|p| id.starts_with(p)) {
		return NeuronType::Motor;
	}
	NeuronType::Interneuron
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn muscle_wins_over_everything() {
		for id in ["MDL01", "MVR24", "M", "MI", "MC"] {
			assert_eq!(classify(id), NeuronType::Muscle, "{id}");
		}
	}

	#[test]
	fn sensory_prefixes_match_at_start() {
		for id in ["ADFL", "ASER", "IL2DL", "URYVR", "PHCL", "AVM"] {
			assert_eq!(classify(id), NeuronType::Sensory, "{id}");
		}
		// prefix must be at the start
		assert_eq!(classify("XADF"), NeuronType::Interneuron);
	}

	#[test]
	fn sensory_checked_before_motor() {
		// "ASE" is sensory even though "AS" is a motor prefix
		assert_eq!(classify("ASEL"), NeuronType::Sensory);
		assert_eq!(classify("AS01"), NeuronType::Motor);
	}

	#[test]
	fn motor_prefixes() {
		for id in ["DA01", "VB11", "DD06", "RMDL", "SMDVR", "PDA"] {
			assert_eq!(classify(id), NeuronType::Motor, "{id}");
		}
	}

	#[test]
	fn fallback_is_interneuron() {
		for id in ["AVAL", "AVBL", "RIAL", "PVCR", "DVA"] {
			assert_eq!(classify(id), NeuronType::Interneuron, "{id}");
		}
	}

	#[test]
	fn empty_is_unknown() {
		assert_eq!(classify(""), NeuronType::Unknown);
		assert_eq!(classify("   "), NeuronType::Unknown);
	}

	#[test]
	fn matching_is_case_sensitive() {
		assert_eq!(classify("mdl01"), NeuronType::Interneuron);
		assert_eq!(classify("asel"), NeuronType::Interneuron);
	}
}
