//! CSV row model and a tolerant parser.
//!
//! A dataset is rejected only when its header is unusable. Rows that fail to
//! parse are collected as [`RowError`]s and the rest of the file is kept.

use serde::Deserialize;

use crate::error::{ParseError, RowError};

pub const ORIGIN: &str = "Origin";
pub const TARGET: &str = "Target";
pub const TYPE: &str = "Type";
pub const NEUROTRANSMITTER: &str = "Neurotransmitter";
pub const CONNECTIONS: &str = "Number of Connections";

const REQUIRED_COLUMNS: [&str; 5] = [ORIGIN, TARGET, TYPE, NEUROTRANSMITTER, CONNECTIONS];

/// Kind of junction between two cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SynapseType {
	Chemical,
	/// Electrical coupling, drawn dashed.
	GapJunction,
	/// Any other label found in the data, kept verbatim.
	Other(String),
}

impl SynapseType {
	/// Parse a `Type` cell. Case and separators are ignored, so
	/// `GapJunction`, `gap junction` and `Gap_Junction` are all gap junctions.
	pub fn parse(label: &str) -> Self {
		let folded: String = label
			.chars()
			.filter(|c| c.is_ascii_alphanumeric())
			.map(|c| c.to_ascii_lowercase())
			.collect();
		match folded.as_str() {
			"chemical" => Self::Chemical,
			"gapjunction" | "electrical" => Self::GapJunction,
			_ => Self::Other(label.to_string()),
		}
	}

	pub fn is_gap_junction(&self) -> bool {
		matches!(self, Self::GapJunction)
	}
}

/// One connection between two cells, as read from a CSV row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionRecord {
	pub origin: String,
	pub target: String,
	pub synapse: SynapseType,
	pub neurotransmitter: String,
	pub connections: u32,
}

/// Result of parsing a whole file: usable records plus skipped rows.
#[derive(Clone, Debug, Default)]
pub struct ParsedRows {
	pub records: Vec<ConnectionRecord>,
	pub row_errors: Vec<RowError>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
	#[serde(rename = "Origin")]
	origin: String,
	#[serde(rename = "Target")]
	target: String,
	#[serde(rename = "Type")]
	synapse: String,
	#[serde(rename = "Neurotransmitter")]
	neurotransmitter: String,
	#[serde(rename = "Number of Connections")]
	connections: String,
}

impl RawRow {
	fn into_record(self) -> Result<ConnectionRecord, String> {
		if self.origin.is_empty() {
			return Err(format!("empty {ORIGIN}"));
		}
		if self.target.is_empty() {
			return Err(format!("empty {TARGET}"));
		}
		let connections = parse_count(&self.connections)
			.ok_or_else(|| format!("invalid {CONNECTIONS} {:?}", self.connections))?;
		Ok(ConnectionRecord {
			origin: self.origin,
			target: self.target,
			synapse: SynapseType::parse(&self.synapse),
			neurotransmitter: self.neurotransmitter,
			connections,
		})
	}
}

/// Accepts plain integers and integral floats such as `"3.0"`.
fn parse_count(cell: &str) -> Option<u32> {
	if let Ok(n) = cell.parse::<u32>() {
		return Some(n);
	}
	let f = cell.parse::<f64>().ok()?;
	(f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then_some(f as u32)
}

/// Parse connectome CSV text.
///
/// The header row must name every required column; extra columns are
/// ignored. Blank lines are skipped and cells are trimmed.
pub fn parse_csv(text: &str) -> Result<ParsedRows, ParseError> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(true)
		.flexible(true)
		.trim(csv::Trim::All)
		.from_reader(text.as_bytes());

	let headers = reader
		.headers()
		.map_err(|e| ParseError::Header(e.to_string()))?
		.clone();
	for column in REQUIRED_COLUMNS {
		if !headers.iter().any(|h| h == column) {
			return Err(ParseError::MissingColumn(column));
		}
	}

	let mut parsed = ParsedRows::default();
	for result in reader.records() {
		let record = match result {
			Ok(record) => record,
			Err(e) => {
				let line = e.position().map(|p| p.line()).unwrap_or(0);
				parsed.row_errors.push(RowError {
					line,
					message: e.to_string(),
				});
				continue;
			}
		};
		let line = record.position().map(|p| p.line()).unwrap_or(0);
		let row = record
			.deserialize::<RawRow>(Some(&headers))
			.map_err(|e| e.to_string())
			.and_then(RawRow::into_record);
		match row {
			Ok(row) => parsed.records.push(row),
			Err(message) => parsed.row_errors.push(RowError { line, message }),
		}
	}
	Ok(parsed)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	const HEADER: &str = "Origin,Target,Type,Neurotransmitter,Number of Connections";

	#[test]
	fn parses_well_formed_rows() {
		let text = format!("{HEADER}\nAVAL,AVBL,Chemical,Acetylcholine,5\nADAL,ADAR,GapJunction,Generic_GJ,2\n");
		let parsed = parse_csv(&text).unwrap();
		assert!(parsed.row_errors.is_empty());
		assert_eq!(
			parsed.records,
			vec![
				ConnectionRecord {
					origin: "AVAL".into(),
					target: "AVBL".into(),
					synapse: SynapseType::Chemical,
					neurotransmitter: "Acetylcholine".into(),
					connections: 5,
				},
				ConnectionRecord {
					origin: "ADAL".into(),
					target: "ADAR".into(),
					synapse: SynapseType::GapJunction,
					neurotransmitter: "Generic_GJ".into(),
					connections: 2,
				},
			]
		);
	}

	#[test]
	fn column_order_and_extra_columns_do_not_matter() {
		let text = "Number of Connections,Extra,Target,Origin,Neurotransmitter,Type\n3,x,RIAL,AVAL,Glutamate,chemical\n";
		let parsed = parse_csv(text).unwrap();
		assert_eq!(parsed.records.len(), 1);
		assert_eq!(parsed.records[0].origin, "AVAL");
		assert_eq!(parsed.records[0].target, "RIAL");
		assert_eq!(parsed.records[0].connections, 3);
	}

	#[test]
	fn missing_column_is_fatal() {
		let err = parse_csv("Origin,Target,Type,Neurotransmitter\nA,B,Chemical,ACh\n").unwrap_err();
		assert_eq!(err, ParseError::MissingColumn(CONNECTIONS));
	}

	#[test]
	fn bad_rows_are_skipped_and_reported() {
		let text = format!(
			"{HEADER}\nAVAL,AVBL,Chemical,ACh,5\n,AVBL,Chemical,ACh,1\nAVAL,,Chemical,ACh,1\nAVAL,AVBL,Chemical,ACh,many\nAVAL,AVBL\nRIAL,RIAR,Chemical,ACh,2\n"
		);
		let parsed = parse_csv(&text).unwrap();
		let kept: Vec<_> = parsed.records.iter().map(|r| r.origin.as_str()).collect();
		assert_eq!(kept, vec!["AVAL", "RIAL"]);
		let lines: Vec<_> = parsed.row_errors.iter().map(|e| e.line).collect();
		assert_eq!(lines, vec![3, 4, 5, 6]);
		assert!(parsed.row_errors[0].message.contains("Origin"));
		assert!(parsed.row_errors[1].message.contains("Target"));
	}

	#[test]
	fn blank_lines_and_whitespace_are_ignored() {
		let text = format!("{HEADER}\n\n  AVAL , AVBL , Chemical , ACh , 4 \n\n");
		let parsed = parse_csv(&text).unwrap();
		assert!(parsed.row_errors.is_empty());
		assert_eq!(parsed.records[0].origin, "AVAL");
		assert_eq!(parsed.records[0].neurotransmitter, "ACh");
		assert_eq!(parsed.records[0].connections, 4);
	}

	#[test]
	fn counts_accept_integral_floats_only() {
		assert_eq!(parse_count("7"), Some(7));
		assert_eq!(parse_count("7.0"), Some(7));
		assert_eq!(parse_count("7.5"), None);
		assert_eq!(parse_count("-1"), None);
		assert_eq!(parse_count(""), None);
	}

	#[test]
	fn synapse_labels_are_folded() {
		assert_eq!(SynapseType::parse("GapJunction"), SynapseType::GapJunction);
		assert_eq!(SynapseType::parse("gap junction"), SynapseType::GapJunction);
		assert_eq!(SynapseType::parse("Chemical"), SynapseType::Chemical);
		assert_eq!(
			SynapseType::parse("Neuromodulatory"),
			SynapseType::Other("Neuromodulatory".into())
		);
	}
}
