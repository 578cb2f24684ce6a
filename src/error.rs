//! Error types for loading and parsing connectome data.

use thiserror::Error;

/// Failure that prevents the CSV from being read at all.
///
/// Individual malformed rows are not errors at this level; they are reported
/// as [`RowError`] values alongside the rows that did parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
	/// The header row could not be read.
	#[error("unreadable CSV header: {0}")]
	Header(String),
	/// A required column is absent from the header row.
	#[error("missing required column \"{0}\"")]
	MissingColumn(&'static str),
}

/// A single CSV row that was skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct RowError {
	/// 1-based line number in the source text, when known.
	pub line: u64,
	/// Why the row was rejected.
	pub message: String,
}

/// Failure while fetching and decoding the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The request never produced a response.
	#[error("request failed: {0}")]
	Network(#[from] gloo_net::Error),
	/// The server answered with a non-OK status.
	#[error("HTTP error! status: {status} ({url})")]
	Status {
		/// HTTP status code.
		status: u16,
		/// The requested URL.
		url: String,
	},
	/// The response body had no usable CSV header.
	#[error(transparent)]
	Parse(#[from] ParseError),
}
