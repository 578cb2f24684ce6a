//! Fetches the connectome CSV over HTTP.

use gloo_net::http::Request;
use log::{debug, info};

use crate::connectome::{self, Connectome};
use crate::error::LoadError;

/// Fetch `url` and build the connectome from its body.
///
/// A non-OK status, a transport failure, or an unusable header are errors;
/// malformed rows are logged and skipped.
pub async fn fetch_connectome(url: &str) -> Result<Connectome, LoadError> {
	debug!("deepworm: fetching {}", url);
	let response = Request::get(url).send().await?;
	if !response.ok() {
		return Err(LoadError::Status {
			status: response.status(),
			url: url.to_string(),
		});
	}
	let text = response.text().await?;
	info!("deepworm: fetched {} bytes from {}", text.len(), url);
	Ok(connectome::load_from_csv(&text)?)
}
