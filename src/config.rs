//! Viewer configuration supplied by the host page.
//!
//! The page may embed a `<script type="application/json" id="deepworm-config">`
//! element. Every field is optional; anything left out keeps its default.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::force_graph::ThemeChoice;

/// DOM id of the configuration script element.
pub const CONFIG_ELEMENT_ID: &str = "deepworm-config";

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
	/// URL of the connectome CSV.
	pub data_url: String,
	pub theme: ThemeChoice,
	pub physics: PhysicsConfig,
	pub zoom: ZoomConfig,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			data_url: "/data/Connectome.csv".to_string(),
			theme: ThemeChoice::default(),
			physics: PhysicsConfig::default(),
			zoom: ZoomConfig::default(),
		}
	}
}

/// Force simulation parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
	/// Many-body repulsion strength.
	pub charge: f32,
	/// Edge spring stiffness.
	pub spring: f32,
	/// Cap on the force applied to a single node per step.
	pub max_force: f32,
	pub node_speed: f32,
	pub damping: f32,
	/// Fraction of the remaining energy lost per tick.
	pub alpha_decay: f64,
	/// Energy below which the simulation stops stepping.
	pub alpha_min: f64,
	/// Energy the simulation is held at while a node is dragged.
	pub drag_alpha_target: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			charge: 150.0,
			spring: 0.05,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			// 1 - 0.001^(1/300): cools from 1 to alpha_min in about 300 ticks
			alpha_decay: 0.0228,
			alpha_min: 0.001,
			drag_alpha_target: 0.3,
		}
	}
}

/// Zoom behavior for wheel and button controls.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	/// Factor applied by the zoom in/out buttons.
	pub step: f64,
	/// Per-notch factor for wheel zoom.
	pub wheel_step: f64,
	/// Duration of animated button zooms.
	pub transition_ms: f64,
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.1,
			max_scale: 4.0,
			step: 1.3,
			wheel_step: 1.1,
			transition_ms: 750.0,
		}
	}
}

impl ViewerConfig {
	/// Parse configuration JSON.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Read configuration from the host page, falling back to defaults.
	pub fn from_document() -> Self {
		let Some(json) = config_element_text() else {
			info!("deepworm: no #{} element, using default config", CONFIG_ELEMENT_ID);
			return Self::default();
		};
		match Self::from_json(&json) {
			Ok(config) => {
				info!("deepworm: config loaded, data_url={}", config.data_url);
				config
			}
			Err(e) => {
				warn!("deepworm: invalid config, using defaults: {}", e);
				Self::default()
			}
		}
	}
}

fn config_element_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn empty_object_is_default() {
		assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
	}

	#[test]
	fn partial_sections_keep_other_defaults() {
		let config = ViewerConfig::from_json(
			r#"{ "data_url": "/worm.csv", "theme": "dark", "zoom": { "max_scale": 8.0 }, "physics": { "charge": 80.0 } }"#,
		)
		.unwrap();
		assert_eq!(config.data_url, "/worm.csv");
		assert_eq!(config.theme, ThemeChoice::Dark);
		assert_eq!(config.zoom.max_scale, 8.0);
		assert_eq!(config.zoom.min_scale, 0.1);
		assert_eq!(config.physics.charge, 80.0);
		assert_eq!(config.physics.spring, PhysicsConfig::default().spring);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(ViewerConfig::from_json("{ data_url: ").is_err());
		assert!(ViewerConfig::from_json(r#"{ "zoom": { "step": "big" } }"#).is_err());
	}
}
