//! Zoom-dependent sizing for graph visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: graph coordinates. Drawn after the canvas transform, so
//!   world-space sizes grow when zooming in.
//! - **Screen-space**: canvas pixels, unaffected by zoom.
//!
//! Node radii and edge widths come from the data (degree and connection
//! count) and live in world-space; this module decides how strokes, labels,
//! hit targets and dashes follow the zoom level `k`.

/// How a size follows the zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size.
	World,
	/// Constant screen-space size (pixels).
	Screen,
	/// World-space size, clamped to `min_screen..=max_screen` pixels.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// How an opacity follows the zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	Constant,
	/// Zero at or below `zero_alpha_k`, full at or above `full_alpha_k`.
	Fade {
		zero_alpha_k: f64,
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Radius added to `sqrt(degree)`.
	pub base_radius: f64,
	pub border_width: f64,
	pub hover_border_width: f64,
	pub border_behavior: ScaleBehavior,
	/// Extra slack around a node for hit detection.
	pub hit_slop: f64,
	pub hit_behavior: ScaleBehavior,
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
	/// Label offset from the node centre, in world units.
	pub label_offset: (f64, f64),
	pub label_alpha_behavior: AlphaBehavior,
}

#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Gap junction dash pattern (dash, gap) in world units.
	pub dash_pattern: (f64, f64),
	pub width_behavior: ScaleBehavior,
}

/// Complete scale configuration.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				base_radius: 3.0,
				border_width: 1.5,
				hover_border_width: 3.0,
				border_behavior: ScaleBehavior::World,
				hit_slop: 2.0,
				hit_behavior: ScaleBehavior::Screen,
				label_size: 8.0,
				label_behavior: ScaleBehavior::World,
				label_offset: (12.0, 4.0),
				label_alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.3,
					full_alpha_k: 0.6,
				},
			},
			edge: EdgeScaleConfig {
				dash_pattern: (5.0, 5.0),
				width_behavior: ScaleBehavior::Clamped {
					min_screen: 0.5,
					max_screen: f64::INFINITY,
				},
			},
		}
	}
}

impl ScaleConfig {
	/// World-space node radius for a given degree.
	pub fn node_radius(&self, degree: u64) -> f64 {
		(degree as f64).sqrt() + self.node.base_radius
	}
}

/// Scale values for one zoom level, computed once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub border_width: f64,
	pub hover_border_width: f64,
	pub hit_slop: f64,
	/// Canvas font string, e.g. `"8px sans-serif"`.
	pub label_font: String,
	pub label_alpha: f64,
	pub label_offset: (f64, f64),
	pub dash_pattern: (f64, f64),
	edge_width_behavior: ScaleBehavior,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node = &config.node;
		let label_size = node.label_behavior.apply(node.label_size, k);
		Self {
			k,
			border_width: node.border_behavior.apply(node.border_width, k),
			hover_border_width: node.border_behavior.apply(node.hover_border_width, k),
			hit_slop: node.hit_behavior.apply(node.hit_slop, k),
			label_font: format!("{}px sans-serif", label_size),
			label_alpha: node.label_alpha_behavior.apply(k),
			label_offset: node.label_offset,
			dash_pattern: config.edge.dash_pattern,
			edge_width_behavior: config.edge.width_behavior.clone(),
		}
	}

	/// World-space stroke width for an edge with `connections` synapses.
	pub fn edge_width(&self, connections: u32) -> f64 {
		self.edge_width_behavior
			.apply((connections as f64).sqrt(), self.k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn behaviors() {
		assert_eq!(ScaleBehavior::World.apply(4.0, 2.0), 4.0);
		assert_eq!(ScaleBehavior::Screen.apply(4.0, 2.0), 2.0);
		let clamped = ScaleBehavior::Clamped {
			min_screen: 1.0,
			max_screen: 10.0,
		};
		// 0.1 world units at k=2 is 0.2px, raised to 1px => 0.5 world
		assert_eq!(clamped.apply(0.1, 2.0), 0.5);
		assert_eq!(clamped.apply(3.0, 2.0), 3.0);
		assert_eq!(clamped.apply(30.0, 2.0), 5.0);
	}

	#[test]
	fn label_fade() {
		let fade = AlphaBehavior::Fade {
			zero_alpha_k: 0.3,
			full_alpha_k: 0.6,
		};
		assert_eq!(fade.apply(0.1), 0.0);
		assert!((fade.apply(0.45) - 0.5).abs() < 1e-9);
		assert_eq!(fade.apply(4.0), 1.0);
		assert_eq!(AlphaBehavior::Constant.apply(0.01), 1.0);
	}

	#[test]
	fn radius_and_width_follow_data() {
		let config = ScaleConfig::default();
		assert_eq!(config.node_radius(0), 3.0);
		assert_eq!(config.node_radius(16), 7.0);
		let scaled = ScaledValues::new(&config, 1.0);
		assert_eq!(scaled.edge_width(9), 3.0);
		assert_eq!(scaled.label_font, "8px sans-serif");
		// thin edges stay at least half a pixel wide when zoomed out
		let far = ScaledValues::new(&config, 0.1);
		assert!((far.edge_width(1) - 5.0).abs() < 1e-9);
	}
}
