//! Visual theming for the connectome graph.

use serde::Deserialize;

use crate::connectome::NeuronType;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill color per neuron type.
#[derive(Clone, Debug)]
pub struct NeuronPalette {
	pub sensory: Color,
	pub interneuron: Color,
	pub motor: Color,
	pub muscle: Color,
	pub unknown: Color,
}

impl NeuronPalette {
	pub fn get(&self, kind: NeuronType) -> Color {
		match kind {
			NeuronType::Sensory => self.sensory,
			NeuronType::Interneuron => self.interneuron,
			NeuronType::Motor => self.motor,
			NeuronType::Muscle => self.muscle,
			NeuronType::Unknown => self.unknown,
		}
	}
}

impl Default for NeuronPalette {
	fn default() -> Self {
		Self {
			sensory: Color::rgb(0x00, 0xff, 0xff),
			interneuron: Color::rgb(0xff, 0x00, 0xff),
			motor: Color::rgb(0x00, 0xff, 0x2b),
			muscle: Color::rgb(0xff, 0xf4, 0x00),
			unknown: Color::rgb(0x99, 0x99, 0x99),
		}
	}
}

#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub border_color: Color,
	/// Fill a hovered node fades to.
	pub hover_fill: Color,
	pub label_color: Color,
}

#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub chemical: Color,
	pub gap_junction: Color,
}

/// Screen-space legend placement, anchored to the top-right corner.
#[derive(Clone, Debug)]
pub struct LegendStyle {
	pub inset_right: f64,
	pub top: f64,
	pub row_height: f64,
	pub dot_radius: f64,
	pub font: &'static str,
	pub text_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: Color,
	pub palette: NeuronPalette,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
	pub legend: LegendStyle,
}

impl Theme {
	/// White canvas, dark strokes (default).
	pub fn light() -> Self {
		Self {
			name: "light",
			background: Color::rgb(255, 255, 255),
			palette: NeuronPalette::default(),
			node: NodeStyle {
				border_color: Color::rgb(0x33, 0x33, 0x33),
				hover_fill: Color::rgb(0xf0, 0xf0, 0xf0),
				label_color: Color::rgb(0, 0, 0),
			},
			edge: EdgeStyle {
				chemical: Color::rgb(0x66, 0x66, 0x66),
				gap_junction: Color::rgb(0x99, 0x99, 0x99),
			},
			legend: LegendStyle {
				inset_right: 150.0,
				top: 20.0,
				row_height: 25.0,
				dot_radius: 6.0,
				font: "12px sans-serif",
				text_color: Color::rgb(0, 0, 0),
			},
		}
	}

	/// Dark slate canvas with light strokes.
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: Color::rgb(22, 27, 34),
			palette: NeuronPalette::default(),
			node: NodeStyle {
				border_color: Color::rgb(30, 35, 42),
				hover_fill: Color::rgb(0xf0, 0xf0, 0xf0),
				label_color: Color::rgba(255, 255, 255, 0.85),
			},
			edge: EdgeStyle {
				chemical: Color::rgb(140, 160, 180),
				gap_junction: Color::rgb(100, 120, 150),
			},
			legend: LegendStyle {
				text_color: Color::rgba(255, 255, 255, 0.9),
				..Self::light().legend
			},
		}
	}

	pub fn from_choice(choice: ThemeChoice) -> Self {
		match choice {
			ThemeChoice::Light => Self::light(),
			ThemeChoice::Dark => Self::dark(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

/// Theme selector used by the page configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
	#[default]
	Light,
	Dark,
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn palette_matches_type_colors() {
		let palette = NeuronPalette::default();
		assert_eq!(palette.get(NeuronType::Sensory).to_css(), "#00ffff");
		assert_eq!(palette.get(NeuronType::Interneuron).to_css(), "#ff00ff");
		assert_eq!(palette.get(NeuronType::Motor).to_css(), "#00ff2b");
		assert_eq!(palette.get(NeuronType::Muscle).to_css(), "#fff400");
		assert_eq!(palette.get(NeuronType::Unknown).to_css(), "#999999");
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(0x66, 0x66, 0x66).with_alpha(0.1).to_css(), "rgba(102, 102, 102, 0.1)");
		let mid = Color::rgb(0, 0, 0).lerp(Color::rgb(200, 100, 50), 0.5);
		assert_eq!(mid, Color::rgb(100, 50, 25));
	}

	#[test]
	fn choice_selects_theme() {
		assert_eq!(Theme::from_choice(ThemeChoice::Dark).name, "dark");
		assert_eq!(Theme::from_choice(ThemeChoice::default()).name, "light");
	}
}
