//! Canvas rendering for the connectome graph.
//!
//! Passes, back to front:
//! 1. Background (screen space)
//! 2. Edges, then nodes, then labels (world space)
//! 3. Legend (screen space)

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::ForceGraphState;
use super::theme::Theme;
use crate::connectome::NeuronType;

/// Attempt to smooth values that would otherwise cause abrupt visual changes.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);
	if scale.label_alpha > 0.01 {
		draw_labels(state, ctx, &scale, theme);
	}

	ctx.restore();

	draw_legend(ctx, state.width, theme);
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let positions = state.positions();
	let dash = js_sys::Array::of2(
		&JsValue::from_f64(scale.dash_pattern.0),
		&JsValue::from_f64(scale.dash_pattern.1),
	);
	let solid = js_sys::Array::new();

	for edge in &state.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		if (x2 - x1).abs() + (y2 - y1).abs() < 0.001 {
			continue;
		}

		let color = if edge.gap_junction {
			theme.edge.gap_junction
		} else {
			theme.edge.chemical
		};
		ctx.set_stroke_style_str(&color.with_alpha(color.a * edge.opacity).to_css());
		ctx.set_line_width(scale.edge_width(edge.connections));
		let _ = ctx.set_line_dash(if edge.gap_junction { &dash } else { &solid });

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}

	let _ = ctx.set_line_dash(&solid);
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let border = theme.node.border_color.to_css();

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let t = smooth_step(state.hover.intensity(node.index()));

		let fill = theme.palette.get(info.kind).lerp(theme.node.hover_fill, t);
		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&fill.to_css());
		ctx.fill();

		ctx.set_stroke_style_str(&border);
		ctx.set_line_width(
			scale.border_width + (scale.hover_border_width - scale.border_width) * t,
		);
		ctx.stroke();
	});
}

fn draw_labels(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let color = theme.node.label_color;
	ctx.set_fill_style_str(&color.with_alpha(color.a * scale.label_alpha).to_css());
	ctx.set_font(&scale.label_font);
	let (dx, dy) = scale.label_offset;

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let _ = ctx.fill_text(&node.data.user_data.id, x + dx, y + dy);
	});
}

fn draw_legend(ctx: &CanvasRenderingContext2d, width: f64, theme: &Theme) {
	let legend = &theme.legend;
	let x = width - legend.inset_right;
	let border = theme.node.border_color.to_css();
	let text = legend.text_color.to_css();

	ctx.set_font(legend.font);
	let entries = NeuronType::ALL
		.into_iter()
		.filter(|kind| *kind != NeuronType::Unknown);
	for (i, kind) in entries.enumerate() {
		let y = legend.top + i as f64 * legend.row_height;

		ctx.begin_path();
		let _ = ctx.arc(x, y, legend.dot_radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&theme.palette.get(kind).to_css());
		ctx.fill();
		ctx.set_stroke_style_str(&border);
		ctx.set_line_width(1.0);
		ctx.stroke();

		ctx.set_fill_style_str(&text);
		let _ = ctx.fill_text(kind.name(), x + 15.0, y + 5.0);
	}
}
