//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-neuron metadata, view
//! transforms for pan/zoom, simulation cooling, and hover state with smooth
//! intensity transitions.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use crate::config::{PhysicsConfig, ZoomConfig};
use crate::connectome::{Connectome, NeuronType, NeurotransmitterFilter};

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	pub kind: NeuronType,
	pub degree: u64,
	/// World-space radius, `sqrt(degree) + base`.
	pub radius: f64,
}

/// A drawable edge. Kept beside the physics graph so styling data and
/// self-loops survive even though the simulation only needs topology.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub gap_junction: bool,
	pub connections: u32,
	pub neurotransmitter: String,
	pub opacity: f64,
}

/// What the side panel shows for a hovered node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSummary {
	pub id: String,
	pub kind: NeuronType,
	pub degree: u64,
}

/// Pan and zoom transform applied to the whole graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl ViewTransform {
	/// Identity view: graph origin at the canvas centre, no zoom.
	pub fn home(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Scale by `factor` keeping screen point `(sx, sy)` fixed.
	pub fn scale_about(&self, sx: f64, sy: f64, factor: f64, zoom: &ZoomConfig) -> Self {
		let k = (self.k * factor).clamp(zoom.min_scale, zoom.max_scale);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}
}

/// Animated move between two view transforms.
///
/// Interpolates the graph point under the viewport centre linearly and the
/// scale geometrically, so a pure zoom keeps the centre fixed throughout.
#[derive(Clone, Debug)]
pub struct ZoomTransition {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

fn ease_cubic_in_out(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

impl ZoomTransition {
	pub fn new(from: ViewTransform, to: ViewTransform, duration: f64) -> Self {
		Self {
			from,
			to,
			elapsed: 0.0,
			duration,
		}
	}

	pub fn target(&self) -> ViewTransform {
		self.to
	}

	/// Transform at eased progress `t` for a viewport of the given size.
	pub fn at(&self, t: f64, width: f64, height: f64) -> ViewTransform {
		let (cx, cy) = (width / 2.0, height / 2.0);
		let (fx, fy) = self.from.screen_to_graph(cx, cy);
		let (tx, ty) = self.to.screen_to_graph(cx, cy);
		let k = self.from.k * (self.to.k / self.from.k).powf(t);
		let (gx, gy) = (fx + (tx - fx) * t, fy + (ty - fy) * t);
		ViewTransform {
			x: cx - gx * k,
			y: cy - gy * k,
			k,
		}
	}

	/// Advance by `dt` seconds. Returns the current transform and whether the
	/// transition has finished.
	pub fn advance(&mut self, dt: f64, width: f64, height: f64) -> (ViewTransform, bool) {
		self.elapsed += dt;
		if self.duration <= 0.0 || self.elapsed >= self.duration {
			return (self.to, true);
		}
		let t = ease_cubic_in_out(self.elapsed / self.duration);
		(self.at(t, width, height), false)
	}
}

/// Simulation energy. The layout steps while running and stops once alpha
/// decays below `alpha_min`.
#[derive(Clone, Debug)]
pub struct Cooling {
	pub alpha: f64,
	pub alpha_target: f64,
	decay: f64,
	min: f64,
	running: bool,
}

impl Cooling {
	pub fn new(physics: &PhysicsConfig) -> Self {
		Self {
			alpha: 1.0,
			alpha_target: 0.0,
			decay: physics.alpha_decay,
			min: physics.alpha_min,
			running: true,
		}
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Advance one tick. Returns whether the simulation should step.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.decay;
		if self.alpha < self.min {
			self.running = false;
		}
		true
	}

	/// Hold energy at `target` and restart.
	pub fn reheat(&mut self, target: f64) {
		self.alpha_target = target;
		self.running = true;
	}

	/// Let the simulation cool down again.
	pub fn release(&mut self) {
		self.alpha_target = 0.0;
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Hovered node plus per-node intensity for eased hover styling.
///
/// Intensity approaches 1.0 while a node is hovered and decays after, using
/// exponential smoothing so transitions slow down near their target.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub hovered: Option<DefaultNodeIdx>,
	intensity: HashMap<DefaultNodeIdx, f64>,
}

impl HoverState {
	const FADE_IN_SPEED: f64 = 6.0;
	const FADE_OUT_SPEED: f64 = 4.0;

	/// Returns whether the hovered node changed.
	pub fn set(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	pub fn tick(&mut self, dt: f64) {
		let fade_in = 1.0 - (-Self::FADE_IN_SPEED * dt).exp();
		let fade_out = (-Self::FADE_OUT_SPEED * dt).exp();
		if let Some(idx) = self.hovered {
			let value = self.intensity.entry(idx).or_insert(0.0);
			*value += (1.0 - *value) * fade_in;
		}
		let hovered = self.hovered;
		self.intensity.retain(|idx, value| {
			if hovered == Some(*idx) {
				return true;
			}
			*value *= fade_out;
			*value > 0.005
		});
	}

	pub fn intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.intensity.get(&idx).copied().unwrap_or(0.0)
	}
}

/// Seconds between two `requestAnimationFrame` timestamps (milliseconds).
///
/// The first frame counts as one 60 Hz frame; long gaps such as a hidden
/// tab are capped at 100 ms so transitions resume instead of jumping.
pub fn frame_elapsed(previous_ms: Option<f64>, now_ms: f64) -> f64 {
	match previous_ms {
		Some(previous) => ((now_ms - previous) / 1000.0).clamp(0.0, 0.1),
		None => 1.0 / 60.0,
	}
}

/// Initial placement on a phyllotaxis spiral around the origin, so no two
/// nodes start on top of each other.
pub fn phyllotaxis(i: usize) -> (f32, f32) {
	let radius = 10.0 * (0.5 + i as f64).sqrt();
	let angle = i as f64 * PI * (3.0 - 5f64.sqrt());
	((radius * angle.cos()) as f32, (radius * angle.sin()) as f32)
}

/// Heavier hubs repel harder, spacing them out like a collision radius.
fn node_mass(degree: u64) -> f32 {
	10.0 + (degree as f32).sqrt()
}

/// Mean of a set of points, or `None` when empty.
pub fn centroid(points: impl IntoIterator<Item = (f32, f32)>) -> Option<(f32, f32)> {
	let (mut sx, mut sy, mut n) = (0.0f64, 0.0f64, 0usize);
	for (x, y) in points {
		sx += x as f64;
		sy += y as f64;
		n += 1;
	}
	(n > 0).then(|| ((sx / n as f64) as f32, (sy / n as f64) as f32))
}

/// Core graph state combining physics simulation with interaction tracking.
///
/// Created once when the canvas mounts, then mutated by event handlers and
/// the animation loop.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub cooling: Cooling,
	pub width: f64,
	pub height: f64,
	transition: Option<ZoomTransition>,
	physics: PhysicsConfig,
	zoom: ZoomConfig,
}

impl ForceGraphState {
	pub fn new(
		connectome: &Connectome,
		width: f64,
		height: f64,
		physics: &PhysicsConfig,
		zoom: &ZoomConfig,
		scale: &ScaleConfig,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: physics.charge,
			force_spring: physics.spring,
			force_max: physics.max_force,
			node_speed: physics.node_speed,
			damping_factor: physics.damping,
		});

		let indices: Vec<DefaultNodeIdx> = connectome
			.nodes
			.iter()
			.enumerate()
			.map(|(i, neuron)| {
				let (x, y) = phyllotaxis(i);
				graph.add_node(NodeData {
					x,
					y,
					mass: node_mass(neuron.degree),
					is_anchor: false,
					user_data: NodeInfo {
						id: neuron.id.clone(),
						kind: neuron.kind,
						degree: neuron.degree,
						radius: scale.node_radius(neuron.degree),
					},
				})
			})
			.collect();

		let mut edges = Vec::with_capacity(connectome.edges.len());
		for edge in &connectome.edges {
			let (source, target) = (indices[edge.source], indices[edge.target]);
			// zero-length springs have no direction
			if source != target {
				graph.add_edge(source, target, EdgeData::default());
			}
			edges.push(EdgeInfo {
				source,
				target,
				gap_junction: edge.synapse.is_gap_junction(),
				connections: edge.connections,
				neurotransmitter: edge.neurotransmitter.clone(),
				opacity: NeurotransmitterFilter::All.opacity(&edge.neurotransmitter),
			});
		}

		Self {
			graph,
			edges,
			transform: ViewTransform::home(width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			cooling: Cooling::new(physics),
			width,
			height,
			transition: None,
			physics: physics.clone(),
			zoom: zoom.clone(),
		}
	}

	/// Recompute edge opacities. Nodes and edges are left in place.
	pub fn apply_filter(&mut self, filter: &NeurotransmitterFilter) {
		for edge in &mut self.edges {
			edge.opacity = filter.opacity(&edge.neurotransmitter);
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.screen_to_graph(sx, sy)
	}

	/// Topmost node under a screen point.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit_radius = node.data.user_data.radius + scale.hit_slop;
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn summary(&self, idx: DefaultNodeIdx) -> Option<NodeSummary> {
		let mut summary = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				let info = &node.data.user_data;
				summary = Some(NodeSummary {
					id: info.id.clone(),
					kind: info.kind,
					degree: info.degree,
				});
			}
		});
		summary
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		self.hover.set(node)
	}

	pub fn hovered_summary(&self) -> Option<NodeSummary> {
		self.hover.hovered.and_then(|idx| self.summary(idx))
	}

	/// Pin `idx` under the pointer and warm the simulation up.
	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: x,
			start_y: y,
			..DragState::default()
		};
		let drag = &mut self.drag;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				drag.node_start_x = node.x();
				drag.node_start_y = node.y();
				node.data.is_anchor = true;
			}
		});
		self.cooling.reheat(self.physics.drag_alpha_target);
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) else {
			return;
		};
		let (dx, dy) = (
			(x - self.drag.start_x) / self.transform.k,
			(y - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// Release the dragged node back to the simulation.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
			self.cooling.release();
		}
		self.drag = DragState::default();
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.transition = None;
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zoom one wheel notch about the cursor.
	pub fn wheel_zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		// horizontal-only scroll
		if delta_y == 0.0 {
			return;
		}
		let factor = if delta_y > 0.0 {
			1.0 / self.zoom.wheel_step
		} else {
			self.zoom.wheel_step
		};
		self.transition = None;
		self.transform = self.transform.scale_about(x, y, factor, &self.zoom);
	}

	/// Animated zoom about the viewport centre. Repeated calls compound on
	/// the pending target.
	pub fn zoom_by(&mut self, factor: f64) {
		let base = self
			.transition
			.as_ref()
			.map(ZoomTransition::target)
			.unwrap_or(self.transform);
		let target = base.scale_about(self.width / 2.0, self.height / 2.0, factor, &self.zoom);
		self.animate_to(target);
	}

	pub fn zoom_in(&mut self) {
		self.zoom_by(self.zoom.step);
	}

	pub fn zoom_out(&mut self) {
		self.zoom_by(1.0 / self.zoom.step);
	}

	/// Animated return to the home view.
	pub fn reset_zoom(&mut self) {
		self.animate_to(ViewTransform::home(self.width, self.height));
	}

	fn animate_to(&mut self, target: ViewTransform) {
		self.transition = Some(ZoomTransition::new(
			self.transform,
			target,
			self.zoom.transition_ms / 1000.0,
		));
	}

	pub fn is_transitioning(&self) -> bool {
		self.transition.is_some()
	}

	/// Shift free nodes so their centroid sits at the origin.
	fn recenter(&mut self) {
		let mut free = Vec::new();
		self.graph.visit_nodes(|node| {
			if !node.data.is_anchor {
				free.push((node.x(), node.y()));
			}
		});
		let Some((cx, cy)) = centroid(free) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x -= cx;
				node.data.y -= cy;
			}
		});
	}

	pub fn tick(&mut self, dt: f32) {
		self.step_layout(dt);
		self.animate(dt as f64);
	}

	/// One physics step, skipped once the layout has cooled.
	pub fn step_layout(&mut self, dt: f32) {
		if self.cooling.step() {
			self.graph.update(dt);
			self.recenter();
		}
	}

	/// Advance hover fades and zoom transitions by `elapsed` wall-clock
	/// seconds.
	pub fn animate(&mut self, elapsed: f64) {
		self.hover.tick(elapsed);
		if let Some(transition) = &mut self.transition {
			let (transform, done) = transition.advance(elapsed, self.width, self.height);
			self.transform = transform;
			if done {
				self.transition = None;
			}
		}
	}

	/// Node positions by index, for drawing edges.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	/// Resize the viewport, keeping the view centred on the same graph point.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
