//! Leptos component wrapping the connectome canvas.
//!
//! The component creates a canvas sized to its parent and wires up mouse and
//! wheel handlers for node dragging, panning, zooming and hover. An animation
//! loop runs via `requestAnimationFrame`, stepping the simulation and
//! redrawing each frame. Zoom buttons are overlaid on the canvas.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::{ForceGraphState, NodeSummary, frame_elapsed};
use super::theme::Theme;
use crate::config::ViewerConfig;
use crate::connectome::{Connectome, NeurotransmitterFilter};

/// Fixed physics step per animation frame, in seconds. Zoom and hover
/// animations use the real frame interval instead.
const FRAME_DT: f32 = 0.016;

/// Bundles graph simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

fn parent_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	let measure = |f: fn(&web_sys::Element) -> i32, fallback: f64| {
		parent
			.as_ref()
			.map(|p| f(p) as f64)
			.filter(|v| *v > 0.0)
			.unwrap_or(fallback)
	};
	(
		width.unwrap_or_else(|| measure(web_sys::Element::client_width, 800.0)),
		height.unwrap_or_else(|| measure(web_sys::Element::client_height, 600.0)),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Pointer position relative to the canvas.
fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut(f64)>) {
	if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		error!("deepworm: requestAnimationFrame failed: {:?}", e);
	}
}

/// Renders the connectome as an interactive force-directed graph.
///
/// `filter` only changes edge opacity; the layout keeps running undisturbed.
/// `on_hover` fires whenever the hovered node changes, with `None` when the
/// pointer leaves all nodes.
#[component]
pub fn ForceGraphCanvas(
	connectome: Arc<Connectome>,
	#[prop(into)] filter: Signal<NeurotransmitterFilter>,
	on_hover: Callback<Option<NodeSummary>>,
	#[prop(default = ViewerConfig::default())] config: ViewerConfig,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("deepworm: no window, canvas not started");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			error!("deepworm: canvas 2d context unavailable");
			return;
		};

		let (w, h) = parent_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let scale = ScaleConfig::default();
		let mut state =
			ForceGraphState::new(&connectome, w, h, &config.physics, &config.zoom, &scale);
		state.apply_filter(&filter.get_untracked());
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			scale,
			theme: Theme::from_choice(config.theme),
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let last_frame = Rc::new(Cell::new(None));
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			let elapsed = frame_elapsed(last_frame.get(), now);
			last_frame.set(Some(now));
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.step_layout(FRAME_DT);
				c.state.animate(elapsed);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				request_frame(&win, cb);
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			request_frame(&window, cb);
		}
	});

	let context_filter = context.clone();
	Effect::new(move |_| {
		let current = filter.get();
		if let Some(ref mut c) = *context_filter.borrow_mut() {
			c.state.apply_filter(&current);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			match c.state.node_at_position(x, y, &c.scale) {
				Some(idx) => c.state.begin_drag(idx, x, y),
				None => c.state.begin_pan(x, y),
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let hover_changed = {
			let mut guard = context_mm.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			let mut changed = None;
			if c.state.drag.active {
				c.state.drag_to(x, y);
			} else {
				let hovered = c.state.node_at_position(x, y, &c.scale);
				if c.state.set_hover(hovered) {
					changed = Some(c.state.hovered_summary());
				}
				c.state.pan_to(x, y);
			}
			changed
		};
		// borrow released before notifying, the callback may re-enter
		if let Some(summary) = hover_changed {
			on_hover.run(summary);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.end_drag();
			c.state.end_pan();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let cleared = match *context_ml.borrow_mut() {
			Some(ref mut c) => {
				c.state.end_drag();
				c.state.end_pan();
				c.state.set_hover(None)
			}
			None => false,
		};
		if cleared {
			on_hover.run(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.wheel_zoom(x, y, ev.delta_y());
		}
	};

	let zoom_action = move |action: fn(&mut ForceGraphState)| {
		let context = context.clone();
		move |_: MouseEvent| {
			if let Some(ref mut c) = *context.borrow_mut() {
				action(&mut c.state);
			}
		}
	};

	view! {
		<div class="force-graph" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="zoom-controls" style="position: absolute; left: 20px; bottom: 20px;">
				<button class="zoom-in" title="Zoom in" on:click=zoom_action(ForceGraphState::zoom_in)>
					"+"
				</button>
				<button class="zoom-out" title="Zoom out" on:click=zoom_action(ForceGraphState::zoom_out)>
					"−"
				</button>
				<button class="zoom-reset" title="Reset zoom" on:click=zoom_action(ForceGraphState::reset_zoom)>
					"Reset"
				</button>
			</div>
		</div>
	}
}
