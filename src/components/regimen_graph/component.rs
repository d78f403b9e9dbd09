use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::interaction::GraphEvent;
use super::layout::{CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, LayoutConfig};
use super::render;
use super::state::{RegimenGraphState, ViewRetention};
use super::types::{GraphData, Point};
use super::viewport::{IdentityMapper, ViewportMapper};

/// Client pixels to canvas logical units for the canvas as currently laid out.
struct CanvasMapper {
	left: f64,
	top: f64,
	scale_x: f64,
	scale_y: f64,
}

impl CanvasMapper {
	fn for_canvas(canvas: &HtmlCanvasElement) -> Self {
		let rect = canvas.get_bounding_client_rect();
		let ratio = |logical: u32, css: f64| if css > 0.0 { logical as f64 / css } else { 1.0 };
		Self {
			left: rect.left(),
			top: rect.top(),
			scale_x: ratio(canvas.width(), rect.width()),
			scale_y: ratio(canvas.height(), rect.height()),
		}
	}
}

impl ViewportMapper for CanvasMapper {
	fn to_surface(&self, screen: Point) -> Point {
		Point::new(
			(screen.x - self.left) * self.scale_x,
			(screen.y - self.top) * self.scale_y,
		)
	}
}

fn client_point(ev: &MouseEvent) -> Point {
	Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

/// Shared handle to the view state and the 2D context it paints into.
#[derive(Clone, Default)]
struct Surface {
	state: Rc<RefCell<Option<RegimenGraphState>>>,
	ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>>,
}

impl Surface {
	fn commit<M: ViewportMapper>(&self, event: GraphEvent, mapper: &M) {
		{
			let mut slot = self.state.borrow_mut();
			let Some(state) = slot.take() else {
				return;
			};
			*slot = Some(state.apply(event, mapper));
		}
		self.redraw();
	}

	fn redraw(&self) {
		let (state, ctx) = (self.state.borrow(), self.ctx.borrow());
		if let (Some(s), Some(ctx)) = (state.as_ref(), ctx.as_ref()) {
			render::render(&s.scene(), &s.transform, ctx, s.config.width, s.config.height);
		}
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	match canvas.get_context("2d") {
		Ok(Some(ctx)) => ctx.dyn_into().ok(),
		_ => {
			warn!("canvas 2d context unavailable");
			None
		}
	}
}

#[component]
pub fn RegimenGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into, default = Signal::stored(DEFAULT_CANVAS_HEIGHT))] height: Signal<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let surface = Surface::default();
	let (is_empty, set_is_empty) = signal(true);

	let surface_init = surface.clone();
	Effect::new(move |_| {
		let (data, height) = (data.get(), height.get());
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(CANVAS_WIDTH as u32);
		canvas.set_height(height as u32);
		if surface_init.ctx.borrow().is_none() {
			*surface_init.ctx.borrow_mut() = context_2d(&canvas);
		}

		{
			let mut slot = surface_init.state.borrow_mut();
			let next = match slot.take() {
				Some(mut prev) => {
					prev.config.height = height;
					prev.with_dataset(&data, ViewRetention::Preserve)
				}
				None => RegimenGraphState::new(&data, LayoutConfig::with_height(height)),
			};
			set_is_empty.set(next.is_empty());
			*slot = Some(next);
		}
		surface_init.redraw();
	});

	let mapper = move || {
		canvas_ref.get().map(|canvas| {
			let canvas: HtmlCanvasElement = canvas.into();
			CanvasMapper::for_canvas(&canvas)
		})
	};

	let surface_md = surface.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(m) = mapper() {
			surface_md.commit(GraphEvent::PointerDown(client_point(&ev)), &m);
		}
	};

	let surface_mm = surface.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(m) = mapper() {
			surface_mm.commit(GraphEvent::PointerMove(client_point(&ev)), &m);
		}
	};

	let surface_mu = surface.clone();
	let on_mouseup = move |_: MouseEvent| surface_mu.commit(GraphEvent::PointerUp, &IdentityMapper);

	let surface_ml = surface.clone();
	let on_mouseleave =
		move |_: MouseEvent| surface_ml.commit(GraphEvent::PointerLeave, &IdentityMapper);

	let surface_wh = surface.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		surface_wh.commit(
			GraphEvent::Wheel {
				delta_y: ev.delta_y(),
			},
			&IdentityMapper,
		);
	};

	let (surface_zi, surface_zo, surface_rs) = (surface.clone(), surface.clone(), surface);

	view! {
		<div
			class="regimen-graph"
			style=move || {
				format!(
					"position: relative; width: 100%; display: {};",
					if is_empty.get() { "none" } else { "block" },
				)
			}
		>
			<div class="regimen-graph-toolbar">
				<button
					title="Zoom In"
					on:click=move |_| surface_zi.commit(GraphEvent::ZoomIn, &IdentityMapper)
				>
					"+"
				</button>
				<button
					title="Zoom Out"
					on:click=move |_| surface_zo.commit(GraphEvent::ZoomOut, &IdentityMapper)
				>
					"-"
				</button>
				<button
					title="Reset"
					on:click=move |_| surface_rs.commit(GraphEvent::Reset, &IdentityMapper)
				>
					"Reset"
				</button>
			</div>
			<div class="regimen-graph-legend">
				<div class="regimen-graph-legend-title">"INTERACTIVE MODE"</div>
				<div>"• Drag nodes"</div>
				<div>"• Hover to focus"</div>
				<div>"• Scroll to zoom"</div>
			</div>
			<canvas
				node_ref=canvas_ref
				class="regimen-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; width: 100%; cursor: move;"
			/>
		</div>
	}
}
