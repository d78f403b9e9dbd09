use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::highlight::{EdgeVisual, GLOW_OPACITY, NodeVisual, Scene};
use super::viewport::ViewportTransform;

const BACKGROUND: &str = "#f8fafc";
const CONDITION_LABEL_COLOR: &str = "#0f172a";
const DRUG_LABEL_COLOR: &str = "#475569";

pub fn render(
	scene: &Scene,
	transform: &ViewportTransform,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	if scene.is_empty() {
		return;
	}
	ctx.save();
	let _ = ctx.translate(transform.offset_x, transform.offset_y);
	let _ = ctx.scale(transform.scale(), transform.scale());
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	for edge in &scene.edges {
		draw_edge(edge, ctx);
	}
	for node in &scene.nodes {
		draw_node(node, ctx);
	}
	ctx.restore();
}

fn draw_edge(edge: &EdgeVisual, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(edge.style.opacity);
	ctx.set_stroke_style_str(edge.style.stroke);
	ctx.set_line_width(edge.style.width);
	ctx.begin_path();
	ctx.move_to(edge.from.x, edge.from.y);
	ctx.line_to(edge.to.x, edge.to.y);
	ctx.stroke();
	ctx.set_global_alpha(1.0);
}

fn draw_node(node: &NodeVisual, ctx: &CanvasRenderingContext2d) {
	let (x, y) = (node.position.x, node.position.y);

	if let Some(glow_radius) = node.glow_radius {
		ctx.set_global_alpha(node.opacity * GLOW_OPACITY);
		ctx.begin_path();
		let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();
	}

	ctx.set_global_alpha(node.opacity);
	ctx.begin_path();
	let _ = ctx.arc(x, y, node.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(node.color);
	ctx.fill();

	if let Some(label) = &node.label {
		let (size, color) = if label.emphasized {
			(14.0, CONDITION_LABEL_COLOR)
		} else {
			(12.0, DRUG_LABEL_COLOR)
		};
		ctx.set_font(&format!("bold {size}px sans-serif"));
		ctx.set_text_align("center");
		// Halo keeps labels readable over edges.
		ctx.set_stroke_style_str("rgba(255, 255, 255, 1)");
		ctx.set_line_width(4.0);
		let text = label.text.to_uppercase();
		let _ = ctx.stroke_text(&text, label.anchor.x, label.anchor.y);
		ctx.set_fill_style_str(color);
		let _ = ctx.fill_text(&text, label.anchor.x, label.anchor.y);
	}
	ctx.set_global_alpha(1.0);
}
