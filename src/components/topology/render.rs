//! Canvas drawing for the topology diagram.
//!
//! `CanvasSurface` retains what the view last pushed (graph, layout,
//! emphasis) and is drawn in full on every change. Colors and opacities
//! follow the dashboard theme: red-tinted credential layers fading to grey
//! service layers, dashed provider→adapter links.

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::{Layout, MARGIN_LEFT, MARGIN_RIGHT, NODE_WIDTH};
use super::surface::DiagramSurface;
use super::trace::PathTrace;
use super::types::{GraphLink, GraphNode, LAYER_COUNT};

pub const LAYER_LABELS: [&str; LAYER_COUNT] =
	["Vendors", "Keys", "Endpoints", "Services", "Service endpoints"];

const BACKGROUND: &str = "#1a1a2e";
const NODE_COLORS: [&str; LAYER_COUNT] = ["#ff5c5c", "#ff7a7a", "#ff9e9e", "#d4d4d8", "#f0f0f2"];
const LINK_TINTS: [&str; LAYER_COUNT] = [
	"255, 92, 92",
	"255, 92, 92",
	"212, 212, 216",
	"212, 212, 216",
	"212, 212, 216",
];
const LINK_BASE_ALPHA: [f64; LAYER_COUNT] = [0.45, 0.4, 0.4, 0.35, 0.3];

const FADED_NODE_ALPHA: f64 = 0.15;
const TRACED_LINK_ALPHA: f64 = 0.6;
const FADED_LINK_ALPHA: f64 = 0.03;

/// Retained drawing state behind the [`DiagramSurface`] seam.
#[derive(Default)]
pub struct CanvasSurface {
	nodes: Vec<GraphNode>,
	links: Vec<GraphLink>,
	layout: Layout,
	index: HashMap<String, usize>,
	emphasis: Option<PathTrace>,
}

impl DiagramSurface for CanvasSurface {
	fn set_graph(&mut self, nodes: &[GraphNode], links: &[GraphLink], layout: &Layout) {
		self.nodes = nodes.to_vec();
		self.links = links.to_vec();
		self.layout = layout.clone();
		self.index = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.name.clone(), i))
			.collect();
		self.emphasis = None;
	}

	fn set_emphasis(&mut self, trace: &PathTrace) {
		self.emphasis = Some(trace.clone());
	}

	fn clear_emphasis(&mut self) {
		self.emphasis = None;
	}
}

impl CanvasSurface {
	fn node_alpha(&self, name: &str) -> f64 {
		match &self.emphasis {
			Some(trace) if !trace.contains_node(name) => FADED_NODE_ALPHA,
			_ => 1.0,
		}
	}

	fn link_alpha(&self, idx: usize, source_depth: u8) -> f64 {
		match &self.emphasis {
			Some(trace) if trace.contains_link(idx) => TRACED_LINK_ALPHA,
			Some(_) => FADED_LINK_ALPHA,
			None => LINK_BASE_ALPHA[source_depth as usize % LAYER_COUNT],
		}
	}
}

/// Draw the full diagram.
pub fn render(surface: &CanvasSurface, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, surface.layout.width, surface.layout.height);
	draw_headers(surface, ctx);
	draw_links(surface, ctx);
	draw_nodes(surface, ctx);
}

fn draw_headers(surface: &CanvasSurface, ctx: &CanvasRenderingContext2d) {
	let usable = (surface.layout.width - MARGIN_LEFT - MARGIN_RIGHT - NODE_WIDTH).max(0.0);
	ctx.set_fill_style_str("#a1a1aa");
	ctx.set_font("500 12.5px sans-serif");
	for (i, label) in LAYER_LABELS.iter().enumerate() {
		let x = MARGIN_LEFT + usable * i as f64 / (LAYER_COUNT - 1) as f64;
		let _ = ctx.fill_text(label, x, 16.0);
	}
}

fn link_width(value: u64, max_value: u64) -> f64 {
	if max_value <= 1 {
		return 1.5;
	}
	1.5 + 6.5 * (value.saturating_sub(1)) as f64 / (max_value - 1) as f64
}

fn draw_links(surface: &CanvasSurface, ctx: &CanvasRenderingContext2d) {
	let max_value = surface.links.iter().map(|l| l.value).max().unwrap_or(1);
	let dash = js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0));
	let solid = js_sys::Array::new();

	for (idx, link) in surface.links.iter().enumerate() {
		let (Some(&si), Some(&ti)) = (
			surface.index.get(&link.source),
			surface.index.get(&link.target),
		) else {
			continue;
		};
		let (Some(src), Some(tgt)) = (surface.layout.rect(si), surface.layout.rect(ti)) else {
			continue;
		};
		let depth = surface.nodes[si].depth;

		let (x1, y1) = (src.x + src.w, src.center_y());
		let (x2, y2) = (tgt.x, tgt.center_y());
		let mid = (x1 + x2) / 2.0;

		ctx.set_stroke_style_str(&format!(
			"rgba({}, {})",
			LINK_TINTS[depth as usize % LAYER_COUNT],
			surface.link_alpha(idx, depth)
		));
		ctx.set_line_width(link_width(link.value, max_value));
		// Provider→adapter crossings stay dashed, as on the dashboard.
		let _ = ctx.set_line_dash(if depth == 2 { &dash } else { &solid });

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.bezier_curve_to(mid, y1, mid, y2, x2, y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&solid);
}

fn draw_nodes(surface: &CanvasSurface, ctx: &CanvasRenderingContext2d) {
	for (idx, node) in surface.nodes.iter().enumerate() {
		let Some(rect) = surface.layout.rect(idx) else {
			continue;
		};
		let alpha = surface.node_alpha(&node.name);

		ctx.set_global_alpha(alpha);
		ctx.set_fill_style_str(NODE_COLORS[node.depth as usize % LAYER_COUNT]);
		ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);

		ctx.set_fill_style_str("#fafafa");
		ctx.set_font("11px sans-serif");
		let _ = ctx.fill_text(&node.display_name, rect.x + rect.w + 5.0, rect.center_y() + 3.5);
		ctx.set_global_alpha(1.0);
	}
}

#[cfg(test)]
mod tests {
	use super::super::layout::Layout;
	use super::super::types::TopologyGraph;
	use super::*;

	fn surface_with(trace: Option<PathTrace>) -> CanvasSurface {
		let graph = TopologyGraph {
			nodes: vec![
				GraphNode {
					name: "v_1".into(),
					display_name: "Acme".into(),
					depth: 0,
				},
				GraphNode {
					name: "k_1".into(),
					display_name: "prod".into(),
					depth: 1,
				},
			],
			links: vec![GraphLink {
				source: "v_1".into(),
				target: "k_1".into(),
				value: 1,
			}],
		};
		let layout = Layout::compute(&graph, 900.0, 400.0);
		let mut surface = CanvasSurface::default();
		surface.set_graph(&graph.nodes, &graph.links, &layout);
		if let Some(trace) = trace {
			surface.set_emphasis(&trace);
		}
		surface
	}

	#[test]
	fn without_emphasis_everything_is_fully_opaque() {
		let surface = surface_with(None);
		assert_eq!(surface.node_alpha("v_1"), 1.0);
		assert_eq!(surface.link_alpha(0, 0), LINK_BASE_ALPHA[0]);
	}

	#[test]
	fn emphasis_fades_untraced_elements() {
		let mut trace = PathTrace::default();
		trace.nodes.insert("v_1".into());
		let surface = surface_with(Some(trace));
		assert_eq!(surface.node_alpha("v_1"), 1.0);
		assert_eq!(surface.node_alpha("k_1"), FADED_NODE_ALPHA);
		assert_eq!(surface.link_alpha(0, 0), FADED_LINK_ALPHA);
	}

	#[test]
	fn clearing_emphasis_restores_uniform_opacity() {
		let mut trace = PathTrace::default();
		trace.nodes.insert("v_1".into());
		let mut surface = surface_with(Some(trace));
		surface.clear_emphasis();
		assert_eq!(surface.node_alpha("k_1"), 1.0);
	}

	#[test]
	fn link_width_scales_with_value() {
		assert_eq!(link_width(1, 1), 1.5);
		assert_eq!(link_width(1, 5), 1.5);
		assert_eq!(link_width(5, 5), 8.0);
	}

	#[test]
	fn new_graph_resets_emphasis() {
		let mut trace = PathTrace::default();
		trace.nodes.insert("v_1".into());
		let mut surface = surface_with(Some(trace));
		let empty = TopologyGraph::default();
		let layout = Layout::compute(&empty, 900.0, 400.0);
		surface.set_graph(&empty.nodes, &empty.links, &layout);
		assert_eq!(surface.node_alpha("anything"), 1.0);
	}
}
