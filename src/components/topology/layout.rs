//! Deterministic column layout for the layered topology.
//!
//! Each depth gets a fixed column; nodes stack top-down in emission order
//! with bar heights proportional to their weight within the column. After
//! propagation a node's weight equals the sum of its outgoing link values
//! (1 for leaves), so the layout reads it straight off the links.

use std::collections::HashMap;

use super::types::{LAYER_COUNT, TopologyGraph};

pub const MARGIN_LEFT: f64 = 40.0;
pub const MARGIN_RIGHT: f64 = 140.0;
pub const MARGIN_TOP: f64 = 30.0;
pub const MARGIN_BOTTOM: f64 = 30.0;
pub const NODE_WIDTH: f64 = 16.0;
pub const NODE_GAP: f64 = 14.0;

const MIN_NODE_HEIGHT: f64 = 6.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

impl NodeRect {
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
	}

	pub fn center_y(&self) -> f64 {
		self.y + self.h / 2.0
	}
}

/// Node rectangles aligned index-for-index with `graph.nodes`.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	rects: Vec<NodeRect>,
	pub width: f64,
	pub height: f64,
}

fn node_weight(graph: &TopologyGraph, name: &str) -> u64 {
	let out: u64 = graph
		.links
		.iter()
		.filter(|l| l.source == name)
		.map(|l| l.value)
		.sum();
	out.max(1)
}

impl Layout {
	pub fn compute(graph: &TopologyGraph, width: f64, height: f64) -> Self {
		let usable_w = (width - MARGIN_LEFT - MARGIN_RIGHT - NODE_WIDTH).max(0.0);
		let usable_h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0);

		let mut column_total: HashMap<u8, f64> = HashMap::new();
		let mut column_count: HashMap<u8, usize> = HashMap::new();
		let weights: Vec<u64> = graph
			.nodes
			.iter()
			.map(|n| {
				let w = node_weight(graph, &n.name);
				*column_total.entry(n.depth).or_insert(0.0) += w as f64;
				*column_count.entry(n.depth).or_insert(0) += 1;
				w
			})
			.collect();

		let mut cursor: HashMap<u8, f64> = HashMap::new();
		let rects = graph
			.nodes
			.iter()
			.zip(&weights)
			.map(|(node, &weight)| {
				let count = column_count[&node.depth];
				let total = column_total[&node.depth];
				let gaps = NODE_GAP * (count.saturating_sub(1)) as f64;
				let unit = ((usable_h - gaps) / total).max(0.0);
				let h = (weight as f64 * unit).max(MIN_NODE_HEIGHT);
				let x = MARGIN_LEFT + usable_w * node.depth as f64 / (LAYER_COUNT - 1) as f64;
				let y = *cursor.entry(node.depth).or_insert(MARGIN_TOP);
				cursor.insert(node.depth, y + h + NODE_GAP);
				NodeRect {
					x,
					y,
					w: NODE_WIDTH,
					h,
				}
			})
			.collect();

		Self {
			rects,
			width,
			height,
		}
	}

	pub fn rects(&self) -> &[NodeRect] {
		&self.rects
	}

	pub fn rect(&self, idx: usize) -> Option<&NodeRect> {
		self.rects.get(idx)
	}

	/// Index of the node under the cursor, if any.
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		self.rects.iter().position(|r| r.contains(x, y))
	}
}

/// Canvas height rule carried over from the original dashboard: the tallest
/// layer sets the height, floored at 400px.
pub fn canvas_height(graph: &TopologyGraph) -> f64 {
	let mut per_depth = [0usize; LAYER_COUNT];
	for node in &graph.nodes {
		if let Some(slot) = per_depth.get_mut(node.depth as usize) {
			*slot += 1;
		}
	}
	let tallest = per_depth.iter().copied().max().unwrap_or(0);
	400.0_f64.max(tallest as f64 * 36.0 + 80.0)
}
