//! Component-owned topology state and interaction routing.
//!
//! One `TopologyView` is built per completed snapshot load and replaces the
//! previous one wholesale; hover and click handlers read it instead of any
//! module-level state. While a load is in flight the stale view keeps
//! handling hover, which is an accepted staleness window.

use super::build::build_graph;
use super::filter::{FilterSelection, filter_for_node};
use super::layout::{Layout, canvas_height};
use super::snapshot::Snapshot;
use super::surface::DiagramSurface;
use super::trace::trace_full_path;
use super::types::TopologyGraph;

pub struct TopologyView {
	graph: TopologyGraph,
	layout: Layout,
	hovered: Option<String>,
}

impl TopologyView {
	/// Build the graph and its layout from a snapshot. One synchronous pass;
	/// the caller presents the result to a surface afterwards.
	pub fn new(snapshot: &Snapshot, width: f64) -> Self {
		let graph = build_graph(snapshot);
		let height = canvas_height(&graph);
		let layout = Layout::compute(&graph, width, height);
		Self {
			graph,
			layout,
			hovered: None,
		}
	}

	pub fn graph(&self) -> &TopologyGraph {
		&self.graph
	}

	pub fn height(&self) -> f64 {
		self.layout.height
	}

	/// Push the current graph to a surface.
	pub fn present(&self, surface: &mut impl DiagramSurface) {
		surface.set_graph(&self.graph.nodes, &self.graph.links, &self.layout);
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Node name under the cursor, if any.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&str> {
		self.layout
			.node_at(x, y)
			.and_then(|idx| self.graph.nodes.get(idx))
			.map(|n| n.name.as_str())
	}

	/// Update hover state; traces the full path on enter, clears emphasis on
	/// leave. No-op while the hovered node is unchanged.
	pub fn hover(&mut self, node: Option<&str>, surface: &mut impl DiagramSurface) {
		if self.hovered.as_deref() == node {
			return;
		}
		self.hovered = node.map(str::to_string);
		match node {
			Some(name) => {
				let trace = trace_full_path(name, &self.graph);
				surface.set_emphasis(&trace);
			}
			None => surface.clear_emphasis(),
		}
	}

	/// Translate a click into a dashboard filter.
	pub fn click(&self, name: &str) -> Option<FilterSelection> {
		let node = self.graph.node(name)?;
		filter_for_node(&node.name, &node.display_name)
	}
}
