//! The capability seam between topology logic and whatever draws it.

use super::layout::Layout;
use super::trace::PathTrace;
use super::types::{GraphLink, GraphNode};

/// What the topology view needs from a rendering surface. The canvas
/// component implements this for real; tests substitute a recording stub so
/// graph construction and interaction run without a browser.
pub trait DiagramSurface {
	/// Replace the displayed graph wholesale. Called once per completed load.
	fn set_graph(&mut self, nodes: &[GraphNode], links: &[GraphLink], layout: &Layout);
	/// Emphasize the traced subgraph: traced elements at full opacity,
	/// everything else faded.
	fn set_emphasis(&mut self, trace: &PathTrace);
	/// Restore uniform opacity for all elements.
	fn clear_emphasis(&mut self);
}
