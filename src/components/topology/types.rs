/// Layer depths for the five-layer topology.
pub const DEPTH_VENDOR: u8 = 0;
pub const DEPTH_KEY: u8 = 1;
pub const DEPTH_PROVIDER: u8 = 2;
pub const DEPTH_ADAPTER: u8 = 3;
pub const DEPTH_SERVICE: u8 = 4;

/// Number of layers in the topology (vendor → key → provider → adapter → service).
pub const LAYER_COUNT: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Layer-prefixed identifier, unique across layers (`v_1`, `k_10`, `s_a1_chat`, ...).
	pub name: String,
	pub display_name: String,
	pub depth: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub value: u64,
}

/// The whole graph is rebuilt from scratch on every topology load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopologyGraph {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl TopologyGraph {
	pub fn node(&self, name: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.name == name)
	}
}
