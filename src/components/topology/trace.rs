//! Full-path tracing for hover highlighting.
//!
//! From a hovered node, walk the reverse adjacency to every ancestor and the
//! forward adjacency to every descendant, collecting the nodes and the link
//! indices on any traced path. The traversal carries a visited set per
//! direction, so it terminates even if it were handed a cyclic link set; on
//! the layered graphs construction produces it simply never revisits.

use std::collections::{HashMap, HashSet};

use super::types::TopologyGraph;

/// Forward and reverse adjacency over the link list. Entries carry the link
/// index so traced links can be dimmed individually.
pub struct Adjacency<'a> {
	pub forward: HashMap<&'a str, Vec<(usize, &'a str)>>,
	pub reverse: HashMap<&'a str, Vec<(usize, &'a str)>>,
}

impl<'a> Adjacency<'a> {
	pub fn build(graph: &'a TopologyGraph) -> Self {
		let mut forward: HashMap<&str, Vec<(usize, &str)>> = HashMap::new();
		let mut reverse: HashMap<&str, Vec<(usize, &str)>> = HashMap::new();
		for node in &graph.nodes {
			forward.entry(node.name.as_str()).or_default();
			reverse.entry(node.name.as_str()).or_default();
		}
		for (idx, link) in graph.links.iter().enumerate() {
			if let Some(out) = forward.get_mut(link.source.as_str()) {
				out.push((idx, link.target.as_str()));
			}
			if let Some(inc) = reverse.get_mut(link.target.as_str()) {
				inc.push((idx, link.source.as_str()));
			}
		}
		Self { forward, reverse }
	}
}

/// The induced subgraph reachable from a hovered node in either direction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathTrace {
	pub nodes: HashSet<String>,
	pub links: HashSet<usize>,
}

impl PathTrace {
	pub fn contains_node(&self, name: &str) -> bool {
		self.nodes.contains(name)
	}

	pub fn contains_link(&self, idx: usize) -> bool {
		self.links.contains(&idx)
	}
}

fn walk(
	adjacency: &HashMap<&str, Vec<(usize, &str)>>,
	start: &str,
	trace: &mut PathTrace,
	visited: &mut HashSet<String>,
) {
	let mut stack: Vec<&str> = Vec::new();
	if let Some(neighbors) = adjacency.get(start) {
		for &(idx, next) in neighbors {
			trace.links.insert(idx);
			stack.push(next);
		}
	}
	while let Some(name) = stack.pop() {
		if !visited.insert(name.to_string()) {
			continue;
		}
		trace.nodes.insert(name.to_string());
		if let Some(neighbors) = adjacency.get(name) {
			for &(idx, next) in neighbors {
				// Mark the link even when the far node was already
				// visited, so diamond shapes keep all their edges.
				trace.links.insert(idx);
				if !visited.contains(next) {
					stack.push(next);
				}
			}
		}
	}
}

/// Trace every ancestor and every descendant of `name`, including `name`
/// itself, plus all links along the traced paths.
pub fn trace_full_path(name: &str, graph: &TopologyGraph) -> PathTrace {
	let adjacency = Adjacency::build(graph);
	let mut trace = PathTrace::default();
	trace.nodes.insert(name.to_string());

	let mut visited_back: HashSet<String> = HashSet::new();
	walk(&adjacency.reverse, name, &mut trace, &mut visited_back);

	let mut visited_fwd: HashSet<String> = HashSet::new();
	walk(&adjacency.forward, name, &mut trace, &mut visited_fwd);

	trace
}
