//! Bottom-up weight propagation.
//!
//! A node with no outgoing links weighs 1; any other node weighs the sum of
//! its direct targets' weights. Construction only ever links depth d to
//! depth d+1, so folding the layers from the deepest up visits every child
//! before its parents — no recursion, no cycle handling needed. Every link
//! value is then set to the weight of its target, so rendered widths track
//! fan-out.

use std::collections::HashMap;

use super::types::TopologyGraph;

/// Assign node weights bottom-up and overwrite each link's value with the
/// weight of its target. Precondition: strict one-depth adjacency, which
/// [`build_graph`](super::build::build_graph) guarantees.
pub fn propagate(graph: &mut TopologyGraph) -> HashMap<String, u64> {
	let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
	for link in &graph.links {
		outgoing
			.entry(link.source.as_str())
			.or_default()
			.push(link.target.as_str());
	}

	let mut order: Vec<(u8, &str)> = graph
		.nodes
		.iter()
		.map(|n| (n.depth, n.name.as_str()))
		.collect();
	order.sort_by_key(|(depth, _)| std::cmp::Reverse(*depth));

	let mut weights: HashMap<String, u64> = HashMap::new();
	for (_, name) in order {
		let weight = match outgoing.get(name) {
			None => 1,
			Some(children) if children.is_empty() => 1,
			Some(children) => children
				.iter()
				.map(|c| weights.get(*c).copied().unwrap_or(1))
				.sum(),
		};
		weights.insert(name.to_string(), weight);
	}

	for link in &mut graph.links {
		link.value = weights.get(&link.target).copied().unwrap_or(1);
	}
	weights
}

#[cfg(test)]
mod tests {
	use super::super::types::{GraphLink, GraphNode, TopologyGraph};
	use super::*;

	fn node(name: &str, depth: u8) -> GraphNode {
		GraphNode {
			name: name.into(),
			display_name: name.into(),
			depth,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			value: 1,
		}
	}

	#[test]
	fn leaves_weigh_one() {
		let mut graph = TopologyGraph {
			nodes: vec![node("a_a1", 3), node("s_a1_x", 4)],
			links: vec![link("a_a1", "s_a1_x")],
		};
		let weights = propagate(&mut graph);
		assert_eq!(weights["s_a1_x"], 1);
		assert_eq!(weights["a_a1"], 1);
	}

	#[test]
	fn internal_weight_is_sum_of_targets() {
		// One vendor fanning out to two keys, one of which fans to two providers.
		let mut graph = TopologyGraph {
			nodes: vec![
				node("v_1", 0),
				node("k_1", 1),
				node("k_2", 1),
				node("p_1", 2),
				node("p_2", 2),
			],
			links: vec![
				link("v_1", "k_1"),
				link("v_1", "k_2"),
				link("k_1", "p_1"),
				link("k_1", "p_2"),
			],
		};
		let weights = propagate(&mut graph);
		assert_eq!(weights["p_1"], 1);
		assert_eq!(weights["k_1"], 2);
		assert_eq!(weights["k_2"], 1);
		assert_eq!(weights["v_1"], 3);
	}

	#[test]
	fn link_values_equal_target_weights() {
		let mut graph = TopologyGraph {
			nodes: vec![
				node("v_1", 0),
				node("k_1", 1),
				node("p_1", 2),
				node("a_a1", 3),
				node("s_a1_x", 4),
				node("s_a1_y", 4),
			],
			links: vec![
				link("v_1", "k_1"),
				link("k_1", "p_1"),
				link("p_1", "a_a1"),
				link("a_a1", "s_a1_x"),
				link("a_a1", "s_a1_y"),
			],
		};
		let weights = propagate(&mut graph);
		for l in &graph.links {
			assert_eq!(l.value, weights[&l.target], "{} → {}", l.source, l.target);
		}
		assert_eq!(weights["v_1"], 2);
	}

	#[test]
	fn isolated_node_weighs_one() {
		let mut graph = TopologyGraph {
			nodes: vec![node("s_ghost_x", 4)],
			links: vec![],
		};
		let weights = propagate(&mut graph);
		assert_eq!(weights["s_ghost_x"], 1);
	}
}
