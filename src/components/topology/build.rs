//! Five-layer graph construction from the relational snapshot.
//!
//! All links flow vendor → key → provider → adapter → service, one depth at
//! a time; nothing may skip a layer. Referential integrity is enforced while
//! building: a link is only emitted when both endpoints already sit in the
//! node set, and records with dangling references are dropped, never raised
//! as errors.

use std::collections::{HashMap, HashSet};

use super::snapshot::Snapshot;
use super::types::{
	DEPTH_ADAPTER, DEPTH_KEY, DEPTH_PROVIDER, DEPTH_SERVICE, DEPTH_VENDOR, GraphLink, GraphNode,
	TopologyGraph,
};
use super::weights;

fn vendor_name(id: i64) -> String {
	format!("v_{id}")
}

fn key_name(id: i64) -> String {
	format!("k_{id}")
}

fn provider_name(id: i64) -> String {
	format!("p_{id}")
}

fn adapter_name(id: &str) -> String {
	format!("a_{id}")
}

fn service_name(adapter_id: &str, service: &str) -> String {
	format!("s_{adapter_id}_{service}")
}

fn push_node(
	nodes: &mut Vec<GraphNode>,
	node_set: &mut HashSet<String>,
	name: String,
	display_name: String,
	depth: u8,
) {
	node_set.insert(name.clone());
	nodes.push(GraphNode {
		name,
		display_name,
		depth,
	});
}

/// Build the topology graph and propagate weights.
pub fn build_graph(snapshot: &Snapshot) -> TopologyGraph {
	let mut nodes: Vec<GraphNode> = Vec::new();
	let mut links: Vec<GraphLink> = Vec::new();
	let mut node_set: HashSet<String> = HashSet::new();

	// Layer 0: vendors, only those that own at least one key.
	let vendor_has_key: HashSet<i64> = snapshot.keys.iter().map(|k| k.vendor_id).collect();
	for v in &snapshot.vendors {
		if !vendor_has_key.contains(&v.id) {
			continue;
		}
		push_node(
			&mut nodes,
			&mut node_set,
			vendor_name(v.id),
			v.name.clone(),
			DEPTH_VENDOR,
		);
	}

	// Layer 1: keys. A vendor→key link only when the vendor node exists,
	// a key pointing at an unknown vendor still gets a node of its own.
	for k in &snapshot.keys {
		let name = key_name(k.id);
		push_node(
			&mut nodes,
			&mut node_set,
			name.clone(),
			format!("🔑 {}", k.label),
			DEPTH_KEY,
		);
		let vendor = vendor_name(k.vendor_id);
		if node_set.contains(&vendor) {
			links.push(GraphLink {
				source: vendor,
				target: name,
				value: 1,
			});
		}
	}

	// Layer 2: providers. Dropped entirely without a resolvable key node.
	for p in &snapshot.providers {
		let Some(key_id) = p.vendor_key_id else {
			continue;
		};
		let key = key_name(key_id);
		if !node_set.contains(&key) {
			continue;
		}
		let name = provider_name(p.id);
		push_node(
			&mut nodes,
			&mut node_set,
			name.clone(),
			p.name.clone(),
			DEPTH_PROVIDER,
		);
		links.push(GraphLink {
			source: key,
			target: name,
			value: 1,
		});
	}

	// Layer 3: adapters, unconditionally.
	for a in &snapshot.adapters {
		push_node(
			&mut nodes,
			&mut node_set,
			adapter_name(&a.id),
			a.label.clone(),
			DEPTH_ADAPTER,
		);
	}

	// Layer 4: services, declared by adapters or named by binding targets,
	// de-duplicated by (adapter, service). Maps service node → adapter id.
	let mut service_owner: HashMap<String, String> = HashMap::new();
	let mut service_order: Vec<String> = Vec::new();
	for a in &snapshot.adapters {
		for svc in &a.services {
			let name = service_name(&a.id, svc);
			if service_owner.contains_key(&name) {
				continue;
			}
			service_owner.insert(name.clone(), a.id.clone());
			service_order.push(name.clone());
			push_node(&mut nodes, &mut node_set, name, svc.clone(), DEPTH_SERVICE);
		}
	}
	for b in &snapshot.bindings {
		let Some(target) = b.target() else { continue };
		let name = service_name(&b.adapter_id, target);
		if service_owner.contains_key(&name) {
			continue;
		}
		service_owner.insert(name.clone(), b.adapter_id.clone());
		service_order.push(name.clone());
		push_node(
			&mut nodes,
			&mut node_set,
			name,
			target.to_string(),
			DEPTH_SERVICE,
		);
	}

	// Provider→adapter and adapter→service links from bindings. A binding
	// with a resolved target counts toward both; a binding without one only
	// marks the pair as connected ("unspecified downstream"), floored to 1
	// at emission.
	let mut pa_count: HashMap<(String, String), u64> = HashMap::new();
	let mut pa_order: Vec<(String, String)> = Vec::new();
	let mut as_count: HashMap<(String, String), u64> = HashMap::new();
	let mut as_order: Vec<(String, String)> = Vec::new();

	for b in &snapshot.bindings {
		let provider = provider_name(b.provider_id);
		let adapter = adapter_name(&b.adapter_id);
		if !node_set.contains(&provider) || !node_set.contains(&adapter) {
			continue;
		}

		let pa = (provider, adapter.clone());
		if !pa_count.contains_key(&pa) {
			pa_order.push(pa.clone());
		}
		let pa_entry = pa_count.entry(pa).or_insert(0);

		match b.target() {
			Some(target) => {
				let service = service_name(&b.adapter_id, target);
				if node_set.contains(&service) {
					*pa_entry += 1;
					let asl = (adapter, service);
					if !as_count.contains_key(&asl) {
						as_order.push(asl.clone());
					}
					*as_count.entry(asl).or_insert(0) += 1;
				}
			}
			None => *pa_entry = (*pa_entry).max(1),
		}
	}

	for pa in &pa_order {
		links.push(GraphLink {
			source: pa.0.clone(),
			target: pa.1.clone(),
			value: pa_count[pa].max(1),
		});
	}
	for asl in &as_order {
		links.push(GraphLink {
			source: asl.0.clone(),
			target: asl.1.clone(),
			value: as_count[asl],
		});
	}

	// Declared services no binding reached stay visible: adapter→service of 1.
	for service in &service_order {
		let adapter = adapter_name(&service_owner[service]);
		let bound = as_count.contains_key(&(adapter.clone(), service.clone()));
		if !bound && node_set.contains(&adapter) {
			links.push(GraphLink {
				source: adapter,
				target: service.clone(),
				value: 1,
			});
		}
	}

	let mut graph = TopologyGraph { nodes, links };
	weights::propagate(&mut graph);
	graph
}

#[cfg(test)]
mod tests {
	use super::super::snapshot::{Adapter, Binding, Provider, Snapshot, Vendor, VendorKey};
	use super::*;

	fn vendor(id: i64, name: &str) -> Vendor {
		Vendor {
			id,
			name: name.into(),
		}
	}

	fn key(id: i64, vendor_id: i64, label: &str) -> VendorKey {
		VendorKey {
			id,
			vendor_id,
			label: label.into(),
		}
	}

	fn provider(id: i64, key: Option<i64>, name: &str) -> Provider {
		Provider {
			id,
			vendor_key_id: key,
			name: name.into(),
		}
	}

	fn adapter(id: &str, services: &[&str]) -> Adapter {
		Adapter {
			id: id.into(),
			label: id.to_uppercase(),
			services: services.iter().map(|s| s.to_string()).collect(),
		}
	}

	fn binding(provider_id: i64, adapter_id: &str, target: &str) -> Binding {
		Binding {
			provider_id,
			adapter_id: adapter_id.into(),
			target_provider_name: target.into(),
		}
	}

	fn single_chain() -> Snapshot {
		Snapshot {
			vendors: vec![vendor(1, "Acme")],
			keys: vec![key(10, 1, "prod")],
			providers: vec![provider(100, Some(10), "acme-main")],
			adapters: vec![adapter("a1", &["chat"])],
			bindings: vec![binding(100, "a1", "chat")],
		}
	}

	fn names(graph: &TopologyGraph) -> Vec<&str> {
		graph.nodes.iter().map(|n| n.name.as_str()).collect()
	}

	fn link<'a>(graph: &'a TopologyGraph, source: &str, target: &str) -> Option<&'a GraphLink> {
		graph
			.links
			.iter()
			.find(|l| l.source == source && l.target == target)
	}

	#[test]
	fn single_chain_emits_exact_nodes_and_links() {
		let graph = build_graph(&single_chain());
		assert_eq!(names(&graph), vec!["v_1", "k_10", "p_100", "a_a1", "s_a1_chat"]);
		assert_eq!(graph.links.len(), 4);
		for (s, t) in [
			("v_1", "k_10"),
			("k_10", "p_100"),
			("p_100", "a_a1"),
			("a_a1", "s_a1_chat"),
		] {
			assert_eq!(link(&graph, s, t).unwrap().value, 1, "{s}→{t}");
		}
	}

	#[test]
	fn links_span_exactly_one_depth() {
		let mut snap = single_chain();
		snap.vendors.push(vendor(2, "Orphan"));
		snap.keys.push(key(11, 1, "backup"));
		snap.providers.push(provider(101, None, "keyless"));
		snap.adapters.push(adapter("a2", &["alpha", "beta"]));
		snap.bindings.push(binding(100, "a2", "alpha"));
		snap.bindings.push(binding(100, "a2", ""));
		let graph = build_graph(&snap);
		for l in &graph.links {
			let sd = graph.node(&l.source).unwrap().depth;
			let td = graph.node(&l.target).unwrap().depth;
			assert_eq!(td, sd + 1, "{} → {}", l.source, l.target);
		}
	}

	#[test]
	fn vendor_without_keys_is_dropped() {
		let mut snap = single_chain();
		snap.vendors.push(vendor(2, "Idle"));
		let graph = build_graph(&snap);
		assert!(!names(&graph).contains(&"v_2"));
	}

	#[test]
	fn provider_without_key_reference_is_omitted() {
		let mut snap = single_chain();
		snap.providers.push(provider(101, None, "keyless"));
		let graph = build_graph(&snap);
		assert!(!names(&graph).contains(&"p_101"));
	}

	#[test]
	fn provider_with_unknown_key_is_omitted_and_unreferenced() {
		let mut snap = single_chain();
		snap.providers.push(provider(101, Some(99), "dangling"));
		snap.bindings.push(binding(101, "a1", "chat"));
		let graph = build_graph(&snap);
		assert!(!names(&graph).contains(&"p_101"));
		assert!(
			graph
				.links
				.iter()
				.all(|l| l.source != "p_101" && l.target != "p_101")
		);
	}

	#[test]
	fn key_with_unknown_vendor_gets_node_but_no_link() {
		let mut snap = single_chain();
		snap.keys.push(key(11, 42, "stray"));
		let graph = build_graph(&snap);
		assert!(names(&graph).contains(&"k_11"));
		assert!(graph.links.iter().all(|l| l.target != "k_11"));
	}

	#[test]
	fn targetless_binding_floors_provider_adapter_link_at_one() {
		let mut snap = single_chain();
		snap.bindings = vec![binding(100, "a1", "")];
		let graph = build_graph(&snap);
		// Declared service still appears, with an unbound adapter→service link.
		assert!(names(&graph).contains(&"s_a1_chat"));
		assert_eq!(link(&graph, "p_100", "a_a1").unwrap().value, 1);
		assert_eq!(link(&graph, "a_a1", "s_a1_chat").unwrap().value, 1);
	}

	#[test]
	fn binding_target_creates_service_even_when_undeclared() {
		let mut snap = single_chain();
		snap.bindings.push(binding(100, "a1", "embeddings"));
		let graph = build_graph(&snap);
		assert!(names(&graph).contains(&"s_a1_embeddings"));
		assert!(link(&graph, "a_a1", "s_a1_embeddings").is_some());
	}

	#[test]
	fn service_nodes_are_deduplicated() {
		let mut snap = single_chain();
		snap.bindings.push(binding(100, "a1", "chat"));
		let graph = build_graph(&snap);
		let count = graph.nodes.iter().filter(|n| n.name == "s_a1_chat").count();
		assert_eq!(count, 1);
		// Both bindings accumulate into one adapter→service link.
		assert_eq!(graph.links.iter().filter(|l| l.target == "s_a1_chat").count(), 1);
	}

	#[test]
	fn binding_to_unknown_adapter_leaves_orphan_service_node() {
		let mut snap = single_chain();
		snap.bindings.push(binding(100, "ghost", "chat"));
		let graph = build_graph(&snap);
		assert!(names(&graph).contains(&"s_ghost_chat"));
		assert!(
			graph
				.links
				.iter()
				.all(|l| l.target != "s_ghost_chat" && l.source != "s_ghost_chat")
		);
	}

	#[test]
	fn adapters_appear_even_with_zero_usage() {
		let mut snap = single_chain();
		snap.adapters.push(adapter("a2", &[]));
		let graph = build_graph(&snap);
		assert!(names(&graph).contains(&"a_a2"));
	}
}
