use std::{collections::BTreeMap, sync::Arc};

use dataflow_util::graph::{FinalizedGraph, Graph, GraphNodeIdx};

use crate::{
	errors::GraphBuildError,
	labels::{NodeId, PortName},
	registry::NodeRegistry,
	spec::{EdgeSpec, NodeInstance, NodeKind, NodeSpec},
	value::types_compatible,
};

#[derive(Debug)]
pub struct NodeData {
	pub instance: NodeInstance,
	pub spec: Arc<NodeSpec>,
}

#[derive(Debug, Clone)]
pub struct EdgeData {
	pub source_branch: PortName,
	pub target_input: PortName,
}

/// A built, not-yet-validated (or already-validated) graph instance, ready
/// to be handed to the executor.
pub struct GraphHandle {
	graph: FinalizedGraph<NodeData, EdgeData>,
	index: BTreeMap<NodeId, GraphNodeIdx>,
}

impl GraphHandle {
	pub fn node_index(&self, id: &NodeId) -> Option<GraphNodeIdx> {
		self.index.get(id).copied()
	}

	pub fn get_node(&self, idx: GraphNodeIdx) -> &NodeData {
		self.graph.get_node(idx)
	}

	pub fn iter_nodes_idx(&self) -> impl Iterator<Item = (GraphNodeIdx, &NodeData)> {
		self.graph.iter_nodes_idx()
	}

	pub fn edges_starting_at(&self, idx: GraphNodeIdx) -> impl Iterator<Item = (GraphNodeIdx, &EdgeData)> + '_ {
		self.graph.edges_starting_at(idx).map(move |e| {
			let (_, to, data) = self.graph.get_edge(e);
			(to, data)
		})
	}

	pub fn edges_ending_at(&self, idx: GraphNodeIdx) -> impl Iterator<Item = (GraphNodeIdx, &EdgeData)> + '_ {
		self.graph.edges_ending_at(idx).map(move |e| {
			let (from, _, data) = self.graph.get_edge(e);
			(from, data)
		})
	}

	/// Entry points: inputs of non-trigger nodes not covered by an edge,
	/// init, or default. A caller must supply entry bindings for all of
	/// these before a run can start.
	pub fn entry_points(&self) -> Vec<(NodeId, PortName)> {
		let mut out = Vec::new();
		for (idx, data) in self.iter_nodes_idx() {
			if data.spec.kind == NodeKind::Trigger {
				continue;
			}
			let connected: std::collections::BTreeSet<&str> = self
				.edges_ending_at(idx)
				.map(|(_, e)| e.target_input.id())
				.collect();

			for (name, def) in &data.spec.inputs {
				if connected.contains(name.id()) || def.is_covered_without_edge() {
					continue;
				}
				out.push((data.instance.id.clone(), name.clone()));
			}
		}
		out
	}

	fn has_self_loop(&self, idx: GraphNodeIdx) -> bool {
		self.edges_starting_at(idx).any(|(to, _)| to == idx)
	}
}

/// Construct a [`GraphHandle`] from instance and edge lists, resolving node
/// types through `registry`. Fails hard (not via the validator's string
/// list) on structural impossibilities: unknown types, duplicate ids, or
/// edges naming nodes that don't exist.
pub fn build(registry: &NodeRegistry, instances: Vec<NodeInstance>, edges: Vec<EdgeSpec>) -> Result<GraphHandle, GraphBuildError> {
	let mut graph = Graph::new();
	let mut index = BTreeMap::new();

	for instance in instances {
		if index.contains_key(&instance.id) {
			return Err(GraphBuildError::DuplicateNodeId(instance.id));
		}

		let spec = registry
			.get_node(&instance.node_type)
			.ok_or_else(|| GraphBuildError::UnknownNodeType {
				node_id: instance.id.clone(),
				node_type: instance.node_type.clone(),
			})?;

		let node_id = instance.id.clone();
		let idx = graph.add_node(NodeData { instance, spec });
		index.insert(node_id, idx);
	}

	for edge in edges {
		let from = index
			.get(&edge.source_node)
			.copied()
			.ok_or_else(|| GraphBuildError::NoNode {
				edge_id: format!("{}:{} -> {}:{}", edge.source_node, edge.source_branch, edge.target_node, edge.target_input),
				invalid_node_id: edge.source_node.clone(),
			})?;

		let to = index
			.get(&edge.target_node)
			.copied()
			.ok_or_else(|| GraphBuildError::NoNode {
				edge_id: format!("{}:{} -> {}:{}", edge.source_node, edge.source_branch, edge.target_node, edge.target_input),
				invalid_node_id: edge.target_node.clone(),
			})?;

		graph.add_edge(
			from,
			to,
			EdgeData {
				source_branch: edge.source_branch,
				target_input: edge.target_input,
			},
		);
	}

	Ok(GraphHandle {
		graph: graph.finalize(),
		index,
	})
}

/// Validate structural invariants, returning a list of human-readable
/// errors (empty means the graph is valid). Checked in order: endpoint
/// existence, type compatibility, input coverage (skipping triggers), and
/// cycle-starter presence.
///
/// `entry_bindings` are the `(node, input)` pairs a caller intends to seed
/// at run start; they count toward input coverage just as an edge or a
/// default would.
pub fn validate(graph: &GraphHandle, entry_bindings: &[(NodeId, PortName)]) -> Vec<String> {
	let mut errors = Vec::new();

	for (idx, data) in graph.iter_nodes_idx() {
		for (to, edge) in graph.edges_starting_at(idx) {
			let target = graph.get_node(to);

			let Some(out_def) = data.spec.output(&edge.source_branch) else {
				errors.push(format!(
					"node '{}' has no output branch '{}'",
					data.instance.id, edge.source_branch
				));
				continue;
			};

			let Some(in_def) = target.spec.input(&edge.target_input) else {
				errors.push(format!(
					"node '{}' has no input '{}'",
					target.instance.id, edge.target_input
				));
				continue;
			};

			if !types_compatible(&out_def.type_tag, &in_def.type_tag) {
				errors.push(format!(
					"edge {}:{} -> {}:{} has incompatible types ('{}' vs '{}')",
					data.instance.id, edge.source_branch, target.instance.id, edge.target_input, out_def.type_tag, in_def.type_tag
				));
			}
		}
	}

	for (idx, data) in graph.iter_nodes_idx() {
		if data.spec.kind == NodeKind::Trigger {
			continue;
		}

		let connected: std::collections::BTreeSet<&str> = graph
			.edges_ending_at(idx)
			.map(|(_, e)| e.target_input.id())
			.collect();

		for (name, def) in &data.spec.inputs {
			if connected.contains(name.id()) || def.is_covered_without_edge() {
				continue;
			}

			let has_entry = entry_bindings.iter().any(|(n, p)| n == &data.instance.id && p == name);
			if !has_entry {
				errors.push(format!("Node '{}' input '{}' has no source", data.instance.id, name));
			}
		}
	}

	for component in graph.graph.strongly_connected_components() {
		let is_cycle = component.len() > 1 || (component.len() == 1 && graph.has_self_loop(component[0]));
		if !is_cycle {
			continue;
		}

		let has_starter = component.iter().any(|&idx| {
			let data = graph.get_node(idx);
			let has_init = data.spec.inputs.iter().any(|(_, def)| def.init.is_some());
			let has_entry = entry_bindings.iter().any(|(n, _)| n == &data.instance.id);
			has_init || has_entry
		});

		if !has_starter {
			let names: Vec<String> = component
				.iter()
				.map(|&idx| graph.get_node(idx).instance.id.to_string())
				.collect();
			errors.push(format!("Cycle [{}] has no init or entry binding to start it", names.join(", ")));
		}
	}

	errors
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		handler::Handler,
		labels::{NodeId, NodeType},
		spec::{InputDef, OutputDef},
		value::Value,
	};

	fn passthrough_spec(node_type: &str, kind: NodeKind, inputs: Vec<(&str, InputDef)>, outputs: Vec<&str>) -> NodeSpec {
		NodeSpec {
			node_type: NodeType::new(node_type),
			category: "test".into(),
			kind,
			inputs: inputs.into_iter().map(|(n, d)| (PortName::new(n), d)).collect(),
			outputs: outputs.into_iter().map(|n| (PortName::new(n), OutputDef::new("any"))).collect(),
			handler: Handler::sync(|_args| Ok(vec![])),
			interface_type: None,
			participants: None,
		}
	}

	fn registry_with(specs: Vec<NodeSpec>) -> NodeRegistry {
		let mut reg = NodeRegistry::new();
		for spec in specs {
			reg.register_node(spec).unwrap();
		}
		reg
	}

	#[test]
	fn uncovered_input_is_reported() {
		let reg = registry_with(vec![passthrough_spec(
			"sink",
			NodeKind::Regular,
			vec![("value", InputDef::new("any"))],
			vec!["out"],
		)]);

		let instances = vec![NodeInstance {
			id: NodeId::new("s"),
			node_type: NodeType::new("sink"),
		}];

		let handle = build(&reg, instances, vec![]).unwrap();
		let errors = validate(&handle, &[]);
		assert_eq!(errors.len(), 1);
		assert!(errors[0].contains("has no source"));
	}

	#[test]
	fn entry_binding_covers_input() {
		let reg = registry_with(vec![passthrough_spec(
			"sink",
			NodeKind::Regular,
			vec![("value", InputDef::new("any"))],
			vec!["out"],
		)]);

		let instances = vec![NodeInstance {
			id: NodeId::new("s"),
			node_type: NodeType::new("sink"),
		}];

		let handle = build(&reg, instances, vec![]).unwrap();
		let bindings = vec![(NodeId::new("s"), PortName::new("value"))];
		assert!(validate(&handle, &bindings).is_empty());
	}

	#[test]
	fn self_loop_without_init_is_unstartable() {
		let reg = registry_with(vec![passthrough_spec(
			"inc",
			NodeKind::Regular,
			vec![("value", InputDef::new("int"))],
			vec!["out"],
		)]);

		let instances = vec![NodeInstance {
			id: NodeId::new("i"),
			node_type: NodeType::new("inc"),
		}];

		let edges = vec![EdgeSpec {
			source_node: NodeId::new("i"),
			source_branch: PortName::new("out"),
			target_node: NodeId::new("i"),
			target_input: PortName::new("value"),
		}];

		let handle = build(&reg, instances, edges).unwrap();
		let errors = validate(&handle, &[]);
		assert!(errors.iter().any(|e| e.contains("no init or entry binding")));
	}

	#[test]
	fn self_loop_with_init_is_startable() {
		let reg = registry_with(vec![passthrough_spec(
			"inc",
			NodeKind::Regular,
			vec![("value", InputDef::new("int").with_init(Value::Integer(0)))],
			vec!["out"],
		)]);

		let instances = vec![NodeInstance {
			id: NodeId::new("i"),
			node_type: NodeType::new("inc"),
		}];

		let edges = vec![EdgeSpec {
			source_node: NodeId::new("i"),
			source_branch: PortName::new("out"),
			target_node: NodeId::new("i"),
			target_input: PortName::new("value"),
		}];

		let handle = build(&reg, instances, edges).unwrap();
		assert!(validate(&handle, &[]).is_empty());
	}

	#[test]
	fn entry_points_lists_uncovered_inputs_only() {
		let reg = registry_with(vec![passthrough_spec(
			"sink",
			NodeKind::Regular,
			vec![("value", InputDef::new("any")), ("flag", InputDef::new("bool").with_default(Value::Boolean(false)))],
			vec!["out"],
		)]);

		let instances = vec![NodeInstance {
			id: NodeId::new("s"),
			node_type: NodeType::new("sink"),
		}];

		let handle = build(&reg, instances, vec![]).unwrap();
		let points = handle.entry_points();
		assert_eq!(points, vec![(NodeId::new("s"), PortName::new("value"))]);
	}
}
