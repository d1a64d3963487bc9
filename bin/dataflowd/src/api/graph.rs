use axum::{extract::State, Json};
use dataflow_core::{
	graph,
	labels::{NodeId, NodeType, PortName},
	spec::{EdgeSpec, NodeInstance},
};
use serde::{Deserialize, Serialize};

use crate::state::{AppState, CurrentGraph};

#[derive(Debug, Deserialize)]
pub struct InstanceWire {
	pub id: String,
	#[serde(rename = "type")]
	pub node_type: String,
}

#[derive(Debug, Deserialize)]
pub struct EdgeWire {
	pub source: String,
	#[serde(rename = "sourceHandle")]
	pub source_handle: String,
	pub target: String,
	#[serde(rename = "targetHandle")]
	pub target_handle: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphRequest {
	pub instances: Vec<InstanceWire>,
	#[serde(default)]
	pub edges: Vec<EdgeWire>,
}

#[derive(Debug, Serialize)]
pub struct EntryPointWire {
	pub instance: String,
	pub input: String,
}

#[derive(Debug, Serialize)]
pub struct GraphResponse {
	pub status: &'static str,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub entry_points: Vec<EntryPointWire>,
}

/// `POST /graph` — build and validate a graph definition, replacing whatever
/// graph was previously submitted. Entry points are computed and echoed back
/// so a caller knows what `/run` will need filled in.
pub async fn submit_graph(State(state): State<AppState>, Json(req): Json<GraphRequest>) -> Json<GraphResponse> {
	let instances: Vec<NodeInstance> = req
		.instances
		.into_iter()
		.map(|i| NodeInstance {
			id: NodeId::new(i.id),
			node_type: NodeType::new(i.node_type),
		})
		.collect();

	let edges: Vec<EdgeSpec> = req
		.edges
		.into_iter()
		.map(|e| EdgeSpec {
			source_node: NodeId::new(e.source),
			source_branch: PortName::new(e.source_handle),
			target_node: NodeId::new(e.target),
			target_input: PortName::new(e.target_handle),
		})
		.collect();

	let registry = state.registry.read().await;
	let handle = match graph::build(&registry, instances, edges) {
		Ok(h) => h,
		Err(e) => {
			return Json(GraphResponse {
				status: "error",
				errors: vec![e.to_string()],
				entry_points: vec![],
			})
		}
	};
	drop(registry);

	let entry_points = handle.entry_points();
	let errors = graph::validate(&handle, &entry_points);

	if !errors.is_empty() {
		return Json(GraphResponse {
			status: "error",
			errors,
			entry_points: vec![],
		});
	}

	let entry_points_wire: Vec<EntryPointWire> = entry_points
		.iter()
		.map(|(node, input)| EntryPointWire {
			instance: node.to_string(),
			input: input.to_string(),
		})
		.collect();

	*state.current_graph.write().await = Some(CurrentGraph {
		handle: std::sync::Arc::new(handle),
		entry_points,
	});
	// A new graph invalidates whatever run was in flight against the old one.
	if let Some(old) = state.active_run.write().await.take() {
		old.controller.stop().await;
	}

	Json(GraphResponse {
		status: "ok",
		errors: vec![],
		entry_points: entry_points_wire,
	})
}
