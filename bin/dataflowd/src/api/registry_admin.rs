use axum::{extract::State, Json};
use dataflow_core::{
	handler::Handler,
	labels::PortName,
	spec::{InputDef, NodeKind, NodeSpec, OutputDef},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CustomNodeWire {
	#[serde(rename = "type")]
	pub node_type: String,
	#[serde(default = "CustomNodeWire::default_category")]
	pub category: String,
	pub input: String,
	pub output: String,
}

impl CustomNodeWire {
	fn default_category() -> String {
		"custom".to_string()
	}
}

#[derive(Debug, Deserialize)]
pub struct UploadNodesRequest {
	pub nodes: Vec<CustomNodeWire>,
}

#[derive(Debug, Serialize)]
pub struct AdminResponse {
	pub status: &'static str,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub count: Option<usize>,
}

/// `POST /upload-nodes` — register hot-added node types.
///
/// The original tool loaded arbitrary node *code* at runtime; a compiled
/// binary can't do that. This accepts a declarative stand-in instead: each
/// entry names one input and one output, and gets a handler that passes the
/// input straight through. It's enough to wire up and exercise custom graph
/// shapes against the built-in catalog without a recompile — not a general
/// plugin mechanism.
pub async fn upload_nodes(State(state): State<AppState>, Json(req): Json<UploadNodesRequest>) -> Json<AdminResponse> {
	let mut registry = state.registry.write().await;
	let mut errors = Vec::new();
	let mut count = 0;

	for entry in req.nodes {
		let input_name = PortName::new(&entry.input);
		let output_name = PortName::new(&entry.output);
		let spec = NodeSpec {
			node_type: entry.node_type.clone().into(),
			category: entry.category,
			kind: NodeKind::Regular,
			inputs: vec![(input_name, InputDef::new("any"))],
			outputs: vec![(output_name.clone(), OutputDef::new("any"))],
			handler: Handler::sync(move |args| {
				let value = args.into_iter().next().map(|(_, v)| v).unwrap_or(dataflow_core::value::Value::Boolean(false));
				Ok(vec![(output_name.clone(), value)])
			}),
			interface_type: None,
			participants: None,
		};

		match registry.register_custom_node(spec) {
			Ok(()) => count += 1,
			Err(e) => errors.push(format!("node `{}`: {e}", entry.node_type)),
		}
	}

	Json(AdminResponse {
		status: if errors.is_empty() { "ok" } else { "error" },
		errors,
		count: Some(count),
	})
}

/// `POST /clear-custom-nodes` — drop every hot-added node, restoring the
/// built-in catalog exactly.
pub async fn clear_custom_nodes(State(state): State<AppState>) -> Json<AdminResponse> {
	state.registry.write().await.clear_custom_nodes();
	Json(AdminResponse {
		status: "ok",
		errors: vec![],
		count: None,
	})
}

/// `POST /reload-nodes` — rescan the built-in node catalog. Hot-added nodes
/// are untouched; built-in registrations are idempotent (last write wins on
/// the same type name), so this is safe to call at any time.
pub async fn reload_nodes(State(state): State<AppState>) -> Json<AdminResponse> {
	let mut registry = state.registry.write().await;
	match dataflow_nodes_basic::register(&mut registry) {
		Ok(()) => Json(AdminResponse {
			status: "ok",
			errors: vec![],
			count: Some(registry.len_builtin()),
		}),
		Err(e) => Json(AdminResponse {
			status: "error",
			errors: vec![e.to_string()],
			count: None,
		}),
	}
}
