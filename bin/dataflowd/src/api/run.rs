use std::collections::BTreeMap;

use axum::{extract::State, Json};
use dataflow_core::labels::{NodeId, PortName};
use dataflow_engine::{observer::ObserverBus, Executor};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{error, info};

use crate::{
	state::{ActiveRun, AppState},
	wire::json_to_value,
};

#[derive(Debug, Deserialize)]
pub struct RunRequest {
	#[serde(default)]
	pub inputs: BTreeMap<String, JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
	pub status: &'static str,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<String>,
}

/// `POST /run` — start a run against the most recently submitted graph.
///
/// Unlike a batch pipeline run, this returns as soon as the run has started,
/// not once it has finished: a graph with trigger nodes runs indefinitely,
/// waiting on `fire_trigger` calls delivered over the WebSocket control
/// channel, so there's no single "done" moment to block on here.
pub async fn start_run(State(state): State<AppState>, Json(req): Json<RunRequest>) -> Json<RunResponse> {
	let current = state.current_graph.read().await;
	let Some(current) = current.as_ref() else {
		return Json(RunResponse {
			status: "error",
			errors: vec!["no graph has been submitted yet".to_string()],
		});
	};

	let mut missing = Vec::new();
	let mut entry_bindings = Vec::new();
	for (node_id, input) in &current.entry_points {
		let key = format!("{node_id}.{input}");
		match req.inputs.get(&key).and_then(json_to_value) {
			Some(value) => entry_bindings.push((node_id.clone(), input.clone(), value)),
			None => missing.push(key),
		}
	}

	if !missing.is_empty() {
		return Json(RunResponse {
			status: "error",
			errors: missing.into_iter().map(|k| format!("missing entry binding `{k}`")).collect(),
		});
	}

	// Extra bindings beyond the declared entry points are accepted too — a
	// caller may want to seed a value into an input that also has a default.
	// A `null` extra binding is dropped rather than rejected: unlike a
	// declared entry point, there's no required slot to fail to fill.
	for (key, value) in &req.inputs {
		if let Some((node, input)) = key.split_once('.') {
			let node_id = NodeId::new(node);
			let port = PortName::new(input);
			if !current.entry_points.iter().any(|(n, p)| n == &node_id && p == &port) {
				if let Some(value) = json_to_value(value) {
					entry_bindings.push((node_id, port, value));
				}
			}
		}
	}

	let graph = current.handle.clone();
	drop(current);

	let (observer_bus, _) = ObserverBus::new(vec![]);
	let executor = Executor::new(graph, observer_bus);
	let controller = executor.controller();
	let events_rx = executor.subscribe();

	if let Some(old) = state.active_run.write().await.replace(ActiveRun { controller, events_rx }) {
		old.controller.stop().await;
	}

	tokio::spawn(async move {
		// `executor.run` already emits `ObserverEvent::RunError` over the
		// events socket before returning `Err`; this log is server-side
		// diagnostics, not the client's only way to learn the run failed.
		if let Err(e) = executor.run(entry_bindings).await {
			error!(error = %e, "run ended with a scheduler error");
		} else {
			info!("run finished");
		}
	});

	Json(RunResponse {
		status: "started",
		errors: vec![],
	})
}
