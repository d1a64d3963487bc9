use axum::{extract::State, Json};
use serde_json::{json, Value as JsonValue};

use crate::state::AppState;

/// `GET /nodes` — the full registered node catalog, hot-added nodes shadowing
/// built-ins of the same name.
pub async fn list_nodes(State(state): State<AppState>) -> Json<JsonValue> {
	let registry = state.registry.read().await;

	let nodes: Vec<JsonValue> = registry
		.iter_nodes()
		.map(|(node_type, spec)| {
			json!({
				"type": node_type.id(),
				"category": spec.category,
				"kind": spec.kind,
				"inputs": spec.inputs.iter().map(|(name, def)| json!({
					"name": name.id(),
					"type": def.type_tag,
					"has_init": def.init.is_some(),
					"has_default": def.default.is_some(),
				})).collect::<Vec<_>>(),
				"outputs": spec.outputs.iter().map(|(name, def)| json!({
					"name": name.id(),
					"type": def.type_tag,
				})).collect::<Vec<_>>(),
				"interface_type": spec.interface_type,
				"participants": spec.participants,
			})
		})
		.collect();

	Json(json!({ "nodes": nodes }))
}
