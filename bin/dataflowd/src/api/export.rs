use axum::{http::StatusCode, Json};
use serde_json::{json, Value as JsonValue};

/// `POST /export` — exporting a graph to a standalone runnable script is an
/// explicit non-goal; this endpoint exists so a client gets a clear answer
/// instead of a 404.
pub async fn export_graph() -> (StatusCode, Json<JsonValue>) {
	(
		StatusCode::NOT_IMPLEMENTED,
		Json(json!({
			"status": "error",
			"errors": ["graph export is not supported"],
		})),
	)
}
