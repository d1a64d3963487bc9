use axum::{
	extract::Path,
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde_json::json;

use crate::examples;

/// `GET /examples` — every built-in example graph, keyed by name.
pub async fn list_examples() -> Json<serde_json::Value> {
	Json(examples::all())
}

/// `GET /examples/{key}` — one example graph by name.
pub async fn get_example(Path(key): Path<String>) -> Response {
	match examples::by_key(&key) {
		Some(example) => Json(example).into_response(),
		None => (StatusCode::NOT_FOUND, Json(json!({"status": "error", "errors": [format!("no example named `{key}`")]}))).into_response(),
	}
}
