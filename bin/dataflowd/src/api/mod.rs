use axum::{
	extract::DefaultBodyLimit,
	routing::{get, post},
	Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod examples;
mod export;
mod graph;
mod nodes;
mod registry_admin;
mod run;
mod ws;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/nodes", get(nodes::list_nodes))
		.route("/graph", post(graph::submit_graph))
		.route("/run", post(run::start_run))
		.route("/export", post(export::export_graph))
		.route("/upload-nodes", post(registry_admin::upload_nodes))
		.route("/clear-custom-nodes", post(registry_admin::clear_custom_nodes))
		.route("/reload-nodes", post(registry_admin::reload_nodes))
		.route("/examples", get(examples::list_examples))
		.route("/examples/:key", get(examples::get_example))
		.route("/ws/events", get(ws::events_socket))
		.layer(TraceLayer::new_for_http())
		.layer(DefaultBodyLimit::max(state.config.dataflowd_request_body_limit))
		.with_state(state)
}
