use std::sync::Arc;

use config::DataflowdConfig;
use dataflow_core::registry::NodeRegistry;
use dataflow_util::{load_env, LoadedEnv};
use state::AppState;
use tracing::{debug, info};

mod api;
mod config;
mod examples;
mod state;
mod wire;

#[tokio::main]
async fn main() {
	let config_res = match load_env::<DataflowdConfig>() {
		Ok(x) => x,
		Err(err) => {
			println!("Error while loading .env: {err}");
			std::process::exit(1);
		}
	};

	let config: Arc<DataflowdConfig> = Arc::new(config_res.get_config().clone());

	tracing_subscriber::fmt()
		.with_env_filter(config.dataflowd_loglevel.get_config())
		.without_time()
		.with_ansi(true)
		.init();

	// Do this now, logging wasn't available earlier.
	match &config_res {
		LoadedEnv::FoundFile { path, .. } => {
			debug!(message = "Loaded config from .env", ?path);
		}
		LoadedEnv::OnlyVars(_) => {
			debug!(message = "No `.env` found, loaded config from environment");
		}
	}

	let mut registry = NodeRegistry::new();
	if let Err(e) = dataflow_nodes_basic::register(&mut registry) {
		println!("Error registering built-in nodes: {e}");
		std::process::exit(1);
	}
	if let Err(e) = register_example_sources(&mut registry) {
		println!("Error registering example node types: {e}");
		std::process::exit(1);
	}

	let addr = config.dataflowd_server_addr.to_string();
	let app = api::router(AppState::new(config, registry));

	let listener = match tokio::net::TcpListener::bind(&addr).await {
		Ok(l) => l,
		Err(e) => {
			println!("Error binding to `{addr}`: {e}");
			std::process::exit(1);
		}
	};

	info!(%addr, "dataflowd listening");
	if let Err(e) = axum::serve(listener, app).await {
		println!("Server error: {e}");
		std::process::exit(1);
	}
}

/// The `fan_in` built-in example graph wires two distinct constant sources.
/// `const_int` is a parameterized constructor rather than a single catalog
/// entry, so the two instances it needs are registered here, once, under
/// their own type names.
fn register_example_sources(registry: &mut NodeRegistry) -> Result<(), dataflow_core::registry::RegisterNodeError> {
	registry.register_node(dataflow_nodes_basic::io::const_int("const_a", 10))?;
	registry.register_node(dataflow_nodes_basic::io::const_int("const_b", 32))?;
	Ok(())
}
