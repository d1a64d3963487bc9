use std::sync::Arc;

use dataflow_core::{
	graph::GraphHandle,
	labels::{NodeId, PortName},
	registry::NodeRegistry,
};
use dataflow_engine::{executor::Controller, ObserverEvent};
use tokio::sync::RwLock;

use crate::config::DataflowdConfig;

/// The most recently submitted graph, kept around so `/run` doesn't need to
/// resend the whole graph definition alongside its entry-binding values.
pub struct CurrentGraph {
	pub handle: Arc<GraphHandle>,
	pub entry_points: Vec<(NodeId, PortName)>,
}

/// A run currently executing in the background. Holds the controller used
/// to fire triggers into it, and a snapshot of its event receiver — cloned
/// out to every WebSocket client that connects while this run is active.
pub struct ActiveRun {
	pub controller: Controller,
	pub events_rx: async_broadcast::Receiver<ObserverEvent>,
}

#[derive(Clone)]
pub struct AppState {
	pub config: Arc<DataflowdConfig>,
	pub registry: Arc<RwLock<NodeRegistry>>,
	pub current_graph: Arc<RwLock<Option<CurrentGraph>>>,
	pub active_run: Arc<RwLock<Option<ActiveRun>>>,
}

impl AppState {
	pub fn new(config: Arc<DataflowdConfig>, registry: NodeRegistry) -> Self {
		Self {
			config,
			registry: Arc::new(RwLock::new(registry)),
			current_graph: Arc::new(RwLock::new(None)),
			active_run: Arc::new(RwLock::new(None)),
		}
	}
}
