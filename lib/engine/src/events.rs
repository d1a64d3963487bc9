use dataflow_core::{
	labels::{NodeId, NodeType, PortName},
	value::Value,
};

/// A lifecycle event multicast to observers. Mirrors the event catalog: one
/// `node_start` is followed by zero or more per-item events and exactly one
/// `node_done` (with `node_error` in between at most once on failure).
#[derive(Debug, Clone)]
pub enum ObserverEvent {
	NodeStart {
		node_id: NodeId,
		node_type: NodeType,
	},
	NodeOutput {
		node_id: NodeId,
		branch: PortName,
		value: Value,
	},
	NodeDone {
		node_id: NodeId,
	},
	NodeError {
		node_id: NodeId,
		error: String,
	},
	TerminalOutput {
		node_id: NodeId,
		value: Value,
	},
	Log {
		node_id: NodeId,
		value: Value,
	},
	/// Emitted when a value is routed into a UI-component node's input,
	/// not when the node itself fires.
	UiUpdate {
		node_id: NodeId,
		input: PortName,
		value: Value,
	},
	TriggerAvailable {
		node_id: NodeId,
		input: Option<PortName>,
		node_type: NodeType,
	},
	UiTriggerAvailable {
		node_id: NodeId,
		node_type: NodeType,
	},
	InterfaceAvailable {
		node_id: NodeId,
		chat_id: NodeId,
		interface_type: String,
		participants: Vec<String>,
		inputs: Vec<PortName>,
		outputs: Vec<PortName>,
	},
	RunComplete,
	RunError {
		error: String,
	},
}

impl ObserverEvent {
	/// The event-type tag used on the wire (WebSocket JSON, etc.).
	pub fn type_tag(&self) -> &'static str {
		match self {
			Self::NodeStart { .. } => "node_start",
			Self::NodeOutput { .. } => "node_output",
			Self::NodeDone { .. } => "node_done",
			Self::NodeError { .. } => "node_error",
			Self::TerminalOutput { .. } => "terminal_output",
			Self::Log { .. } => "log",
			Self::UiUpdate { .. } => "ui_update",
			Self::TriggerAvailable { .. } => "trigger_available",
			Self::UiTriggerAvailable { .. } => "ui_trigger_available",
			Self::InterfaceAvailable { .. } => "interface_available",
			Self::RunComplete => "run_complete",
			Self::RunError { .. } => "run_error",
		}
	}
}
