use dataflow_core::labels::NodeId;

/// An error in the scheduler itself (as opposed to a handler error, which
/// is localized to one firing and reported via `node_error`). A scheduler
/// error ends the run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulerError {
	#[error("no such node `{0}`")]
	UnknownNode(NodeId),

	#[error("node `{0}` is not a trigger")]
	NotATrigger(NodeId),

	#[error("trigger `{0}` fired with no value")]
	MissingTriggerValue(NodeId),

	#[error("internal: input missing at fire time for node `{0}`, input `{1}` — readiness predicate was violated")]
	MissingInputAtFireTime(NodeId, String),

	#[error("control channel closed unexpectedly")]
	ControlChannelClosed,
}
