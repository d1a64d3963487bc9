use crate::labels::{NodeId, NodeType, PortName};

/// An error raised while building or validating a graph.
///
/// Validation (see [`crate::graph::validate`]) does not use this type
/// directly — it returns human-readable strings, per spec — but graph
/// *construction* (resolving node types through the registry, wiring edges)
/// can fail hard before validation even runs.
#[derive(Debug, thiserror::Error)]
pub enum GraphBuildError {
	#[error("edge `{edge_id}` references node `{invalid_node_id}`, which does not exist")]
	NoNode { edge_id: String, invalid_node_id: NodeId },

	#[error("node `{node_id}` has unknown type `{node_type}`")]
	UnknownNodeType { node_id: NodeId, node_type: NodeType },

	#[error("duplicate node id `{0}`")]
	DuplicateNodeId(NodeId),
}

/// An error raised while invoking a node's handler.
#[derive(Debug, thiserror::Error)]
pub enum RunNodeError {
	#[error("node received unexpected parameter `{0}`")]
	UnexpectedParameter(String),

	#[error("parameter `{parameter}` has the wrong type")]
	BadParameterType { parameter: String },

	#[error("missing required parameter `{0}`")]
	MissingParameter(String),

	#[error("missing required input `{0}`")]
	MissingInput(PortName),

	#[error("required input `{0}` was null")]
	RequiredInputNull(PortName),

	#[error("received unrecognized input `{0}`")]
	UnrecognizedInput(PortName),

	#[error("input `{input}` has the wrong type")]
	BadInputType { input: PortName },

	#[error("handler produced output on unrecognized branch `{0}`")]
	UnrecognizedOutput(PortName),

	#[error("io error: {0}")]
	IoError(String),

	#[error("{0}")]
	Other(String),
}
