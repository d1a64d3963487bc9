use crate::{
	handler::Handler,
	labels::{NodeId, NodeType, PortName},
	value::{TypeTag, Value},
};

/// Per-input description.
#[derive(Debug, Clone)]
pub struct InputDef {
	/// Nominal type tag, checked only at edge-construction time.
	pub type_tag: TypeTag,

	/// Value injected once into this input's queue at run start.
	pub init: Option<Value>,

	/// Value used on firing when the queue is empty.
	pub default: Option<Value>,
}

impl InputDef {
	pub fn new(type_tag: impl Into<TypeTag>) -> Self {
		Self {
			type_tag: type_tag.into(),
			init: None,
			default: None,
		}
	}

	pub fn with_init(mut self, value: Value) -> Self {
		self.init = Some(value);
		self
	}

	pub fn with_default(mut self, value: Value) -> Self {
		self.default = Some(value);
		self
	}

	pub fn is_covered_without_edge(&self) -> bool {
		self.init.is_some() || self.default.is_some()
	}
}

/// Per-output description.
#[derive(Debug, Clone)]
pub struct OutputDef {
	pub type_tag: TypeTag,
}

impl OutputDef {
	pub fn new(type_tag: impl Into<TypeTag>) -> Self {
		Self { type_tag: type_tag.into() }
	}
}

/// Classifies a node's role, which determines how its firings are reported
/// to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
	/// Entry point fired by external events; never scheduled by readiness.
	Trigger,
	/// Sink whose firings are reported as `terminal_output`.
	TerminalOutput,
	/// Sink whose firings are reported as `log`.
	Logger,
	/// Sink whose firings are reported as `ui_update`.
	UiComponent,
	/// None of the above.
	Regular,
}

/// A registered node type: the immutable template shared by every instance
/// of that `node_type` across graphs. Looked up by [`crate::registry::NodeRegistry`].
#[derive(Clone)]
pub struct NodeSpec {
	pub node_type: NodeType,
	pub category: String,
	pub kind: NodeKind,

	/// Insertion-ordered: positional pairing under fan-in depends on the
	/// order inputs are declared in, not just queue arrival order.
	pub inputs: Vec<(PortName, InputDef)>,
	pub outputs: Vec<(PortName, OutputDef)>,

	pub handler: Handler,

	/// Metadata for UI-backed / legacy chat-interface nodes.
	pub interface_type: Option<String>,
	pub participants: Option<Vec<String>>,
}

impl NodeSpec {
	pub fn input(&self, name: &PortName) -> Option<&InputDef> {
		self.inputs.iter().find(|(n, _)| n == name).map(|(_, d)| d)
	}

	pub fn output(&self, name: &PortName) -> Option<&OutputDef> {
		self.outputs.iter().find(|(n, _)| n == name).map(|(_, d)| d)
	}

	pub fn has_input(&self, name: &PortName) -> bool {
		self.input(name).is_some()
	}

	pub fn has_output(&self, name: &PortName) -> bool {
		self.output(name).is_some()
	}
}

impl std::fmt::Debug for NodeSpec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NodeSpec")
			.field("node_type", &self.node_type)
			.field("category", &self.category)
			.field("kind", &self.kind)
			.field("inputs", &self.inputs)
			.field("outputs", &self.outputs)
			.finish_non_exhaustive()
	}
}

/// One node instance inside a graph: a stable id paired with the registered
/// type it instantiates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NodeInstance {
	pub id: NodeId,
	pub node_type: NodeType,
}

/// `(source_node, source_branch) -> (target_node, target_input)`. Multiple
/// edges may share an endpoint: this is a multigraph, fan-in and fan-out are
/// both legal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EdgeSpec {
	pub source_node: NodeId,
	pub source_branch: PortName,
	pub target_node: NodeId,
	pub target_input: PortName,
}
