use std::fmt::Display;

use smartstring::{LazyCompact, SmartString};

/// The unique identifier of a node within one graph instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct NodeId(SmartString<LazyCompact>);

impl NodeId {
	pub fn new(id: impl AsRef<str>) -> Self {
		Self(SmartString::from(id.as_ref()))
	}

	pub fn id(&self) -> &str {
		&self.0
	}
}

impl Display for NodeId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for NodeId {
	fn from(value: String) -> Self {
		Self(SmartString::from(value))
	}
}

impl From<&str> for NodeId {
	fn from(value: &str) -> Self {
		Self(SmartString::from(value))
	}
}

/// The name of a port: an input name or an output branch name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PortName(SmartString<LazyCompact>);

impl PortName {
	pub fn new(id: impl AsRef<str>) -> Self {
		Self(SmartString::from(id.as_ref()))
	}

	pub fn id(&self) -> &str {
		&self.0
	}
}

impl Display for PortName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for PortName {
	fn from(value: String) -> Self {
		Self(SmartString::from(value))
	}
}

impl From<&str> for PortName {
	fn from(value: &str) -> Self {
		Self(SmartString::from(value))
	}
}

/// The canonical type name of a node (`terminal_input`, `double`, ...), used
/// to look the node's [`crate::spec::NodeSpec`] up in the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct NodeType(SmartString<LazyCompact>);

impl NodeType {
	pub fn new(id: impl AsRef<str>) -> Self {
		Self(SmartString::from(id.as_ref()))
	}

	pub fn id(&self) -> &str {
		&self.0
	}
}

impl Display for NodeType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for NodeType {
	fn from(value: String) -> Self {
		Self(SmartString::from(value))
	}
}

impl From<&str> for NodeType {
	fn from(value: &str) -> Self {
		Self(SmartString::from(value))
	}
}
