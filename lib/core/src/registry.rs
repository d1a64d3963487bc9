use std::{collections::BTreeMap, sync::Arc};

use dataflow_util::names::{check_name, NameError};

use crate::{labels::NodeType, spec::NodeSpec};

#[derive(Debug, thiserror::Error)]
pub enum RegisterNodeError {
	#[error("invalid node type name: {0}")]
	BadName(#[from] NameError),
}

/// Maps node type name -> [`NodeSpec`].
///
/// Built-in nodes are registered once at startup. User-supplied
/// (hot-added) nodes live in a separate overlay map that is checked first,
/// so a hot-added node shadows a built-in of the same name without
/// mutating the built-in set; `clear_custom_nodes` only ever touches the
/// overlay. Within either map, registering the same name twice keeps the
/// latest registration (last registration wins).
#[derive(Debug, Default)]
pub struct NodeRegistry {
	builtin: BTreeMap<NodeType, Arc<NodeSpec>>,
	custom: BTreeMap<NodeType, Arc<NodeSpec>>,
}

impl NodeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_node(&mut self, spec: NodeSpec) -> Result<(), RegisterNodeError> {
		check_name(spec.node_type.id())?;
		self.builtin.insert(spec.node_type.clone(), Arc::new(spec));
		Ok(())
	}

	pub fn register_custom_node(&mut self, spec: NodeSpec) -> Result<(), RegisterNodeError> {
		check_name(spec.node_type.id())?;
		self.custom.insert(spec.node_type.clone(), Arc::new(spec));
		Ok(())
	}

	pub fn clear_custom_nodes(&mut self) {
		self.custom.clear();
	}

	pub fn has_node(&self, node_type: &NodeType) -> bool {
		self.custom.contains_key(node_type) || self.builtin.contains_key(node_type)
	}

	pub fn get_node(&self, node_type: &NodeType) -> Option<Arc<NodeSpec>> {
		self.custom
			.get(node_type)
			.or_else(|| self.builtin.get(node_type))
			.cloned()
	}

	/// All registered specs, hot-added nodes shadowing built-ins of the
	/// same name.
	pub fn iter_nodes(&self) -> impl Iterator<Item = (&NodeType, &Arc<NodeSpec>)> {
		self.builtin
			.iter()
			.filter(|(k, _)| !self.custom.contains_key(*k))
			.chain(self.custom.iter())
	}

	pub fn len_builtin(&self) -> usize {
		self.builtin.len()
	}

	pub fn len_custom(&self) -> usize {
		self.custom.len()
	}
}
