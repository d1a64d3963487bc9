//! The built-in node catalog: terminal io, arithmetic, branching, and
//! logging nodes available in every run without a hot-add step.

pub mod io;
pub mod math;
pub mod routing;

use dataflow_core::registry::{NodeRegistry, RegisterNodeError};

/// Registers every built-in node into `registry`. `const_int` is a
/// parameterized constructor rather than a catalog entry — callers that
/// need constant sources register it themselves under a type name of
/// their choosing (see [`io::const_int`]).
pub fn register(registry: &mut NodeRegistry) -> Result<(), RegisterNodeError> {
	registry.register_node(io::terminal_input())?;
	registry.register_node(io::terminal_output())?;
	registry.register_node(io::logger())?;
	registry.register_node(io::to_string())?;
	registry.register_node(io::concat())?;
	registry.register_node(io::delay(0))?;
	registry.register_node(io::tagged_echo())?;

	registry.register_node(math::double())?;
	registry.register_node(math::triple())?;
	registry.register_node(math::square())?;
	registry.register_node(math::add())?;
	registry.register_node(math::multiply())?;
	registry.register_node(math::inc(0))?;

	registry.register_node(routing::is_even())?;
	registry.register_node(routing::is_positive())?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn register_populates_builtin_catalog() {
		let mut registry = NodeRegistry::new();
		register(&mut registry).unwrap();
		assert_eq!(registry.len_custom(), 0);
		assert!(registry.len_builtin() >= 15);
		assert!(registry.has_node(&"add".into()));
		assert!(registry.has_node(&"is_even".into()));
		assert!(registry.has_node(&"logger".into()));
	}
}
