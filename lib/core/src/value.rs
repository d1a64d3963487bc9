use std::{any::Any, collections::BTreeMap, fmt::Debug, sync::Arc};

/// The nominal type tag naming an input's or output's declared type. Checked
/// only at edge-construction time; the runtime never inspects a [`Value`] to
/// re-verify it.
pub type TypeTag = String;

/// A type tag that matches any other tag during edge validation.
pub const UNIVERSAL_TYPE: &str = "any";

pub fn types_compatible(source: &str, target: &str) -> bool {
	source == target || source == UNIVERSAL_TYPE || target == UNIVERSAL_TYPE
}

/// A value traveling along an edge.
///
/// Covers the primitive shapes the built-in node set actually produces,
/// plus an opaque escape hatch for user-extension types that don't fit.
#[derive(Debug, Clone)]
pub enum Value {
	Integer(i64),
	Float(f64),
	Text(String),
	Boolean(bool),
	List(Vec<Value>),
	Map(BTreeMap<String, Value>),
	Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Self::Integer(x) => Some(*x),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(x) => Some(*x),
			Self::Integer(x) => Some(*x as f64),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_boolean(&self) -> Option<bool> {
		match self {
			Self::Boolean(x) => Some(*x),
			_ => None,
		}
	}

	/// Render as a display string, matching what the seed scenarios expect
	/// `terminal_output`/`log` events to carry.
	pub fn display_string(&self) -> String {
		match self {
			Self::Integer(x) => x.to_string(),
			Self::Float(x) => x.to_string(),
			Self::Text(x) => x.clone(),
			Self::Boolean(x) => x.to_string(),
			Self::List(items) => {
				let parts: Vec<String> = items.iter().map(Value::display_string).collect();
				format!("[{}]", parts.join(", "))
			}
			Self::Map(map) => {
				let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {}", v.display_string())).collect();
				format!("{{{}}}", parts.join(", "))
			}
			Self::Opaque(_) => "<opaque>".to_string(),
		}
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Boolean(value)
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Integer(a), Self::Integer(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a == b,
			(Self::Text(a), Self::Text(b)) => a == b,
			(Self::Boolean(a), Self::Boolean(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			(Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}
}
