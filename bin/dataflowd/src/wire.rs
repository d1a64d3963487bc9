//! Conversions between this engine's native types and the JSON shapes the
//! control surface speaks. Kept out of the library crates: the engine has
//! no opinion on wire format, only this binary does.

use std::collections::BTreeMap;

use dataflow_core::value::Value;
use dataflow_engine::ObserverEvent;
use serde_json::{json, Value as Json};

pub fn value_to_json(value: &Value) -> Json {
	match value {
		Value::Integer(x) => json!(x),
		Value::Float(x) => json!(x),
		Value::Text(x) => json!(x),
		Value::Boolean(x) => json!(x),
		Value::List(items) => Json::Array(items.iter().map(value_to_json).collect()),
		Value::Map(map) => Json::Object(map.iter().map(|(k, v)| (k.clone(), value_to_json(v))).collect()),
		Value::Opaque(_) => json!("<opaque>"),
	}
}

/// Best-effort JSON -> `Value` conversion for values arriving over the wire
/// (entry bindings, trigger inputs). There's no declared type to check
/// against here — that happens later, when the value is actually popped for
/// a firing. `null` has no honest `Value` reading, so it comes back as
/// `None` rather than being coerced into some arbitrary default.
pub fn json_to_value(value: &Json) -> Option<Value> {
	Some(match value {
		Json::Bool(b) => Value::Boolean(*b),
		Json::Number(n) => {
			if let Some(i) = n.as_i64() {
				Value::Integer(i)
			} else {
				Value::Float(n.as_f64().unwrap_or_default())
			}
		}
		Json::String(s) => Value::Text(s.clone()),
		Json::Array(items) => Value::List(items.iter().filter_map(json_to_value).collect()),
		Json::Object(map) => Value::Map(map.iter().filter_map(|(k, v)| json_to_value(v).map(|v| (k.clone(), v))).collect()),
		Json::Null => return None,
	})
}

pub fn event_to_json(event: &ObserverEvent) -> Json {
	let mut fields: BTreeMap<&str, Json> = BTreeMap::new();
	match event {
		ObserverEvent::NodeStart { node_id, node_type } => {
			fields.insert("node_id", json!(node_id.id()));
			fields.insert("node_type", json!(node_type.id()));
		}
		ObserverEvent::NodeOutput { node_id, branch, value } => {
			fields.insert("node_id", json!(node_id.id()));
			fields.insert("branch", json!(branch.id()));
			fields.insert("value", value_to_json(value));
		}
		ObserverEvent::NodeDone { node_id } => {
			fields.insert("node_id", json!(node_id.id()));
		}
		ObserverEvent::NodeError { node_id, error } => {
			fields.insert("node_id", json!(node_id.id()));
			fields.insert("error", json!(error));
		}
		ObserverEvent::TerminalOutput { node_id, value } => {
			fields.insert("node_id", json!(node_id.id()));
			fields.insert("value", value_to_json(value));
		}
		ObserverEvent::Log { node_id, value } => {
			fields.insert("node_id", json!(node_id.id()));
			fields.insert("value", value_to_json(value));
		}
		ObserverEvent::UiUpdate { node_id, input, value } => {
			fields.insert("node_id", json!(node_id.id()));
			fields.insert("input", json!(input.id()));
			fields.insert("value", value_to_json(value));
		}
		ObserverEvent::TriggerAvailable { node_id, input, node_type } => {
			fields.insert("node_id", json!(node_id.id()));
			fields.insert("input", json!(input.as_ref().map(|p| p.id())));
			fields.insert("type", json!(node_type.id()));
		}
		ObserverEvent::UiTriggerAvailable { node_id, node_type } => {
			fields.insert("node_id", json!(node_id.id()));
			fields.insert("node_type", json!(node_type.id()));
		}
		ObserverEvent::InterfaceAvailable {
			node_id,
			chat_id,
			interface_type,
			participants,
			inputs,
			outputs,
		} => {
			fields.insert("node_id", json!(node_id.id()));
			fields.insert("chat_id", json!(chat_id.id()));
			fields.insert("interface_type", json!(interface_type));
			fields.insert("participants", json!(participants));
			fields.insert("inputs", json!(inputs.iter().map(|p| p.id()).collect::<Vec<_>>()));
			fields.insert("outputs", json!(outputs.iter().map(|p| p.id()).collect::<Vec<_>>()));
		}
		ObserverEvent::RunComplete => {}
		ObserverEvent::RunError { error } => {
			fields.insert("error", json!(error));
		}
	}

	json!({
		"type": event.type_tag(),
		"data": fields,
	})
}
