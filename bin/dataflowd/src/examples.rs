//! Built-in example graphs, offered over `/examples` so a caller can load a
//! working graph without hand-writing one. Each definition uses exactly the
//! wire shape `POST /graph` expects.

use serde_json::{json, Value as JsonValue};

fn even_odd() -> JsonValue {
	json!({
		"name": "Even/Odd Flow",
		"instances": [
			{"id": "in-1", "type": "terminal_input"},
			{"id": "check-1", "type": "is_even"},
			{"id": "double-1", "type": "double"},
			{"id": "triple-1", "type": "triple"},
			{"id": "out-1", "type": "terminal_output"}
		],
		"edges": [
			{"source": "in-1", "sourceHandle": "out", "target": "check-1", "targetHandle": "value"},
			{"source": "check-1", "sourceHandle": "yes", "target": "double-1", "targetHandle": "x"},
			{"source": "check-1", "sourceHandle": "no", "target": "triple-1", "targetHandle": "x"},
			{"source": "double-1", "sourceHandle": "out", "target": "out-1", "targetHandle": "value"},
			{"source": "triple-1", "sourceHandle": "out", "target": "out-1", "targetHandle": "value"}
		]
	})
}

fn math_chain() -> JsonValue {
	json!({
		"name": "Math Chain + Logger",
		"instances": [
			{"id": "in-1", "type": "terminal_input"},
			{"id": "sq-1", "type": "square"},
			{"id": "dbl-1", "type": "double"},
			{"id": "log-1", "type": "logger"},
			{"id": "out-1", "type": "terminal_output"}
		],
		"edges": [
			{"source": "in-1", "sourceHandle": "out", "target": "sq-1", "targetHandle": "x"},
			{"source": "sq-1", "sourceHandle": "out", "target": "dbl-1", "targetHandle": "x"},
			{"source": "sq-1", "sourceHandle": "out", "target": "log-1", "targetHandle": "value"},
			{"source": "dbl-1", "sourceHandle": "out", "target": "out-1", "targetHandle": "value"}
		]
	})
}

/// Requires `const_a`/`const_b` to be registered (see `main`'s startup
/// sequence) — they're not part of the plain built-in catalog, since
/// `const_int` is a parameterized constructor, not a single node type.
fn fan_in() -> JsonValue {
	json!({
		"name": "Fan-in Sum",
		"instances": [
			{"id": "a-1", "type": "const_a"},
			{"id": "b-1", "type": "const_b"},
			{"id": "add-1", "type": "add"},
			{"id": "out-1", "type": "terminal_output"}
		],
		"edges": [
			{"source": "a-1", "sourceHandle": "out", "target": "add-1", "targetHandle": "a"},
			{"source": "b-1", "sourceHandle": "out", "target": "add-1", "targetHandle": "b"},
			{"source": "add-1", "sourceHandle": "result", "target": "out-1", "targetHandle": "value"}
		]
	})
}

fn cycle_with_init() -> JsonValue {
	json!({
		"name": "Counter Cycle",
		"instances": [
			{"id": "counter-1", "type": "inc"},
			{"id": "log-1", "type": "logger"}
		],
		"edges": [
			{"source": "counter-1", "sourceHandle": "out", "target": "counter-1", "targetHandle": "value"},
			{"source": "counter-1", "sourceHandle": "out", "target": "log-1", "targetHandle": "value"}
		]
	})
}

pub fn all() -> JsonValue {
	json!({
		"even_odd": even_odd(),
		"math_chain": math_chain(),
		"fan_in": fan_in(),
		"cycle_with_init": cycle_with_init(),
	})
}

pub fn by_key(key: &str) -> Option<JsonValue> {
	match key {
		"even_odd" => Some(even_odd()),
		"math_chain" => Some(math_chain()),
		"fan_in" => Some(fan_in()),
		"cycle_with_init" => Some(cycle_with_init()),
		_ => None,
	}
}
