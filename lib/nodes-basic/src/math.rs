use dataflow_core::{
	handler::Handler,
	labels::{NodeType, PortName},
	spec::{InputDef, NodeKind, NodeSpec, OutputDef},
	value::Value,
};

fn int_arg(args: &dataflow_core::handler::HandlerArgs, name: &str) -> i64 {
	args.get(&PortName::new(name)).and_then(Value::as_integer).unwrap_or_default()
}

pub fn double() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("double"),
		category: "math".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("x"), InputDef::new("int"))],
		outputs: vec![(PortName::new("out"), OutputDef::new("int"))],
		handler: Handler::sync(|args| Ok(vec![(PortName::new("out"), Value::Integer(int_arg(&args, "x") * 2))])),
		interface_type: None,
		participants: None,
	}
}

pub fn triple() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("triple"),
		category: "math".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("x"), InputDef::new("int"))],
		outputs: vec![(PortName::new("out"), OutputDef::new("int"))],
		handler: Handler::sync(|args| Ok(vec![(PortName::new("out"), Value::Integer(int_arg(&args, "x") * 3))])),
		interface_type: None,
		participants: None,
	}
}

pub fn square() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("square"),
		category: "math".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("x"), InputDef::new("int"))],
		outputs: vec![(PortName::new("out"), OutputDef::new("int"))],
		handler: Handler::sync(|args| {
			let x = int_arg(&args, "x");
			Ok(vec![(PortName::new("out"), Value::Integer(x * x))])
		}),
		interface_type: None,
		participants: None,
	}
}

pub fn add() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("add"),
		category: "math".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("a"), InputDef::new("int")), (PortName::new("b"), InputDef::new("int"))],
		outputs: vec![(PortName::new("result"), OutputDef::new("int"))],
		handler: Handler::sync(|args| Ok(vec![(PortName::new("result"), Value::Integer(int_arg(&args, "a") + int_arg(&args, "b")))])),
		interface_type: None,
		participants: None,
	}
}

pub fn multiply() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("multiply"),
		category: "math".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("a"), InputDef::new("int")), (PortName::new("b"), InputDef::new("int"))],
		outputs: vec![(PortName::new("result"), OutputDef::new("int"))],
		handler: Handler::sync(|args| Ok(vec![(PortName::new("result"), Value::Integer(int_arg(&args, "a") * int_arg(&args, "b")))])),
		interface_type: None,
		participants: None,
	}
}

/// A counter node meant to be wired back into its own `value` input,
/// seeded with `init` once at run start (see the cycle-with-init
/// scenario). Each firing yields `value + 1`.
pub fn inc(init: i64) -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("inc"),
		category: "math".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("value"), InputDef::new("int").with_init(Value::Integer(init)))],
		outputs: vec![(PortName::new("out"), OutputDef::new("int"))],
		handler: Handler::sync(|args| Ok(vec![(PortName::new("out"), Value::Integer(int_arg(&args, "value") + 1))])),
		interface_type: None,
		participants: None,
	}
}
