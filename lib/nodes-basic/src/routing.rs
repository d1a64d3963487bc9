use dataflow_core::{
	handler::Handler,
	labels::{NodeType, PortName},
	spec::{InputDef, NodeKind, NodeSpec, OutputDef},
	value::Value,
};

fn int_arg(args: &dataflow_core::handler::HandlerArgs, name: &str) -> i64 {
	args.get(&PortName::new(name)).and_then(Value::as_integer).unwrap_or_default()
}

pub fn is_even() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("is_even"),
		category: "routing".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("value"), InputDef::new("int"))],
		outputs: vec![(PortName::new("yes"), OutputDef::new("int")), (PortName::new("no"), OutputDef::new("int"))],
		handler: Handler::sync(|args| {
			let v = int_arg(&args, "value");
			let branch = if v % 2 == 0 { "yes" } else { "no" };
			Ok(vec![(PortName::new(branch), Value::Integer(v))])
		}),
		interface_type: None,
		participants: None,
	}
}

pub fn is_positive() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("is_positive"),
		category: "routing".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("value"), InputDef::new("int"))],
		outputs: vec![
			(PortName::new("positive"), OutputDef::new("int")),
			(PortName::new("negative"), OutputDef::new("int")),
			(PortName::new("zero"), OutputDef::new("int")),
		],
		handler: Handler::sync(|args| {
			let v = int_arg(&args, "value");
			let branch = match v.cmp(&0) {
				std::cmp::Ordering::Greater => "positive",
				std::cmp::Ordering::Less => "negative",
				std::cmp::Ordering::Equal => "zero",
			};
			Ok(vec![(PortName::new(branch), Value::Integer(v))])
		}),
		interface_type: None,
		participants: None,
	}
}
