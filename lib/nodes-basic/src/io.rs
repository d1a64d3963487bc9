use std::time::Duration;

use dataflow_core::{
	handler::{Handler, HandlerItem},
	labels::{NodeType, PortName},
	spec::{InputDef, NodeKind, NodeSpec, OutputDef},
	value::Value,
};

/// An external entry point. Its handler is never invoked by the
/// scheduler — triggers are fired only through `fire_trigger`, which
/// routes the supplied value directly on branch `out`.
pub fn terminal_input() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("terminal_input"),
		category: "io".into(),
		kind: NodeKind::Trigger,
		inputs: vec![],
		outputs: vec![(PortName::new("out"), OutputDef::new("any"))],
		handler: Handler::sync(|_args| Ok(vec![])),
		interface_type: None,
		participants: None,
	}
}

pub fn terminal_output() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("terminal_output"),
		category: "io".into(),
		kind: NodeKind::TerminalOutput,
		inputs: vec![(PortName::new("value"), InputDef::new("any"))],
		outputs: vec![(PortName::new("out"), OutputDef::new("any"))],
		handler: Handler::sync(|args| {
			let value = args.get(&PortName::new("value")).cloned().unwrap_or(Value::Boolean(false));
			Ok(vec![(PortName::new("out"), value)])
		}),
		interface_type: None,
		participants: None,
	}
}

pub fn logger() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("logger"),
		category: "io".into(),
		kind: NodeKind::Logger,
		inputs: vec![(PortName::new("value"), InputDef::new("any"))],
		outputs: vec![(PortName::new("out"), OutputDef::new("any"))],
		handler: Handler::sync(|args| {
			let value = args.get(&PortName::new("value")).cloned().unwrap_or(Value::Boolean(false));
			Ok(vec![(PortName::new("out"), value)])
		}),
		interface_type: None,
		participants: None,
	}
}

/// A pure source with a value baked into the handler at registration
/// time. Register under a distinct `type_name` per constant you need —
/// `NodeRegistry` is keyed by type, so two instances that must carry
/// different constants (e.g. the fan-in scenario's two sources) need two
/// distinct registered types, not two instances of one type.
///
/// Demonstrates the streaming handler shape: the value is pushed down
/// the output channel directly rather than returned as a list.
pub fn const_int(type_name: impl Into<NodeType>, value: i64) -> NodeSpec {
	NodeSpec {
		node_type: type_name.into(),
		category: "io".into(),
		kind: NodeKind::Regular,
		inputs: vec![],
		outputs: vec![(PortName::new("out"), OutputDef::new("int"))],
		handler: Handler::streaming(move |_args, output| {
			Box::pin(async move {
				let _ = output
					.send(HandlerItem {
						branch: PortName::new("out"),
						value: Value::Integer(value),
					})
					.await;
				Ok(())
			})
		}),
		interface_type: None,
		participants: None,
	}
}

pub fn to_string() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("to_string"),
		category: "text".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("value"), InputDef::new("any"))],
		outputs: vec![(PortName::new("out"), OutputDef::new("text"))],
		handler: Handler::sync(|args| {
			let text = args.get(&PortName::new("value")).map(Value::display_string).unwrap_or_default();
			Ok(vec![(PortName::new("out"), Value::Text(text))])
		}),
		interface_type: None,
		participants: None,
	}
}

pub fn concat() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("concat"),
		category: "text".into(),
		kind: NodeKind::Regular,
		inputs: vec![
			(PortName::new("a"), InputDef::new("text").with_default(Value::Text(String::new()))),
			(PortName::new("b"), InputDef::new("text").with_default(Value::Text(String::new()))),
		],
		outputs: vec![(PortName::new("out"), OutputDef::new("text"))],
		handler: Handler::sync(|args| {
			let a = args.get(&PortName::new("a")).map(Value::display_string).unwrap_or_default();
			let b = args.get(&PortName::new("b")).map(Value::display_string).unwrap_or_default();
			Ok(vec![(PortName::new("out"), Value::Text(format!("{a}{b}")))])
		}),
		interface_type: None,
		participants: None,
	}
}

/// Echoes its input, tagging the routed item `DATA` and discarding the tag
/// via the adapter's legacy-compatibility path. Ported handlers that still
/// speak in `(branch, value, kind)` triples plug into `Handler::sync_tagged`
/// the same way; `kind` carried a DATA/EVENT distinction upstream of this
/// engine, which has no EVENT routing of its own, so only the tag-discarding
/// shape survives here.
pub fn tagged_echo() -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("tagged_echo"),
		category: "io".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("value"), InputDef::new("any"))],
		outputs: vec![(PortName::new("out"), OutputDef::new("any"))],
		handler: Handler::sync_tagged(|args| {
			let value = args.get(&PortName::new("value")).cloned().unwrap_or(Value::Boolean(false));
			Ok(vec![(PortName::new("out"), value, "DATA")])
		}),
		interface_type: None,
		participants: None,
	}
}

/// Suspends for `millis` before echoing its input. Demonstrates the
/// one-shot asynchronous handler shape.
pub fn delay(millis: u64) -> NodeSpec {
	NodeSpec {
		node_type: NodeType::new("delay"),
		category: "io".into(),
		kind: NodeKind::Regular,
		inputs: vec![(PortName::new("value"), InputDef::new("any"))],
		outputs: vec![(PortName::new("out"), OutputDef::new("any"))],
		handler: Handler::one_shot(move |args| {
			Box::pin(async move {
				tokio::time::sleep(Duration::from_millis(millis)).await;
				let value = args.get(&PortName::new("value")).cloned().unwrap_or(Value::Boolean(false));
				Ok(vec![(PortName::new("out"), value)])
			})
		}),
		interface_type: None,
		participants: None,
	}
}
