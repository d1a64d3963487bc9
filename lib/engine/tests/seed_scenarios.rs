//! Integration tests built around the catalog's worked scenarios:
//! even/odd routing, a math chain feeding a logger, fan-in addition,
//! three-way branch routing, a self-incrementing cycle, and handler
//! error isolation.

use std::sync::{Arc, Mutex};

use dataflow_core::{
	graph,
	handler::Handler,
	labels::{NodeId, NodeType, PortName},
	registry::NodeRegistry,
	spec::{EdgeSpec, InputDef, NodeInstance, NodeKind, NodeSpec, OutputDef},
	value::Value,
};
use dataflow_engine::{events::ObserverEvent, executor::Executor, observer::ObserverBus};
use dataflow_nodes_basic::{io, math, routing};

fn collector() -> (Arc<Mutex<Vec<ObserverEvent>>>, dataflow_engine::ObserverFn) {
	let log = Arc::new(Mutex::new(Vec::new()));
	let captured = log.clone();
	let observer: dataflow_engine::ObserverFn = Arc::new(move |event| {
		let captured = captured.clone();
		Box::pin(async move {
			captured.lock().unwrap().push(event);
		})
	});
	(log, observer)
}

fn node(id: &str, node_type: &str) -> NodeInstance {
	NodeInstance {
		id: NodeId::new(id),
		node_type: NodeType::new(node_type),
	}
}

fn edge(src: &str, branch: &str, dst: &str, input: &str) -> EdgeSpec {
	EdgeSpec {
		source_node: NodeId::new(src),
		source_branch: PortName::new(branch),
		target_node: NodeId::new(dst),
		target_input: PortName::new(input),
	}
}

fn terminal_outputs(log: &Mutex<Vec<ObserverEvent>>, node_id: &str) -> Vec<Value> {
	log.lock()
		.unwrap()
		.iter()
		.filter_map(|e| match e {
			ObserverEvent::TerminalOutput { node_id: n, value } if n.id() == node_id => Some(value.clone()),
			_ => None,
		})
		.collect()
}

#[tokio::test]
async fn even_odd_flow_routes_by_parity() {
	let mut registry = NodeRegistry::new();
	registry.register_node(io::terminal_input()).unwrap();
	registry.register_node(routing::is_even()).unwrap();
	registry.register_node(io::terminal_output()).unwrap();

	let instances = vec![node("in", "terminal_input"), node("split", "is_even"), node("even_out", "terminal_output"), node("odd_out", "terminal_output")];
	let edges = vec![
		edge("in", "out", "split", "value"),
		edge("split", "yes", "even_out", "value"),
		edge("split", "no", "odd_out", "value"),
	];

	let handle = Arc::new(graph::build(&registry, instances, edges).unwrap());
	assert!(graph::validate(&handle, &[]).is_empty());

	let (log, observer) = collector();
	let (bus, _rx) = ObserverBus::new(vec![observer]);
	let executor = Executor::new(handle, bus);
	let controller = executor.controller();

	let run = tokio::spawn(executor.run(vec![]));
	controller.fire_trigger(NodeId::new("in"), Some(Value::Integer(4))).await.unwrap();
	controller.fire_trigger(NodeId::new("in"), Some(Value::Integer(7))).await.unwrap();
	tokio::time::sleep(std::time::Duration::from_millis(20)).await;
	controller.stop().await;
	run.await.unwrap().unwrap();

	assert_eq!(terminal_outputs(&log, "even_out"), vec![Value::Integer(4)]);
	assert_eq!(terminal_outputs(&log, "odd_out"), vec![Value::Integer(7)]);
}

#[tokio::test]
async fn math_chain_feeds_logger() {
	let mut registry = NodeRegistry::new();
	registry.register_node(io::terminal_input()).unwrap();
	registry.register_node(math::double()).unwrap();
	registry.register_node(math::square()).unwrap();
	registry.register_node(io::logger()).unwrap();

	let instances = vec![node("in", "terminal_input"), node("d", "double"), node("sq", "square"), node("log", "logger")];
	let edges = vec![edge("in", "out", "d", "x"), edge("d", "out", "sq", "x"), edge("sq", "out", "log", "value")];

	let handle = Arc::new(graph::build(&registry, instances, edges).unwrap());
	assert!(graph::validate(&handle, &[]).is_empty());

	let (log, observer) = collector();
	let (bus, _rx) = ObserverBus::new(vec![observer]);
	let executor = Executor::new(handle, bus);
	let controller = executor.controller();

	let run = tokio::spawn(executor.run(vec![]));
	controller.fire_trigger(NodeId::new("in"), Some(Value::Integer(3))).await.unwrap();
	tokio::time::sleep(std::time::Duration::from_millis(20)).await;
	controller.stop().await;
	run.await.unwrap().unwrap();

	let logged: Vec<Value> = log
		.lock()
		.unwrap()
		.iter()
		.filter_map(|e| match e {
			ObserverEvent::Log { value, .. } => Some(value.clone()),
			_ => None,
		})
		.collect();
	assert_eq!(logged, vec![Value::Integer(36)]);
}

#[tokio::test]
async fn fan_in_sums_two_constant_sources() {
	let mut registry = NodeRegistry::new();
	registry.register_node(io::const_int("const_a", 10)).unwrap();
	registry.register_node(io::const_int("const_b", 32)).unwrap();
	registry.register_node(math::add()).unwrap();
	registry.register_node(io::terminal_output()).unwrap();

	let instances = vec![node("a", "const_a"), node("b", "const_b"), node("sum", "add"), node("out", "terminal_output")];
	let edges = vec![edge("a", "out", "sum", "a"), edge("b", "out", "sum", "b"), edge("sum", "result", "out", "value")];

	let handle = Arc::new(graph::build(&registry, instances, edges).unwrap());
	assert!(graph::validate(&handle, &[]).is_empty());

	let (log, observer) = collector();
	let (bus, _rx) = ObserverBus::new(vec![observer]);
	let executor = Executor::new(handle, bus);
	let controller = executor.controller();

	// Both constants are pure sources with no inbound edges, so each stays
	// ready for as long as its downstream queue is empty — they keep
	// re-feeding `add` at consumer pace rather than firing exactly once.
	// What matters for this scenario is that every sum they produce is 42.
	let run = tokio::spawn(executor.run(vec![]));
	tokio::time::sleep(std::time::Duration::from_millis(20)).await;
	controller.stop().await;
	run.await.unwrap().unwrap();

	let sums = terminal_outputs(&log, "out");
	assert!(!sums.is_empty());
	assert!(sums.iter().all(|v| *v == Value::Integer(42)));
}

#[tokio::test]
async fn branch_routing_covers_positive_negative_zero() {
	for (value, expect) in [(5, "positive"), (-5, "negative"), (0, "zero")] {
		let mut registry = NodeRegistry::new();
		registry.register_node(io::terminal_input()).unwrap();
		registry.register_node(routing::is_positive()).unwrap();
		registry.register_node(io::terminal_output()).unwrap();

		let instances = vec![
			node("in", "terminal_input"),
			node("split", "is_positive"),
			node("pos_out", "terminal_output"),
			node("neg_out", "terminal_output"),
			node("zero_out", "terminal_output"),
		];
		let edges = vec![
			edge("in", "out", "split", "value"),
			edge("split", "positive", "pos_out", "value"),
			edge("split", "negative", "neg_out", "value"),
			edge("split", "zero", "zero_out", "value"),
		];

		let handle = Arc::new(graph::build(&registry, instances, edges).unwrap());
		assert!(graph::validate(&handle, &[]).is_empty());

		let (log, observer) = collector();
		let (bus, _rx) = ObserverBus::new(vec![observer]);
		let executor = Executor::new(handle, bus);
		let controller = executor.controller();

		let run = tokio::spawn(executor.run(vec![]));
		controller.fire_trigger(NodeId::new("in"), Some(Value::Integer(value))).await.unwrap();
		tokio::time::sleep(std::time::Duration::from_millis(20)).await;
		controller.stop().await;
		run.await.unwrap().unwrap();

		assert_eq!(terminal_outputs(&log, &format!("{expect}_out")), vec![Value::Integer(value)]);
	}
}

#[tokio::test]
async fn cycle_with_init_increments_until_stopped() {
	let mut registry = NodeRegistry::new();
	registry.register_node(math::inc(0)).unwrap();
	registry.register_node(io::logger()).unwrap();

	let instances = vec![node("counter", "inc"), node("log", "logger")];
	let edges = vec![edge("counter", "out", "counter", "value"), edge("counter", "out", "log", "value")];

	let handle = Arc::new(graph::build(&registry, instances, edges).unwrap());
	assert!(graph::validate(&handle, &[]).is_empty());

	let (log, observer) = collector();
	let (bus, _rx) = ObserverBus::new(vec![observer]);
	let executor = Executor::new(handle, bus);
	let controller = executor.controller();

	let run = tokio::spawn(executor.run(vec![]));
	tokio::time::sleep(std::time::Duration::from_millis(20)).await;
	controller.stop().await;
	run.await.unwrap().unwrap();

	let logged: Vec<i64> = log
		.lock()
		.unwrap()
		.iter()
		.filter_map(|e| match e {
			ObserverEvent::Log { value, .. } => value.as_integer(),
			_ => None,
		})
		.collect();

	assert!(!logged.is_empty());
	for pair in logged.windows(2) {
		assert_eq!(pair[1], pair[0] + 1);
	}
}

#[tokio::test]
async fn handler_error_is_isolated_and_run_continues() {
	let mut registry = NodeRegistry::new();
	registry.register_node(io::terminal_input()).unwrap();
	registry
		.register_node(NodeSpec {
			node_type: NodeType::new("flaky"),
			category: "test".into(),
			kind: NodeKind::Regular,
			inputs: vec![(PortName::new("value"), InputDef::new("int"))],
			outputs: vec![(PortName::new("out"), OutputDef::new("int"))],
			handler: Handler::sync(|_args| Err(dataflow_core::errors::RunNodeError::Other("boom".into()))),
			interface_type: None,
			participants: None,
		})
		.unwrap();
	registry.register_node(math::double()).unwrap();
	registry.register_node(io::terminal_output()).unwrap();

	// `good` is an independent sibling branch fed by the same trigger as
	// `bad`, so the run as a whole has two branches and only one of them
	// is broken.
	let instances = vec![
		node("in", "terminal_input"),
		node("bad", "flaky"),
		node("out", "terminal_output"),
		node("good", "double"),
		node("out2", "terminal_output"),
	];
	let edges = vec![
		edge("in", "out", "bad", "value"),
		edge("bad", "out", "out", "value"),
		edge("in", "out", "good", "x"),
		edge("good", "out", "out2", "value"),
	];

	let handle = Arc::new(graph::build(&registry, instances, edges).unwrap());
	assert!(graph::validate(&handle, &[]).is_empty());

	let (log, observer) = collector();
	let (bus, _rx) = ObserverBus::new(vec![observer]);
	let executor = Executor::new(handle, bus);
	let controller = executor.controller();

	let run = tokio::spawn(executor.run(vec![]));
	controller.fire_trigger(NodeId::new("in"), Some(Value::Integer(1))).await.unwrap();
	tokio::time::sleep(std::time::Duration::from_millis(20)).await;
	controller.fire_trigger(NodeId::new("in"), Some(Value::Integer(2))).await.unwrap();
	tokio::time::sleep(std::time::Duration::from_millis(20)).await;
	controller.stop().await;
	run.await.unwrap().unwrap();

	let errors = log.lock().unwrap().iter().filter(|e| matches!(e, ObserverEvent::NodeError { .. })).count();
	assert_eq!(errors, 2);
	assert!(terminal_outputs(&log, "out").is_empty());
	// The failing branch doesn't block its sibling: `good` keeps flowing
	// and `out2` still observes both firings.
	assert_eq!(terminal_outputs(&log, "out2"), vec![Value::Integer(2), Value::Integer(4)]);
}
