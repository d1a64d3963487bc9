use std::{
	collections::{BTreeSet, HashMap, VecDeque},
	sync::Arc,
};

use dataflow_core::{
	graph::GraphHandle,
	handler::HandlerArgs,
	labels::{NodeId, PortName},
	spec::NodeKind,
	value::Value,
};
use dataflow_util::graph::GraphNodeIdx;
use tokio::{
	sync::{mpsc, oneshot},
	task::JoinSet,
};
use tracing::{debug, warn};

use crate::{errors::SchedulerError, events::ObserverEvent, observer::ObserverBus};

/// `max_concurrency_per_node` as a fixed constant: every invariant in the
/// testable-properties section depends on it being 1. Raising it would
/// require rethinking the positional fan-in pairing semantics, so it is
/// not exposed as a runtime knob.
pub const MAX_CONCURRENCY_PER_NODE: usize = 1;

enum Msg {
	FireTrigger {
		node: NodeId,
		value: Option<Value>,
		reply: oneshot::Sender<Result<(), SchedulerError>>,
	},
	Item {
		node: GraphNodeIdx,
		branch: PortName,
		value: Value,
	},
	Finished {
		node: GraphNodeIdx,
		error: Option<String>,
	},
	Stop,
}

/// A handle callers use to drive a running [`Executor`]: fire trigger
/// events into it, or ask it to stop. Cheap to clone.
#[derive(Clone)]
pub struct Controller {
	tx: mpsc::Sender<Msg>,
}

impl Controller {
	/// Dispatch `value` into trigger node `node`, as if that node had
	/// produced `("out", value)`. `None` surfaces as
	/// `SchedulerError::MissingTriggerValue` rather than being fired —
	/// callers that read a value from an untrusted source (a WebSocket
	/// client, say) and find nothing usable there should pass `None`
	/// through rather than inventing a placeholder value.
	pub async fn fire_trigger(&self, node: NodeId, value: Option<Value>) -> Result<(), SchedulerError> {
		let (reply_tx, reply_rx) = oneshot::channel();
		if self.tx.send(Msg::FireTrigger { node, value, reply: reply_tx }).await.is_err() {
			return Err(SchedulerError::ControlChannelClosed);
		}
		reply_rx.await.map_err(|_| SchedulerError::ControlChannelClosed)?
	}

	/// Signal the run to stop. In-flight firings complete naturally; no
	/// new firings are scheduled afterward.
	pub async fn stop(&self) {
		let _ = self.tx.send(Msg::Stop).await;
	}
}

/// The dataflow scheduler/executor. Owns all run-time state (queues,
/// per-node running counts) exclusively for the duration of one [`run`](Executor::run)
/// call — no other task touches it. Firing tasks only read arguments
/// popped for them at spawn time and report back over a channel.
pub struct Executor {
	graph: Arc<GraphHandle>,
	observer_bus: ObserverBus,
	msg_tx: mpsc::Sender<Msg>,
	msg_rx: mpsc::Receiver<Msg>,
}

impl Executor {
	pub fn new(graph: Arc<GraphHandle>, observer_bus: ObserverBus) -> Self {
		let (msg_tx, msg_rx) = mpsc::channel(256);
		Self {
			graph,
			observer_bus,
			msg_tx,
			msg_rx,
		}
	}

	pub fn controller(&self) -> Controller {
		Controller { tx: self.msg_tx.clone() }
	}

	pub fn subscribe(&self) -> async_broadcast::Receiver<ObserverEvent> {
		self.observer_bus.subscribe()
	}

	/// Run the graph to completion. Entry bindings are enqueued once,
	/// before scheduling begins. If the graph has no trigger nodes, `run`
	/// returns once the graph reaches quiescence; otherwise it keeps
	/// running (processing `fire_trigger` calls via the returned
	/// [`Controller`]) until `stop()` is called.
	///
	/// A scheduler-level error ends the run: it is reported via
	/// `ObserverEvent::RunError` before this returns `Err`, distinct from a
	/// handler error, which is isolated to one firing and reported via
	/// `node_error` without ending anything.
	pub async fn run(mut self, entry_bindings: Vec<(NodeId, PortName, Value)>) -> Result<(), SchedulerError> {
		let result = self.run_to_completion(entry_bindings).await;

		match &result {
			Ok(()) => self.observer_bus.emit(ObserverEvent::RunComplete).await,
			Err(e) => self.observer_bus.emit(ObserverEvent::RunError { error: e.to_string() }).await,
		}

		result
	}

	async fn run_to_completion(&mut self, entry_bindings: Vec<(NodeId, PortName, Value)>) -> Result<(), SchedulerError> {
		let mut queues: HashMap<(GraphNodeIdx, PortName), VecDeque<Value>> = HashMap::new();
		let mut running: HashMap<GraphNodeIdx, usize> = HashMap::new();
		let mut stopped = false;
		let mut tasks: JoinSet<()> = JoinSet::new();

		let has_triggers = self.graph.iter_nodes_idx().any(|(_, d)| d.spec.kind == NodeKind::Trigger);

		for (idx, _) in self.graph.iter_nodes_idx() {
			running.insert(idx, 0);
		}

		for (idx, data) in self.graph.iter_nodes_idx() {
			for (name, def) in &data.spec.inputs {
				if let Some(init) = &def.init {
					queues.entry((idx, name.clone())).or_default().push_back(init.clone());
				}
			}
		}

		for (node_id, input, value) in entry_bindings {
			let idx = self
				.graph
				.node_index(&node_id)
				.ok_or_else(|| SchedulerError::UnknownNode(node_id.clone()))?;
			queues.entry((idx, input)).or_default().push_back(value);
		}

		self.announce_triggers().await;
		self.schedule_ready(&mut queues, &mut running, stopped, &mut tasks).await?;

		loop {
			// Drain whatever is already buffered before evaluating the exit
			// condition below. A firing task only finishes (and so becomes
			// visible to `tasks.join_next()`) after it has already sent its
			// `Msg::Item`s and its final `Msg::Finished` — so by the time
			// `join_next()` resolves, those messages are already sitting in
			// `msg_rx`. Checking `tasks.is_empty()` without also draining the
			// channel first can see an empty `JoinSet` while output routing
			// for the task that just finished is still unprocessed, ending
			// the run before the graph has actually drained.
			while let Ok(m) = self.msg_rx.try_recv() {
				self.handle_msg(m, &mut queues, &mut running, &mut stopped, &mut tasks).await?;
			}

			if stopped && tasks.is_empty() {
				break;
			}
			if !has_triggers && tasks.is_empty() {
				break;
			}

			tokio::select! {
				msg = self.msg_rx.recv() => {
					match msg {
						Some(m) => {
							self.handle_msg(m, &mut queues, &mut running, &mut stopped, &mut tasks).await?;
						}
						None => break,
					}
				}
				res = tasks.join_next(), if !tasks.is_empty() => {
					if let Some(Err(e)) = res {
						warn!(error = %e, "firing task panicked");
					}
				}
			}
		}

		Ok(())
	}

	async fn announce_triggers(&self) {
		for (_, data) in self.graph.iter_nodes_idx() {
			if data.spec.kind != NodeKind::Trigger {
				continue;
			}

			let first_input = data.spec.inputs.first().map(|(n, _)| n.clone());

			if data.spec.interface_type.is_some() {
				self.observer_bus
					.emit(ObserverEvent::UiTriggerAvailable {
						node_id: data.instance.id.clone(),
						node_type: data.spec.node_type.clone(),
					})
					.await;
			} else {
				self.observer_bus
					.emit(ObserverEvent::TriggerAvailable {
						node_id: data.instance.id.clone(),
						input: first_input,
						node_type: data.spec.node_type.clone(),
					})
					.await;
			}

			if let Some(participants) = &data.spec.participants {
				self.observer_bus
					.emit(ObserverEvent::InterfaceAvailable {
						node_id: data.instance.id.clone(),
						chat_id: data.instance.id.clone(),
						interface_type: data.spec.interface_type.clone().unwrap_or_default(),
						participants: participants.clone(),
						inputs: data.spec.inputs.iter().map(|(n, _)| n.clone()).collect(),
						outputs: data.spec.outputs.iter().map(|(n, _)| n.clone()).collect(),
					})
					.await;
			}
		}
	}

	async fn handle_msg(
		&mut self,
		msg: Msg,
		queues: &mut HashMap<(GraphNodeIdx, PortName), VecDeque<Value>>,
		running: &mut HashMap<GraphNodeIdx, usize>,
		stopped: &mut bool,
		tasks: &mut JoinSet<()>,
	) -> Result<(), SchedulerError> {
		match msg {
			Msg::Stop => {
				*stopped = true;
			}

			Msg::FireTrigger { node, value, reply } => {
				let result = self.do_fire_trigger(node, value, queues, running, *stopped, tasks).await;
				// The external caller gets its own copy of the result so it
				// can react to e.g. `NotATrigger` locally; the same error
				// also ends the run here, since it's scheduler-level, not a
				// handler fault localized to one firing.
				let _ = reply.send(result.clone());
				result?;
			}

			Msg::Item { node, branch, value } => {
				self.route_item(node, branch, value, queues).await;
				self.schedule_ready(queues, running, *stopped, tasks).await?;
			}

			Msg::Finished { node, error } => {
				if let Some(error) = error {
					let node_id = self.graph.get_node(node).instance.id.clone();
					self.observer_bus.emit(ObserverEvent::NodeError { node_id, error }).await;
				}
				let node_id = self.graph.get_node(node).instance.id.clone();
				self.observer_bus.emit(ObserverEvent::NodeDone { node_id }).await;
				*running.get_mut(&node).unwrap() -= 1;
				self.schedule_ready(queues, running, *stopped, tasks).await?;
			}
		}

		Ok(())
	}

	async fn do_fire_trigger(
		&mut self,
		node: NodeId,
		value: Option<Value>,
		queues: &mut HashMap<(GraphNodeIdx, PortName), VecDeque<Value>>,
		running: &mut HashMap<GraphNodeIdx, usize>,
		stopped: bool,
		tasks: &mut JoinSet<()>,
	) -> Result<(), SchedulerError> {
		let idx = self.graph.node_index(&node).ok_or_else(|| SchedulerError::UnknownNode(node.clone()))?;
		let data = self.graph.get_node(idx);
		if data.spec.kind != NodeKind::Trigger {
			return Err(SchedulerError::NotATrigger(node));
		}

		let value = value.ok_or(SchedulerError::MissingTriggerValue(node.clone()))?;

		let node_type = data.spec.node_type.clone();
		self.observer_bus
			.emit(ObserverEvent::NodeStart {
				node_id: node.clone(),
				node_type,
			})
			.await;

		self.route_item(idx, PortName::new("out"), value, queues).await;

		self.observer_bus.emit(ObserverEvent::NodeDone { node_id: node }).await;

		self.schedule_ready(queues, running, stopped, tasks).await?;
		Ok(())
	}

	/// Emit the output event for `(node, branch, value)` per the node's
	/// kind, then route the value into every downstream queue.
	async fn route_item(&self, node: GraphNodeIdx, branch: PortName, value: Value, queues: &mut HashMap<(GraphNodeIdx, PortName), VecDeque<Value>>) {
		let data = self.graph.get_node(node);
		let node_id = data.instance.id.clone();

		let event = match data.spec.kind {
			NodeKind::TerminalOutput => ObserverEvent::TerminalOutput {
				node_id: node_id.clone(),
				value: value.clone(),
			},
			NodeKind::Logger => ObserverEvent::Log {
				node_id: node_id.clone(),
				value: value.clone(),
			},
			_ => ObserverEvent::NodeOutput {
				node_id: node_id.clone(),
				branch: branch.clone(),
				value: value.clone(),
			},
		};
		self.observer_bus.emit(event).await;

		let targets: Vec<(GraphNodeIdx, PortName)> = self
			.graph
			.edges_starting_at(node)
			.filter(|(_, edge)| edge.source_branch == branch)
			.map(|(to, edge)| (to, edge.target_input.clone()))
			.collect();

		for (to, target_input) in targets {
			queues.entry((to, target_input.clone())).or_default().push_back(value.clone());

			let target_spec = &self.graph.get_node(to).spec;
			if target_spec.kind == NodeKind::UiComponent {
				self.observer_bus
					.emit(ObserverEvent::UiUpdate {
						node_id: self.graph.get_node(to).instance.id.clone(),
						input: target_input,
						value: value.clone(),
					})
					.await;
			}
		}
	}

	/// True iff `n` is ready to fire: see the readiness predicate. Pure
	/// sources (no inbound edges at all) are ready only when every
	/// downstream input queue they feed is empty, so they throttle to
	/// consumer pace instead of flooding the system.
	fn is_ready(&self, idx: GraphNodeIdx, queues: &HashMap<(GraphNodeIdx, PortName), VecDeque<Value>>, running: &HashMap<GraphNodeIdx, usize>) -> bool {
		if running.get(&idx).copied().unwrap_or(0) >= MAX_CONCURRENCY_PER_NODE {
			return false;
		}

		let data = self.graph.get_node(idx);
		if data.spec.kind == NodeKind::Trigger {
			return false;
		}

		let connected: BTreeSet<&str> = self.graph.edges_ending_at(idx).map(|(_, e)| e.target_input.id()).collect();

		if connected.is_empty() {
			return self
				.graph
				.edges_starting_at(idx)
				.all(|(to, edge)| queues.get(&(to, edge.target_input.clone())).map_or(true, VecDeque::is_empty));
		}

		data.spec.inputs.iter().all(|(name, def)| {
			let has_queued = queues.get(&(idx, name.clone())).is_some_and(|q| !q.is_empty());
			if connected.contains(name.id()) {
				has_queued
			} else {
				has_queued || def.default.is_some()
			}
		})
	}

	fn pop_inputs(&self, idx: GraphNodeIdx, queues: &mut HashMap<(GraphNodeIdx, PortName), VecDeque<Value>>) -> Result<HandlerArgs, SchedulerError> {
		let data = self.graph.get_node(idx);
		let mut args = HandlerArgs::new();

		for (name, def) in &data.spec.inputs {
			let value = match queues.get_mut(&(idx, name.clone())).and_then(VecDeque::pop_front) {
				Some(v) => v,
				None => def
					.default
					.clone()
					.ok_or_else(|| SchedulerError::MissingInputAtFireTime(data.instance.id.clone(), name.to_string()))?,
			};
			args.insert(name.clone(), value);
		}

		Ok(args)
	}

	/// Scan every node for readiness and spawn a firing task for each one
	/// that's ready, incrementing its `running` count first so a second
	/// scan (triggered by another event before this task is even polled)
	/// can't double-schedule it. `node_start` is emitted here, synchronously,
	/// before the task is spawned, so it is always observed before any
	/// `node_output` the firing produces.
	async fn schedule_ready(&self, queues: &mut HashMap<(GraphNodeIdx, PortName), VecDeque<Value>>, running: &mut HashMap<GraphNodeIdx, usize>, stopped: bool, tasks: &mut JoinSet<()>) -> Result<(), SchedulerError> {
		if stopped {
			return Ok(());
		}

		let ready: Vec<GraphNodeIdx> = self
			.graph
			.iter_nodes_idx()
			.map(|(idx, _)| idx)
			.filter(|&idx| self.is_ready(idx, queues, running))
			.collect();

		for idx in ready {
			// `pop_inputs` failing here means the readiness predicate let a
			// node through that isn't actually ready — a scheduler bug, not
			// a handler fault. It ends the run rather than being swallowed,
			// per the same policy that isolates handler errors to one firing.
			let args = self.pop_inputs(idx, queues)?;

			*running.get_mut(&idx).unwrap() += 1;

			let data = self.graph.get_node(idx);
			let node_id = data.instance.id.clone();
			let node_type = data.spec.node_type.clone();
			let handler = data.spec.handler.clone();

			debug!(node = %node_id, "firing");
			self.observer_bus
				.emit(ObserverEvent::NodeStart {
					node_id: node_id.clone(),
					node_type,
				})
				.await;

			self.spawn_firing(tasks, idx, handler, args, self.msg_tx.clone());
		}

		Ok(())
	}

	fn spawn_firing(&self, tasks: &mut JoinSet<()>, idx: GraphNodeIdx, handler: dataflow_core::handler::Handler, args: HandlerArgs, msg_tx: mpsc::Sender<Msg>) {
		tasks.spawn(async move {
			let (item_tx, mut item_rx) = mpsc::channel(32);
			let forward_tx = msg_tx.clone();
			let forward = tokio::spawn(async move {
				while let Some(item) = item_rx.recv().await {
					if forward_tx
						.send(Msg::Item {
							node: idx,
							branch: item.branch,
							value: item.value,
						})
						.await
						.is_err()
					{
						break;
					}
				}
			});

			let result = handler.invoke(args, item_tx).await;
			let _ = forward.await;

			let error = result.err().map(|e| e.to_string());
			let _ = msg_tx.send(Msg::Finished { node: idx, error }).await;
		});
	}
}
