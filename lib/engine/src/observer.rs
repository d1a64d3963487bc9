use std::sync::Arc;

use futures::future::BoxFuture;

use crate::events::ObserverEvent;

/// An observer callback, invoked sequentially for every lifecycle event.
pub type ObserverFn = Arc<dyn Fn(ObserverEvent) -> BoxFuture<'static, ()> + Send + Sync>;

/// Multicasts lifecycle events.
///
/// Registered observers (plain async closures) are invoked sequentially,
/// in registration order, for every event — a slow observer stalls the
/// run, by design (see spec's observer-backpressure note). A second,
/// independent fan-out goes over an `async-broadcast` channel: unlike
/// `tokio::sync::broadcast::Receiver`, its receivers are `Clone`, so every
/// WebSocket client can hold its own cursor over the same event stream
/// without stalling the run if it falls behind (the channel drops the
/// oldest buffered event instead of blocking the sender).
pub struct ObserverBus {
	observers: Vec<ObserverFn>,
	tx: async_broadcast::Sender<ObserverEvent>,
}

impl ObserverBus {
	pub fn new(observers: Vec<ObserverFn>) -> (Self, async_broadcast::Receiver<ObserverEvent>) {
		let (mut tx, rx) = async_broadcast::broadcast(1024);
		tx.set_await_active(false);
		tx.set_overflow(true);
		(Self { observers, tx }, rx)
	}

	/// A fresh receiver over this bus, starting from the next emitted event.
	pub fn subscribe(&self) -> async_broadcast::Receiver<ObserverEvent> {
		self.tx.new_receiver()
	}

	pub async fn emit(&self, event: ObserverEvent) {
		for observer in &self.observers {
			observer(event.clone()).await;
		}
		// No active receivers is not an error: nobody's listening yet.
		let _ = self.tx.broadcast(event).await;
	}
}
