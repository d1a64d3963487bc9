use std::{collections::BTreeMap, fmt::Debug, sync::Arc};

use futures::future::BoxFuture;
use tokio::sync::mpsc;

use crate::{errors::RunNodeError, labels::PortName, value::Value};

/// Named input values popped for one firing.
pub type HandlerArgs = BTreeMap<PortName, Value>;

/// One `(branch, value)` item produced by a firing.
#[derive(Debug, Clone)]
pub struct HandlerItem {
	pub branch: PortName,
	pub value: Value,
}

type StreamingFut = BoxFuture<'static, Result<(), RunNodeError>>;
type OneShotFut = BoxFuture<'static, Result<Vec<(PortName, Value)>, RunNodeError>>;

/// A node's computation, normalized to one of three accepted shapes (see
/// the handler adapter contract). All three are driven to the same
/// `(branch, value)` item stream by [`Handler::invoke`].
#[derive(Clone)]
pub enum Handler {
	/// Incrementally yields items by sending them down `output` as they're
	/// produced; routed as each item arrives.
	Streaming(Arc<dyn Fn(HandlerArgs, mpsc::Sender<HandlerItem>) -> StreamingFut + Send + Sync>),

	/// Suspends, then returns a finite list of items enumerated and routed
	/// after completion.
	OneShot(Arc<dyn Fn(HandlerArgs) -> OneShotFut + Send + Sync>),

	/// Same as `OneShot`, without suspension.
	Sync(Arc<dyn Fn(HandlerArgs) -> Result<Vec<(PortName, Value)>, RunNodeError> + Send + Sync>),
}

impl Debug for Handler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let kind = match self {
			Self::Streaming(_) => "Streaming",
			Self::OneShot(_) => "OneShot",
			Self::Sync(_) => "Sync",
		};
		write!(f, "Handler::{kind}(..)")
	}
}

impl Handler {
	pub fn streaming<F>(f: F) -> Self
	where
		F: Fn(HandlerArgs, mpsc::Sender<HandlerItem>) -> StreamingFut + Send + Sync + 'static,
	{
		Self::Streaming(Arc::new(f))
	}

	pub fn one_shot<F>(f: F) -> Self
	where
		F: Fn(HandlerArgs) -> OneShotFut + Send + Sync + 'static,
	{
		Self::OneShot(Arc::new(f))
	}

	pub fn sync<F>(f: F) -> Self
	where
		F: Fn(HandlerArgs) -> Result<Vec<(PortName, Value)>, RunNodeError> + Send + Sync + 'static,
	{
		Self::Sync(Arc::new(f))
	}

	/// Adapts a synchronous handler whose items carry a legacy trailing tag
	/// (`(branch, value, tag)`) into the canonical two-element form.
	pub fn sync_tagged<F, Tag>(f: F) -> Self
	where
		F: Fn(HandlerArgs) -> Result<Vec<(PortName, Value, Tag)>, RunNodeError> + Send + Sync + 'static,
		Tag: Send + 'static,
	{
		Self::sync(move |args| f(args).map(discard_tag))
	}

	/// Run this handler, routing every item it produces down `output`.
	/// `output`'s receiver being dropped (i.e. the scheduler lost interest)
	/// is not an error; remaining items are simply discarded.
	pub async fn invoke(&self, args: HandlerArgs, output: mpsc::Sender<HandlerItem>) -> Result<(), RunNodeError> {
		match self {
			Self::Streaming(f) => f(args, output).await,

			Self::OneShot(f) => {
				let items = f(args).await?;
				send_all(items, output).await;
				Ok(())
			}

			Self::Sync(f) => {
				let items = f(args)?;
				send_all(items, output).await;
				Ok(())
			}
		}
	}
}

async fn send_all(items: Vec<(PortName, Value)>, output: mpsc::Sender<HandlerItem>) {
	for (branch, value) in items {
		if output.send(HandlerItem { branch, value }).await.is_err() {
			break;
		}
	}
}

/// Strip the trailing tag from legacy three-element `(branch, value, tag)`
/// items, for handlers ported from a tagged-item source.
pub fn discard_tag<Tag>(items: Vec<(PortName, Value, Tag)>) -> Vec<(PortName, Value)> {
	items.into_iter().map(|(b, v, _)| (b, v)).collect()
}
