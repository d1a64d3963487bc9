use axum::{
	extract::{
		ws::{Message, WebSocket},
		State, WebSocketUpgrade,
	},
	response::Response,
};
use dataflow_core::labels::NodeId;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
	state::AppState,
	wire::{event_to_json, json_to_value},
};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
	InputResponse { node_id: String, value: serde_json::Value },
	ChatMessage { chat_id: String, message: String },
}

/// `GET /ws/events` — the control channel: forwards lifecycle events for
/// whatever run is currently active, and accepts trigger-firing messages
/// from the client.
///
/// The event receiver is snapshotted at connect time. A client that connects
/// before any `/run` call sees no events until it reconnects after one
/// starts — this server supports one graph and one run at a time, so that's
/// an acceptable simplification rather than a queue of pending runs to track.
pub async fn events_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
	ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
	let (mut sender, mut receiver) = socket.split();

	let events_rx = state.active_run.read().await.as_ref().map(|run| run.events_rx.clone());
	let controller = state.active_run.read().await.as_ref().map(|run| run.controller.clone());

	let mut forward_task = tokio::spawn(async move {
		let Some(mut rx) = events_rx else {
			return;
		};
		while let Ok(event) = rx.recv().await {
			let text = event_to_json(&event).to_string();
			if sender.send(Message::Text(text)).await.is_err() {
				break;
			}
		}
	});

	let mut receive_task = tokio::spawn(async move {
		while let Some(Ok(msg)) = receiver.next().await {
			let Message::Text(text) = msg else { continue };
			let parsed: Result<ClientMessage, _> = serde_json::from_str(&text);
			let Some(controller) = &controller else {
				warn!("received client message with no active run to route it to");
				continue;
			};

			match parsed {
				Ok(ClientMessage::InputResponse { node_id, value }) => {
					if let Err(e) = controller.fire_trigger(NodeId::new(node_id), json_to_value(&value)).await {
						warn!(error = %e, "failed to fire trigger from input_response");
					}
				}
				Ok(ClientMessage::ChatMessage { chat_id, message }) => {
					// Legacy multi-participant chat-interface semantics aren't
					// modeled; a chat message is routed as a plain trigger fire
					// carrying its text.
					if let Err(e) = controller
						.fire_trigger(NodeId::new(chat_id), Some(dataflow_core::value::Value::Text(message)))
						.await
					{
						warn!(error = %e, "failed to fire trigger from chat_message");
					}
				}
				Err(e) => debug!(error = %e, "ignoring unrecognized websocket message"),
			}
		}
	});

	tokio::select! {
		_ = &mut forward_task => receive_task.abort(),
		_ = &mut receive_task => forward_task.abort(),
	}
}
