use crate::handlers::{run_stream, StreamEnd, StreamSink};
use crate::models::{ErrorResponse, PostRequest, QuitRequest};
use crate::parsing;
use crate::store::DEFAULT_RECENT_COUNT;
use crate::AppState;
use anyhow::{anyhow, Result};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

pub async fn start_server(state: Arc<AppState>, port: u16, cors: bool) -> Result<()> {
    let app = create_router(state, cors);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "Starting chat server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        error!("Server error: {err:?}");
        return Err(anyhow!("Server error: {}", err));
    }

    Ok(())
}

pub fn create_router(state: Arc<AppState>, cors: bool) -> Router {
    let router = Router::new()
        .route("/message", post(post_message))
        .route("/quit", post(post_quit))
        .route("/stream/:user", get(stream_ws))
        .route("/history", get(history))
        .route("/health", get(health_check))
        .with_state(state);

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PostRequest>,
) -> Response {
    if let Err(err) = parsing::validate_user(&request.user)
        .and_then(|_| parsing::validate_text(&request.text))
    {
        return bad_request(&err.to_string());
    }

    let delivered = state.channel.publish_message(&request.user, &request.text);
    debug!(user = %request.user, delivered, "Message published");
    StatusCode::ACCEPTED.into_response()
}

async fn post_quit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuitRequest>,
) -> Response {
    if let Err(err) = parsing::validate_user(&request.user) {
        return bad_request(&err.to_string());
    }

    state.channel.publish_quit(&request.user);
    StatusCode::ACCEPTED.into_response()
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

async fn history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_COUNT);
    Json(state.log.recent(limit).await).into_response()
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

async fn stream_ws(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
) -> Response {
    if let Err(err) = parsing::validate_user(&user) {
        return bad_request(&err.to_string());
    }

    info!(user = %user, "WebSocket stream requested");
    ws.on_upgrade(move |socket| handle_socket(socket, state, user))
}

struct WsSink {
    sender: SplitSink<WebSocket, Message>,
}

impl StreamSink for WsSink {
    fn deliver(&mut self, html: String) -> impl Future<Output = Result<()>> + Send {
        async move {
            self.sender.send(Message::Text(html.into())).await?;
            Ok(())
        }
    }
}

/// Text frames from the client are published as messages from `user`.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user: String) {
    let (sender, mut receiver) = socket.split();
    let mut sink = WsSink { sender };
    let subscription = state.channel.subscribe();

    let inbound = async {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    if let Err(err) = parsing::validate_text(text.as_str()) {
                        warn!(user = %user, "Dropping inbound frame: {err}");
                        continue;
                    }
                    state.channel.publish_message(&user, text.as_str());
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(err) => {
                    debug!(user = %user, "WebSocket error: {err}");
                    break;
                }
            }
        }
    };

    let end = tokio::select! {
        end = run_stream(subscription, &user, &state.log, &mut sink) => end,
        _ = inbound => StreamEnd::Disconnected,
    };

    if end == StreamEnd::Quit {
        if let Err(err) = sink.sender.send(Message::Close(None)).await {
            debug!(user = %user, "Failed to send close frame: {err}");
        }
    }
    info!(user = %user, ?end, "WebSocket stream ended");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {err:?}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {err:?}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
