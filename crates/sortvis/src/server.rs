//! Axum web server with WebSocket streaming for visualization.

use std::net::SocketAddr;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sortvis_engine::{registry, AlgorithmId, AlgorithmInfo, Step};
use tokio::sync::broadcast::error::RecvError;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::{Error, Result};
use crate::export::{ExportData, ExportFormat};
use crate::playback::{PlaybackStatus, Speed};
use crate::session::{Session, SessionUpdate};

/// Visualization server.
pub struct VisServer {
    session: Session,
}

impl VisServer {
    /// Create a server around a session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/status", get(status_handler))
            .route("/api/step", get(step_handler))
            .route("/api/snapshot", get(snapshot_handler))
            .route("/api/array/generate", post(generate_handler))
            .route("/api/array/size", post(size_handler))
            .route("/api/algorithm", post(algorithm_handler))
            .route("/api/speed", post(speed_handler))
            .route("/api/playback/start", post(start_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/stop", post(stop_handler))
            .route("/api/playback/step", post(step_forward_handler))
            .route("/api/export/{format}", get(export_handler))
            // WebSocket for real-time updates
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.session.clone())
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://{}", addr);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

async fn algorithms_handler() -> Json<&'static [AlgorithmInfo]> {
    Json(registry())
}

async fn status_handler(State(session): State<Session>) -> Json<PlaybackStatus> {
    Json(session.status().await)
}

async fn step_handler(State(session): State<Session>) -> Json<Step> {
    Json(session.view().await)
}

async fn snapshot_handler(State(session): State<Session>) -> Json<SessionUpdate> {
    Json(session.snapshot().await)
}

async fn generate_handler(State(session): State<Session>) -> Json<PlaybackStatus> {
    Json(session.generate_array().await)
}

#[derive(Deserialize)]
struct SizeRequest {
    size: usize,
}

async fn size_handler(
    State(session): State<Session>,
    Json(req): Json<SizeRequest>,
) -> Result<Json<PlaybackStatus>> {
    Ok(Json(session.set_array_size(req.size).await?))
}

#[derive(Deserialize)]
struct AlgorithmRequest {
    algorithm: String,
}

async fn algorithm_handler(
    State(session): State<Session>,
    Json(req): Json<AlgorithmRequest>,
) -> Result<Json<PlaybackStatus>> {
    let algorithm: AlgorithmId = req.algorithm.parse()?;
    Ok(Json(session.select_algorithm(algorithm).await))
}

#[derive(Deserialize)]
struct SpeedRequest {
    speed: u8,
}

async fn speed_handler(
    State(session): State<Session>,
    Json(req): Json<SpeedRequest>,
) -> Json<PlaybackStatus> {
    Json(session.set_speed(Speed::new(req.speed)).await)
}

async fn start_handler(State(session): State<Session>) -> Json<PlaybackStatus> {
    Json(session.start().await)
}

async fn pause_handler(State(session): State<Session>) -> Json<PlaybackStatus> {
    Json(session.pause().await)
}

async fn stop_handler(State(session): State<Session>) -> Json<PlaybackStatus> {
    Json(session.stop().await)
}

async fn step_forward_handler(State(session): State<Session>) -> Json<PlaybackStatus> {
    Json(session.step_forward().await)
}

async fn export_handler(
    State(session): State<Session>,
    Path(format): Path<String>,
) -> Result<Response> {
    let format: ExportFormat = format.parse()?;
    let data = session
        .inspect(|playback| ExportData::capture(playback, Utc::now()))
        .await;
    let body = data.render(format)?;
    let disposition = format!("attachment; filename=\"{}\"", data.file_name(format));

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

async fn ws_handler(ws: WebSocketUpgrade, State(session): State<Session>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, session))
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetStatus,
    Start,
    Pause,
    Stop,
    Step,
    Generate,
    SetSpeed { speed: u8 },
    SelectAlgorithm { algorithm: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsMessage {
    Update(SessionUpdate),
    Error { message: String },
}

async fn handle_ws(mut socket: WebSocket, session: Session) {
    // Subscribe first so no change between snapshot and loop is missed
    let mut updates = session.subscribe();

    let initial = WsMessage::Update(session.snapshot().await);
    if !send(&mut socket, &initial).await {
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => match msg {
                Some(Ok(Message::Text(text))) => {
                    let reply = match serde_json::from_str::<WsCommand>(text.as_str()) {
                        Ok(cmd) => handle_ws_command(&session, cmd).await,
                        Err(e) => Some(WsMessage::Error { message: e.to_string() }),
                    };
                    if let Some(reply) = reply {
                        if !send(&mut socket, &reply).await {
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            update = updates.recv() => match update {
                Ok(update) => {
                    if !send(&mut socket, &WsMessage::Update(update)).await {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "websocket client lagging");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
}

/// Apply a command. State changes reach the client through the update
/// stream, so only queries and failures produce a direct reply.
async fn handle_ws_command(session: &Session, cmd: WsCommand) -> Option<WsMessage> {
    let result = match cmd {
        WsCommand::GetStatus => return Some(WsMessage::Update(session.snapshot().await)),
        WsCommand::Start => Ok(session.start().await),
        WsCommand::Pause => Ok(session.pause().await),
        WsCommand::Stop => Ok(session.stop().await),
        WsCommand::Step => Ok(session.step_forward().await),
        WsCommand::Generate => Ok(session.generate_array().await),
        WsCommand::SetSpeed { speed } => Ok(session.set_speed(Speed::new(speed)).await),
        WsCommand::SelectAlgorithm { algorithm } => match algorithm.parse::<AlgorithmId>() {
            Ok(id) => Ok(session.select_algorithm(id).await),
            Err(e) => Err(Error::from(e)),
        },
    };

    result.err().map(|e| WsMessage::Error {
        message: e.to_string(),
    })
}

async fn send(socket: &mut WebSocket, msg: &WsMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode websocket message");
            true
        }
    }
}
