//! WPT Server
//! - REST evaluation and sweep endpoints
//! - WebSocket push of results (JSON) and sweep frames (binary)
//! - Static UI files

use anyhow::{Context, Result};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use clap::Parser;
use futures::{SinkExt, StreamExt};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::sync::{broadcast, RwLock};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wpt_engine::{Engine, EngineConfig};

mod api;
mod frames;

#[derive(Parser, Debug)]
#[command(name = "wpt-server")]
#[command(about = "HTTP and WebSocket front end for the inductive link engine")]
struct Args {
    /// Listen port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Directory served for non-API paths
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// JSON file overriding physical constants
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum Push {
    Result(String),
    Sweep(Vec<u8>),
}

pub struct AppState {
    pub engine: Engine,
    pub push_tx: broadcast::Sender<Push>,
    pub latest_result: RwLock<Option<String>>,
    pub latest_sweep: RwLock<Option<Vec<u8>>>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        let (push_tx, _) = broadcast::channel(16);
        Self {
            engine,
            push_tx,
            latest_result: RwLock::new(None),
            latest_sweep: RwLock::new(None),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            EngineConfig::from_json(&json).with_context(|| format!("Invalid config file: {:?}", path))
        }
        None => Ok(EngineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let state = Arc::new(AppState::new(Engine::new(load_config(args.config.as_ref())?)));

    info!("Serving static files from {:?}", args.static_dir);

    let app = Router::new()
        .route("/api/simulate", post(api::simulate))
        .route("/api/sweep/airgap", get(api::sweep_airgap))
        .route("/api/sweep/frequency", get(api::sweep_frequency))
        .route("/ws", get(ws_handler))
        .fallback_service(ServeDir::new(&args.static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Server: http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

fn to_message(push: Push) -> Message {
    match push {
        Push::Result(text) => Message::Text(text),
        Push::Sweep(frame) => Message::Binary(frame),
    }
}

/// Cached result and sweep frame sent to a client on connect
async fn replay(state: &AppState) -> Vec<Message> {
    let mut messages = Vec::new();
    if let Some(text) = state.latest_result.read().await.clone() {
        messages.push(Message::Text(text));
    }
    if let Some(frame) = state.latest_sweep.read().await.clone() {
        messages.push(Message::Binary(frame));
    }
    messages
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.push_tx.subscribe();

    for message in replay(&state).await {
        let _ = sender.send(message).await;
    }

    loop {
        tokio::select! {
            Ok(push) = rx.recv() => {
                if sender.send(to_message(push)).await.is_err() {
                    break;
                }
            }
            Some(msg) = receiver.next() => {
                match msg {
                    Ok(Message::Close(_)) | Err(_) => break,
                    _ => {}
                }
            }
            else => break,
        }
    }
}
