use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use monge_core::{SceneConfig, Session};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

mod commands;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

// Application State
struct AppState {
    session: Arc<RwLock<Session>>,
}

/// Scene configuration from the JSON file named by `MONGE_SCENE_CONFIG`,
/// or the defaults.
fn load_config() -> SceneConfig {
    let Ok(path) = std::env::var("MONGE_SCENE_CONFIG") else {
        return SceneConfig::default();
    };
    match std::fs::read_to_string(&path).map(|text| SceneConfig::from_json(&text)) {
        Ok(Ok(config)) => config,
        Ok(Err(e)) => {
            warn!("Invalid scene config {}: {}, using defaults", path, e);
            SceneConfig::default()
        }
        Err(e) => {
            warn!("Cannot read scene config {}: {}, using defaults", path, e);
            SceneConfig::default()
        }
    }
}

fn bind_addr() -> SocketAddr {
    let addr = std::env::var("MONGE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    addr.parse().unwrap_or_else(|e| {
        warn!("Invalid MONGE_BIND_ADDR {}: {}, using {}", addr, e, DEFAULT_ADDR);
        SocketAddr::from(([127, 0, 0, 1], 3000))
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let shared_state = Arc::new(AppState {
        session: Arc::new(RwLock::new(Session::new("Session1", load_config()))),
    });

    let app = Router::new()
        .route("/", get(root))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    let addr = bind_addr();
    info!("listening on {}", addr);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}

async fn root() -> &'static str {
    "Hello from Monge Backend!"
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("Client connected");

    // Send initial scene state
    let initial = {
        let session = state.session.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        commands::scene_update(&session)
    };
    if socket.send(Message::Text(initial)).await.is_err() {
        return;
    }

    while let Some(msg) = socket.recv().await {
        let msg = if let Ok(msg) = msg {
            msg
        } else {
            return;
        };

        if let Message::Text(text) = msg {
            info!("Received message: {}", text);
            // The lock is released before any await
            let frames = {
                let mut session = state.session.write().unwrap_or_else(|poisoned| poisoned.into_inner());
                commands::handle_text(&mut session, &text)
            };
            for frame in frames {
                if socket.send(Message::Text(frame)).await.is_err() {
                    return;
                }
            }
        }
    }
    info!("Client disconnected");
}
