//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use tower_http::services::ServeDir;

use puzzlebox_content::ContentLibrary;
use puzzlebox_static::assets::AssetPipeline;
use puzzlebox_static::{Missing, RenderError, SiteConfig, SiteRenderer};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, HmrHub, HmrMessage};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Directory containing `blog/` and `puzzles/`
    pub content_dir: PathBuf,

    /// Static files served when no route matches
    pub public_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Site metadata
    pub site: SiteConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            public_dir: PathBuf::from("public"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            site: SiteConfig::default(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
struct ServerState {
    renderer: SiteRenderer,
    hmr: HmrHub,
    ws_url: String,
}

type SharedState = Arc<ServerState>;

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr_str = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|_| ServerError::InvalidAddress(addr_str.clone()))?;

        let state = Arc::new(ServerState {
            renderer: SiteRenderer::new(
                self.config.site.clone(),
                ContentLibrary::new(&self.config.content_dir),
            )
            .with_hmr(true),
            hmr: HmrHub::new(),
            ws_url: format!("ws://{}/__hmr", addr),
        });

        // Set up file watcher
        let watch_paths = vec![
            self.config.content_dir.clone(),
            self.config.public_dir.clone(),
        ];

        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

        // Spawn file watch handler
        let hmr = state.hmr.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&hmr, event);
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config.public_dir);

        tracing::info!("Starting dev server at http://{}", addr);

        // Open browser if configured
        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Build the router: site pages, assets, live reload, then the public directory.
fn router(state: SharedState, public_dir: &std::path::Path) -> Router {
    let not_found: MethodRouter = get(not_found_handler).with_state(Arc::clone(&state));

    Router::new()
        .route("/", get(index_handler))
        .route("/blog/{slug}", get(blog_handler))
        .route("/blog/{slug}/", get(blog_handler))
        .route("/puzzles/{slug}", get(puzzle_handler))
        .route("/puzzles/{slug}/", get(puzzle_handler))
        .route("/assets/main.css", get(css_handler))
        .route("/assets/main.js", get(js_handler))
        .route("/__hmr", get(ws_handler))
        .route("/__hmr.js", get(hmr_script_handler))
        .fallback_service(ServeDir::new(public_dir).fallback(not_found))
        .with_state(state)
}

/// Handle file watch events.
fn handle_watch_event(hmr: &HmrHub, event: WatchEvent) {
    match event {
        WatchEvent::ContentModified(path) => {
            tracing::info!("Content modified: {}", path.display());
        }
        WatchEvent::Created(path) => {
            tracing::info!("Created: {}", path.display());
        }
        WatchEvent::Deleted(path) => {
            tracing::info!("Deleted: {}", path.display());
        }
        WatchEvent::Modified(path) => {
            tracing::debug!("Modified: {}", path.display());
        }
    }

    // Pages are rendered on request, so a reload picks up every change
    hmr.send(HmrMessage::Reload);
}

/// Turn a rendered page into a response, or a 404 page when there is no content.
fn page_response(
    state: &ServerState,
    rendered: Result<Option<String>, RenderError>,
    missing: Missing,
    path: &str,
) -> Response {
    match rendered {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => not_found_response(state, missing, path),
        Err(e) => error_response(e),
    }
}

fn not_found_response(state: &ServerState, missing: Missing, path: &str) -> Response {
    match state.renderer.render_not_found(missing, path) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(error: RenderError) -> Response {
    tracing::error!("Failed to render page: {}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!("<h1>Render error</h1><pre>{}</pre>", error)),
    )
        .into_response()
}

/// Handler for the home page.
async fn index_handler(State(state): State<SharedState>) -> Response {
    match state.renderer.render_home() {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for blog post pages.
async fn blog_handler(Path(slug): Path<String>, State(state): State<SharedState>) -> Response {
    let rendered = state.renderer.render_blog_post(&slug);
    page_response(&state, rendered, Missing::BlogPost, &format!("blog/{}", slug))
}

/// Handler for puzzle pages.
async fn puzzle_handler(Path(slug): Path<String>, State(state): State<SharedState>) -> Response {
    let rendered = state.renderer.render_puzzle(&slug);
    page_response(&state, rendered, Missing::Puzzle, &format!("puzzles/{}", slug))
}

/// Handler for anything that is neither a route nor a public file.
async fn not_found_handler(State(state): State<SharedState>) -> Response {
    not_found_response(&state, Missing::Page, "")
}

async fn css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        AssetPipeline::generate_css(),
    )
}

async fn js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        AssetPipeline::generate_js(),
    )
}

/// Handler for the HMR WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = state.hmr.subscribe();

    if send_message(&mut socket, &HmrMessage::Connected)
        .await
        .is_err()
    {
        return;
    }

    // Forward HMR messages to the client
    while let Ok(hmr_msg) = rx.recv().await {
        if send_message(&mut socket, &hmr_msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &HmrMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}

/// Handler for the HMR client script.
async fn hmr_script_handler(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        hmr_client_script(&state.ws_url),
    )
}
