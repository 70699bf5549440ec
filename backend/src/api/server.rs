//! HTTP Server for the mint page.
//!
//! Serves the page configuration, decoded sale state and backend logs.
//! Minting itself happens in the browser wallet.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | GET    | `/api/config`     | Public mint page configuration       |
//! | GET    | `/api/sale-state` | Decoded candy machine sale state     |
//! | GET    | `/api/logs`       | SSE stream for real-time logs        |

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::get,
    Router,
};
use candy_mint_core::{MintConfig, PublicKey, SaleState};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use super::logs::LOG_BROADCASTER;
use super::types::{error_response, SaleStateQuery};
use crate::error::ServerError;
use crate::rpc::RpcClient;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<MintConfig>,
    pub client: RpcClient,
}

impl AppState {
    pub fn new(config: MintConfig) -> Self {
        let client = RpcClient::from_config(&config);
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(err: ServerError) -> ApiError {
    log::error!("❌ {}", err);
    (err.status(), Json(error_response(&err.to_string())))
}

/// Build the router. With `dist`, unknown paths serve the built front-end.
pub fn router(state: AppState, dist: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let api = Router::new()
        .route("/health", get(health))
        .route("/api/config", get(config))
        .route("/api/sale-state", get(sale_state))
        .route("/api/logs", get(sse_logs))
        .with_state(state);

    let app = match dist {
        Some(dir) => {
            let index = dir.join("index.html");
            api.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => api.route("/", get(health)),
    };

    app.layer(cors)
}

/// Start the HTTP server
pub async fn start_server(
    config: MintConfig,
    port: u16,
    dist: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🍬 Candy machine: {}", config.candy_machine_id);
    println!("   Network: {} ({})", config.network, config.rpc_host);
    if let Some(ref dir) = dist {
        println!("   Front-end: {}", dir.display());
    }

    let app = router(AppState::new(config), dist);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Candy mint server running on http://localhost:{}", port);
    println!("   GET  /api/config     - Mint page configuration");
    println!("   GET  /api/sale-state - Candy machine sale state");
    println!("   GET  /api/logs       - SSE log stream");
    println!("   GET  /health         - Health check");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "candy-mint",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "config": "GET /api/config",
            "saleState": "GET /api/sale-state?candyMachineId=",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// Public configuration for the front-end
async fn config(State(state): State<AppState>) -> Json<MintConfig> {
    Json(state.config.as_ref().clone())
}

/// Sale state of the requested (or configured) candy machine
async fn sale_state(
    State(state): State<AppState>,
    Query(query): Query<SaleStateQuery>,
) -> Result<Json<SaleState>, ApiError> {
    let id = query
        .requested_id()
        .map(PublicKey::new)
        .unwrap_or_else(|| state.config.candy_machine_id.clone());

    state
        .client
        .fetch_sale_state(&id)
        .await
        .map(Json)
        .map_err(|e| api_error(e.into()))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candy_machine::tests::{account_bytes, sample_account};
    use crate::rpc::stub;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use candy_mint_core::config::CANDY_MACHINE_PROGRAM;
    use std::fs;
    use tempfile::TempDir;

    const CM: &str = "9cm1mZ3zvuZcWTHsMg4ovkRbkbKkHBWgWS34ryPWMZrB";

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn setup(dist: Option<PathBuf>) -> (stub::StubNode, String) {
        let node = stub::spawn(|req| {
            json!({
                "jsonrpc": "2.0",
                "id": req["id"],
                "result": {
                    "context": {"slot": 1},
                    "value": {
                        "data": [STANDARD.encode(account_bytes(&sample_account())), "base64"],
                        "owner": CANDY_MACHINE_PROGRAM,
                        "lamports": 1_000_000,
                        "executable": false
                    }
                }
            })
        })
        .await;

        let config = MintConfig::new(PublicKey::new(CM)).with_rpc_host(node.url.clone());
        let base = serve(router(AppState::new(config), dist)).await;
        (node, base)
    }

    #[tokio::test]
    async fn test_health_and_config() {
        let (_node, base) = setup(None).await;

        let health: Value = reqwest::get(format!("{}/health", base)).await.unwrap().json().await.unwrap();
        assert_eq!(health["status"], "ok");

        let config: MintConfig = reqwest::get(format!("{}/api/config", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(config.candy_machine_id.as_str(), CM);
        assert_eq!(config.tx_timeout_ms, 30_000);
    }

    #[tokio::test]
    async fn test_sale_state_defaults_to_configured_machine() {
        let (node, base) = setup(None).await;

        let state: SaleState = reqwest::get(format!("{}/api/sale-state", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(state.candy_machine_id.as_str(), CM);
        assert_eq!(state.items_remaining, 60);
        assert_eq!(node.calls()[0]["params"][0], CM);
    }

    #[tokio::test]
    async fn test_sale_state_bad_id() {
        let (node, base) = setup(None).await;

        let response = reqwest::get(format!("{}/api/sale-state?candyMachineId=nope", base))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "error");
        assert!(node.calls().is_empty());
    }

    #[tokio::test]
    async fn test_serves_front_end() {
        let dist = TempDir::new().unwrap();
        fs::write(dist.path().join("index.html"), "<html>mint</html>").unwrap();
        fs::write(dist.path().join("app.js"), "console.log('mint')").unwrap();
        let (_node, base) = setup(Some(dist.path().to_path_buf())).await;

        let js = reqwest::get(format!("{}/app.js", base)).await.unwrap().text().await.unwrap();
        assert_eq!(js, "console.log('mint')");

        // Unknown paths fall back to the page itself.
        let page = reqwest::get(format!("{}/mint", base)).await.unwrap().text().await.unwrap();
        assert_eq!(page, "<html>mint</html>");

        let health = reqwest::get(format!("{}/health", base)).await.unwrap();
        assert!(health.status().is_success());
    }
}
