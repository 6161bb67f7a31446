/*!
 * HTTP service
 * Every POST, on any path, performs one read cycle and answers with the
 * JSON document or a plain-text error.
 */

use std::net::SocketAddr;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::identity::ReadError;
use crate::worker::ReaderHandle;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 13765;

const JSON_UTF8: &str = "application/json; charset=utf-8";
const TEXT_UTF8: &str = "text/plain; charset=utf-8";

#[derive(Clone)]
struct AppState {
    reader: ReaderHandle,
}

/// Builds the service. Cross-origin reads are only answered for the origins
/// in `allow_origins`; with an empty list no CORS headers are ever sent.
pub fn router(reader: ReaderHandle, allow_origins: Vec<HeaderValue>) -> Router {
    let mut app = Router::new()
        .route("/", post(read_card))
        .route("/*path", post(read_card));

    if !allow_origins.is_empty() {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allow_origins))
                .allow_methods([Method::POST]),
        );
    }

    app.layer(TraceLayer::new_for_http())
        .with_state(AppState { reader })
}

/// Serves the card reader on `addr` until the process is stopped.
pub async fn serve(
    addr: SocketAddr,
    reader: ReaderHandle,
    allow_origins: Vec<HeaderValue>,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Card reader service listening on {}", listener.local_addr()?);
    if !allow_origins.is_empty() {
        info!("Cross-origin reads allowed for {:?}", allow_origins);
    }
    axum::serve(listener, router(reader, allow_origins)).await
}

async fn read_card(State(state): State<AppState>) -> Response {
    info!("Identity read request");

    match state.reader.read().await {
        Ok(payload) => match serde_json::to_string(&payload) {
            Ok(body) => respond(StatusCode::OK, JSON_UTF8, body),
            Err(err) => respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                TEXT_UTF8,
                format!("Error: {}", err),
            ),
        },
        Err(err) => err.into_response(),
    }
}

impl IntoResponse for ReadError {
    fn into_response(self) -> Response {
        warn!("Identity read failed: {}", self);
        respond(
            StatusCode::INTERNAL_SERVER_ERROR,
            TEXT_UTF8,
            format!("Error: {}", self),
        )
    }
}

fn respond(status: StatusCode, content_type: &'static str, body: String) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, body.len().to_string()),
        ],
        body,
    )
        .into_response()
}
