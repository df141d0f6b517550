//! HTTP server: redirects, data API, sitemap and feed, plus the public directory

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate::{feed_xml, sitemap_xml};
use crate::content::loader::{data_file_path, parse_data};
use crate::content::{ContentLoader, DataError};
use crate::documents::ContentRecord;
use crate::listing::{self, ListingQuery};
use crate::redirects::{build_destination, filter_redirects, qualify, RedirectIndex, RedirectKind};
use crate::Site;

/// Server state, immutable after startup
struct ServerState {
    site: Site,
    redirects: RedirectIndex,
    records: Vec<ContentRecord>,
}

/// Query parameters of the redirect listing
#[derive(Debug, Default, Deserialize)]
struct RedirectListQuery {
    search: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl IntoResponse for DataError {
    fn into_response(self) -> Response {
        let status = match &self {
            DataError::NotFound(_) => StatusCode::NOT_FOUND,
            DataError::Io(_) | DataError::Parse { .. } => {
                tracing::error!("Data API error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

/// Build the application router for a site
pub fn router(site: &Site) -> Result<Router> {
    let loader = ContentLoader::new(site);
    let redirects = RedirectIndex::new(loader.load_redirects()?);
    let records = loader.load_records()?;

    tracing::info!(
        "Serving {} redirects ({} keys) and {} pages",
        redirects.table().len(),
        redirects.key_count(),
        records.len()
    );

    let state = Arc::new(ServerState {
        site: site.clone(),
        redirects,
        records,
    });

    let sitemap_route = format!("/{}", site.config.sitemap_path.trim_start_matches('/'));
    let feed_route = format!("/{}", site.config.feed_path.trim_start_matches('/'));

    Ok(Router::new()
        .route("/api/redirect/:query", get(redirect_handler))
        .route("/api/redirects", get(redirects_handler))
        .route("/api/status", get(status_handler))
        .route("/api/:slug", get(data_handler))
        .route(&sitemap_route, get(sitemap_handler))
        .route(&feed_route, get(feed_handler))
        .fallback_service(ServeDir::new(&site.public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(site)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolve a token and answer with a 302; misses go to the not-found path
async fn redirect_handler(
    State(state): State<Arc<ServerState>>,
    Path(query): Path<String>,
) -> Response {
    let config = state.site.config.destination();
    let resolution = state.redirects.resolve(&query);
    let destination = build_destination(resolution, &config);
    let location = qualify(&destination, &config.default_base);

    match resolution.record() {
        Some(record) => tracing::debug!("Redirect {:?} -> {} ({})", query, location, record.name),
        None => tracing::debug!("Redirect {:?} not found, sending to {}", query, location),
    }

    match HeaderValue::try_from(location.as_str()) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(e) => {
            tracing::error!("Invalid redirect location {:?}: {}", location, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect location").into_response()
        }
    }
}

/// List redirects, optionally searched and filtered by type
async fn redirects_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<RedirectListQuery>,
) -> Response {
    let kind = match params.kind.as_deref().filter(|k| !k.is_empty()) {
        Some(kind) => match kind.parse::<RedirectKind>() {
            Ok(kind) => Some(kind),
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        },
        None => None,
    };

    let filtered = filter_redirects(state.redirects.table(), params.search.as_deref(), kind);
    Json(filtered).into_response()
}

/// Deployment summary
async fn status_handler(State(state): State<Arc<ServerState>>) -> Response {
    Json(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "pageCount": state.records.len(),
        "redirectCount": state.redirects.table().len(),
    }))
    .into_response()
}

/// Search, sort and paginate a JSON data file
async fn data_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
    Query(query): Query<ListingQuery>,
) -> Result<Response, DataError> {
    let path = data_file_path(&state.site.data_dir, &slug)?;
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataError::NotFound(slug.clone()),
            _ => DataError::Io(e),
        })?;
    let data = parse_data(&slug, &content)?;

    let response = listing::apply(data, &query, &slug, state.site.config.listing_limit);
    Ok(Json(response).into_response())
}

async fn sitemap_handler(State(state): State<Arc<ServerState>>) -> Response {
    let xml = sitemap_xml(&state.site, &state.records);
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response()
}

async fn feed_handler(State(state): State<Arc<ServerState>>) -> Response {
    let xml = feed_xml(&state.site, &state.records);
    ([(header::CONTENT_TYPE, "application/atom+xml; charset=utf-8")], xml).into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
