//! HTTP handlers for the sheet server
//!
//! Three user-facing routes mirror the form page's flow: render and
//! acknowledge (`/convert`), render and download (`/download`), and
//! the page itself (`/`).

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

/// The form page, embedded at compile time.
const INDEX_HTML: &str = include_str!("../static/index.html");

/// Handler: GET /
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "mabar-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Form body for /convert and /download
#[derive(Deserialize)]
pub struct SheetForm {
    /// The raw roster text, one "number. name" entry per line
    pub text: String,
}

/// Conversion acknowledgment
#[derive(Serialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub message: String,
    pub page_count: usize,
}

/// Handler: POST /convert
///
/// Renders the sheet to confirm the roster converts cleanly, then
/// discards the bytes. The actual file comes from /download.
pub async fn handle_convert(
    State(state): State<AppState>,
    Form(form): Form<SheetForm>,
) -> Result<Json<ConvertResponse>, ServerError> {
    info!("Convert request: {} bytes of text", form.text.len());

    let sheet = sheet_engine::render_sheet(&form.text, state.timeout_ms).await?;
    debug!(
        "Rendered {} page(s), {} bytes",
        sheet.page_count,
        sheet.pdf.len()
    );

    Ok(Json(ConvertResponse {
        success: true,
        message: "PDF generated successfully".to_string(),
        page_count: sheet.page_count,
    }))
}

/// Handler: POST /download
///
/// Renders the sheet and streams it back as a file attachment named
/// after the render date.
pub async fn handle_download(
    State(state): State<AppState>,
    Form(form): Form<SheetForm>,
) -> Result<impl IntoResponse, ServerError> {
    info!("Download request: {} bytes of text", form.text.len());

    let sheet = sheet_engine::render_sheet(&form.text, state.timeout_ms).await?;

    let filename = format!(
        "Daftar Pemain Mabar {}.pdf",
        chrono::Local::now().format("%d-%m-%Y")
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, sheet.pdf))
}
