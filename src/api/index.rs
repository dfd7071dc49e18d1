use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::assets::AssetLoader;

/// Serve the upload page
pub async fn handle_index() -> Response {
    serve_static("index.html")
}

/// Serve other embedded static files
pub async fn handle_static(Path(path): Path<String>) -> Response {
    serve_static(&path)
}

fn serve_static(path: &str) -> Response {
    match AssetLoader::static_file(path) {
        Some(file) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, file.content_type)],
            file.data.into_owned(),
        )
            .into_response(),
        None => {
            tracing::debug!(path = %path, "Static file not found");
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}
