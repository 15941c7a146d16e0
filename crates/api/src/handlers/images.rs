//! Local-mode image serving.
//!
//! In local-dir mode the snapshot's display URLs point at
//! `/images/{file}`, served here. In URL mode the browser loads the
//! absolute URL directly; a request landing here anyway is redirected.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

use facepair_core::ImageSource;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /images/{file}
///
/// A missing file is a 404 for this one image; the annotation flow
/// continues and the page shows an inline load error.
pub async fn get_image(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> AppResult<Response> {
    match state.resolver.resolve(&file)? {
        ImageSource::Path(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| AppError::InternalError(format!("could not read {}: {e}", path.display())))?;

            Ok(Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type_for_extension(&file))
                .header(header::CONTENT_LENGTH, bytes.len().to_string())
                .body(Body::from(bytes))
                .map_err(|e| AppError::InternalError(e.to_string()))?)
        }
        ImageSource::Url(url) => Ok(Redirect::temporary(&url).into_response()),
    }
}

/// Map a file extension to its image content type.
fn content_type_for_extension(file: &str) -> &'static str {
    let extension = file.rsplit('.').next().unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_extensions_map_to_image_types() {
        assert_eq!(content_type_for_extension("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for_extension("a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for_extension("a.png"), "image/png");
        assert_eq!(content_type_for_extension("a.webp"), "image/webp");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(content_type_for_extension("a.tiff"), "application/octet-stream");
        assert_eq!(content_type_for_extension("noext"), "application/octet-stream");
    }
}
