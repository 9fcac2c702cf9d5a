use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use clubdeck_core::AppError;
use tower_http::cors::CorsLayer;

pub(super) fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(frontend_url.trim_end_matches('/'))
        .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}

#[cfg(test)]
mod tests {
    use super::build_cors_layer;

    #[test]
    fn frontend_origin_must_be_a_valid_header() {
        assert!(build_cors_layer("http://localhost:3000").is_ok());
        assert!(build_cors_layer("http://localhost:3000\n").is_err());
    }
}
