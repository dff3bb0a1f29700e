use anyhow::{Result, anyhow};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

pub(crate) fn build_cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| anyhow!("invalid CORS origin: {err}"))?;

        CorsLayer::new().allow_origin(origins)
    };

    Ok(layer
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]))
}

pub(crate) fn apply_cors(router: Router, origins: &[String]) -> Result<Router> {
    let cors = build_cors_layer(origins)?;
    Ok(router.layer(cors))
}

#[cfg(test)]
mod tests {
    use super::build_cors_layer;

    #[test]
    fn wildcard_and_listed_origins_build() {
        assert!(build_cors_layer(&["*".to_string()]).is_ok());
        assert!(build_cors_layer(&["http://localhost:3000".to_string()]).is_ok());
    }

    #[test]
    fn origin_with_newline_is_rejected() {
        assert!(build_cors_layer(&["http://bad\norigin".to_string()]).is_err());
    }
}
