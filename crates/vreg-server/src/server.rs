//! Static registry server.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Configuration for serving a built registry.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the item JSON files
    pub dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public/registry"),
            port: 4000,
            host: "127.0.0.1".to_string(),
            open: false,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Directory not found: {}. Run 'vreg build' first.", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Router serving registry files with CORS open, so installer CLIs and
/// browser-based previews on other origins can fetch items.
pub fn registry_router(dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(CorsLayer::permissive())
}

/// Serves a built registry directory.
pub struct RegistryServer {
    config: ServerConfig,
}

impl RegistryServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Serve until the process is stopped.
    pub async fn start(self) -> Result<(), ServerError> {
        if !self.config.dir.exists() {
            return Err(ServerError::DirectoryNotFound(self.config.dir.clone()));
        }
        serve(&self.config).await
    }
}

/// Bind and serve `config.dir`.
pub(crate) async fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr()?;
    let app = registry_router(&config.dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

    tracing::info!("Serving {} at http://{}", config.dir.display(), addr);

    if config.open {
        let url = format!("http://{}", addr);
        let _ = open::that(&url);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::fs;
    use tempfile::tempdir;
    use tower::ServiceExt;

    #[test]
    fn default_config_serves_public_registry() {
        let config = ServerConfig::default();

        assert_eq!(config.port, 4000);
        assert_eq!(config.dir, PathBuf::from("public/registry"));
        assert_eq!(config.addr().unwrap().port(), 4000);
    }

    #[test]
    fn rejects_bad_host() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };

        assert!(matches!(config.addr(), Err(ServerError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn serves_items_with_cors() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("badge.json"), "{\"name\":\"badge\"}").unwrap();

        let response = registry_router(temp.path())
            .oneshot(
                Request::builder()
                    .uri("/badge.json")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let temp = tempdir().unwrap();

        let response = registry_router(temp.path())
            .oneshot(
                Request::builder()
                    .uri("/nope.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn refuses_missing_directory() {
        let temp = tempdir().unwrap();
        let server = RegistryServer::new(ServerConfig {
            dir: temp.path().join("missing"),
            ..Default::default()
        });

        let result = server.start().await;

        assert!(matches!(result, Err(ServerError::DirectoryNotFound(_))));
    }
}
