//! HTTP boundary: routing, validation, error translation and server startup.

mod error;
mod handlers;
pub mod resource;
mod routes;
mod state;
pub mod validation;


use std::env;
use std::net::{IpAddr, Ipv4Addr};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{ApiError, MessageResponse};
pub use routes::{create_router, entity_routes};
pub use state::AppState;

use crate::container::Container;
use crate::db::DbError;

/// Environment variable overriding the bind address.
pub const HOST_ENV: &str = "CLEAN_CRUD_HOST";
/// Environment variable overriding the port.
pub const PORT_ENV: &str = "CLEAN_CRUD_PORT";
/// Environment variable holding the relational store connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable holding the document store endpoint.
pub const DOCUMENT_URL_ENV: &str = "DOCUMENT_URL";

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// sqlx connection string for the relational store
    pub database_url: String,
    /// SurrealDB endpoint for the document store
    pub document_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            database_url: "sqlite::memory:".to_string(),
            document_url: "mem://".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by any environment variables that are set and parse.
    pub fn new() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var(HOST_ENV)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.host),
            port: env::var(PORT_ENV)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            database_url: env::var(DATABASE_URL_ENV).unwrap_or(defaults.database_url),
            document_url: env::var(DOCUMENT_URL_ENV).unwrap_or(defaults.document_url),
        }
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    pub fn with_document_url(mut self, url: impl Into<String>) -> Self {
        self.document_url = url.into();
        self
    }
}

/// Errors that stop the server from starting or running.
#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error("Store initialisation failed: {0}")]
    #[diagnostic(code(clean_crud::api::store))]
    Store(#[from] DbError),

    #[error("Server I/O error: {0}")]
    #[diagnostic(code(clean_crud::api::io))]
    Io(#[from] std::io::Error),
}

/// Install the fmt subscriber with an env filter, unless one is already set.
fn init_tracing() {
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clean_crud=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    if installed.is_err() {
        debug!("tracing subscriber already installed");
    }
}

/// Run the API server with the given configuration
pub async fn run(config: Config) -> Result<(), ServerError> {
    init_tracing();

    let container = Container::build(&config).await?;
    let app = container.router();

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
