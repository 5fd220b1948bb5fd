//! CRUD API server binary.
//!
//! Command-line flags take precedence over the `CLEAN_CRUD_*`, `DATABASE_URL`
//! and `DOCUMENT_URL` environment variables, which take precedence over built-in defaults.

use std::net::IpAddr;

use clap::Parser;
use clean_crud::api::{self, Config, ServerError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("API server error: {0}")]
    #[diagnostic(code(clean_crud::binary::api))]
    Api(#[from] ServerError),
}

#[derive(Parser)]
#[command(name = "clean-crud-api")]
#[command(author, version, about = "CRUD API server", long_about = None)]
struct Cli {
    /// Host address to bind to [env: CLEAN_CRUD_HOST, default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on [env: CLEAN_CRUD_PORT, default: 3000]
    #[arg(short, long)]
    port: Option<u16>,

    /// sqlx connection string for users and customers [env: DATABASE_URL, default: sqlite::memory:]
    #[arg(long)]
    database_url: Option<String>,

    /// SurrealDB endpoint for products [env: DOCUMENT_URL, default: mem://]
    #[arg(long)]
    document_url: Option<String>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new();
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(url) = self.database_url {
            config = config.with_database_url(url);
        }
        if let Some(url) = self.document_url {
            config = config.with_document_url(url);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let config = Cli::parse().into_config();
    api::run(config).await?;
    Ok(())
}
