//! Configuration module for the dashboard backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Default brand text printed in the report header band.
pub const DEFAULT_REPORT_BRAND: &str = "Painel de Vendas";

/// Default footer address line printed on every report page.
pub const DEFAULT_REPORT_FOOTER: &str = "Operações Comerciais - Av. Paulista, 1000 - São Paulo/SP";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Root directory of the per-store PDF archive
    pub reports_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Brand text for the report header band
    pub report_brand: String,
    /// Footer address line for every report page
    pub report_footer: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("PAINEL_DB_PATH")
            .unwrap_or_else(|_| "./data/painel.sqlite".to_string())
            .into();

        let reports_dir = env::var("PAINEL_REPORTS_DIR")
            .unwrap_or_else(|_| "./static/pdfs".to_string())
            .into();

        let bind_addr = env::var("PAINEL_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let log_level = env::var("PAINEL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let report_brand =
            env::var("PAINEL_REPORT_BRAND").unwrap_or_else(|_| DEFAULT_REPORT_BRAND.to_string());

        let report_footer =
            env::var("PAINEL_REPORT_FOOTER").unwrap_or_else(|_| DEFAULT_REPORT_FOOTER.to_string());

        Ok(Self {
            db_path,
            reports_dir,
            bind_addr,
            log_level,
            report_brand,
            report_footer,
        })
    }
}
