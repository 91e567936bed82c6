//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for stores, salespeople, weekly counters and events.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lojas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            responsavel TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vendedores (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            email TEXT,
            loja_id INTEGER REFERENCES lojas(id) ON DELETE SET NULL,
            status TEXT,
            base_tratada INTEGER DEFAULT 0,
            disparos_dia INTEGER DEFAULT 0,
            ultimo_status_tipo TEXT,
            ultimo_status_data TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One record per salesperson; the UNIQUE constraint backs the atomic upsert.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS disparos_semanais (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            vendedor_id INTEGER NOT NULL UNIQUE REFERENCES vendedores(id) ON DELETE CASCADE,
            segunda INTEGER NOT NULL DEFAULT 0,
            terca INTEGER NOT NULL DEFAULT 0,
            quarta INTEGER NOT NULL DEFAULT 0,
            quinta INTEGER NOT NULL DEFAULT 0,
            sexta INTEGER NOT NULL DEFAULT 0,
            sabado INTEGER NOT NULL DEFAULT 0,
            domingo INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS eventos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT,
            data_evento TEXT,
            loja_id INTEGER REFERENCES lojas(id) ON DELETE SET NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_vendedores_loja_id ON vendedores(loja_id);
        CREATE INDEX IF NOT EXISTS idx_eventos_data_evento ON eventos(data_evento);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
