//! Per-store PDF reports.
//!
//! A report is laid out into pages, serialized to PDF, archived under the reports
//! directory and handed back in memory for immediate download.

mod archive;
mod layout;
mod metrics;
mod pdf;
mod render;
mod styles;

pub use archive::*;
pub use layout::*;
pub use metrics::*;
pub use pdf::*;
pub use render::*;
pub use styles::*;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::dashboard::assemble_report_data;
use crate::db::Repository;
use crate::errors::AppError;

pub const PDF_MIME: &str = "application/pdf";

/// A generated report, already written to the archive.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub path: PathBuf,
    pub pages: usize,
}

/// Generate today's report for a store.
pub async fn generate_report(
    repo: &Repository,
    styles: &ReportStyles,
    reports_dir: &Path,
    store_id: i64,
    note: Option<&str>,
) -> Result<RenderedReport, AppError> {
    generate_report_on(repo, styles, reports_dir, store_id, note, Local::now().date_naive()).await
}

/// Generate the report of a store as of `date`.
///
/// Nothing is written unless rendering succeeds.
pub async fn generate_report_on(
    repo: &Repository,
    styles: &ReportStyles,
    reports_dir: &Path,
    store_id: i64,
    note: Option<&str>,
    date: NaiveDate,
) -> Result<RenderedReport, AppError> {
    let data = assemble_report_data(repo, store_id).await?;
    let rendered = render_report(&data, note, date, styles)?;

    let path = report_path(reports_dir, &data.store.name, date);
    persist_report(&path, &rendered.bytes).await?;

    tracing::info!(
        store_id,
        salespeople = data.salespeople.len(),
        pages = rendered.pages,
        "Report written to {:?}",
        path
    );

    Ok(RenderedReport {
        bytes: rendered.bytes,
        file_name: report_file_name(&data.store.name, date),
        path,
        pages: rendered.pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::models::{NewSalesperson, SalespersonStatus, WeekCounts};
    use tempfile::TempDir;

    async fn setup() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn styles() -> ReportStyles {
        ReportStyles::new("Painel de Vendas", "Av. Central, 100")
    }

    fn oct_16() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn files_under(dir: &Path) -> usize {
        if !dir.exists() {
            return 0;
        }
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    files_under(&path)
                } else {
                    1
                }
            })
            .sum()
    }

    #[tokio::test]
    async fn test_missing_store_is_not_found_and_writes_nothing() {
        let (repo, temp_dir) = setup().await;
        let reports_dir = temp_dir.path().join("pdfs");

        let err = generate_report_on(&repo, &styles(), &reports_dir, 404, None, oct_16())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(files_under(&reports_dir), 0);
    }

    #[tokio::test]
    async fn test_empty_store_report_is_persisted_without_table() {
        let (repo, temp_dir) = setup().await;
        let reports_dir = temp_dir.path().join("pdfs");
        let store = repo.create_store("Loja Vazia", "Marta").await.unwrap();

        let report = generate_report_on(&repo, &styles(), &reports_dir, store.id, None, oct_16())
            .await
            .unwrap();

        assert_eq!(report.file_name, "Relatorio_Loja_Vazia_20261016.pdf");
        assert_eq!(
            report.path,
            reports_dir.join("Loja_Vazia").join("Relatorio_Loja_Vazia_20261016.pdf")
        );
        assert!(report.bytes.starts_with(b"%PDF"));
        assert_eq!(std::fs::read(&report.path).unwrap(), report.bytes);
        assert_eq!(report.pages, 1);
    }

    #[tokio::test]
    async fn test_same_day_report_overwrites_previous() {
        let (repo, temp_dir) = setup().await;
        let reports_dir = temp_dir.path().join("pdfs");
        let store = repo.create_store("Loja Norte", "Paulo").await.unwrap();
        let id = repo
            .create_salesperson(&NewSalesperson {
                name: "Bruno".into(),
                email: None,
                store_id: Some(store.id),
                status: SalespersonStatus::Restricted,
                base_treated: false,
                daily_disparos: 3,
                last_status_type: None,
                last_status_date: None,
            })
            .await
            .unwrap()
            .id;
        repo.upsert_weekly_disparos(id, &WeekCounts::from_fn(|_| 5))
            .await
            .unwrap();

        let first = generate_report_on(&repo, &styles(), &reports_dir, store.id, None, oct_16())
            .await
            .unwrap();
        let second = generate_report_on(
            &repo,
            &styles(),
            &reports_dir,
            store.id,
            Some("Segunda via"),
            oct_16(),
        )
        .await
        .unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(files_under(&reports_dir), 1);
        assert_eq!(std::fs::read(&second.path).unwrap(), second.bytes);
    }
}
