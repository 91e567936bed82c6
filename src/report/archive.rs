//! On-disk report archive: `<root>/<store>/Relatorio_<store>_<YYYYMMDD>.pdf`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::errors::AppError;

const ALLOWED_PUNCTUATION: &str = "-_.() ";

/// Keep ASCII letters, digits, space and `-_.()`, then turn spaces into underscores.
///
/// Input with nothing left to keep becomes `file`.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(*c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Base name of the archived report for a store on a given day.
pub fn report_file_name(store_name: &str, date: NaiveDate) -> String {
    format!(
        "Relatorio_{}_{}.pdf",
        sanitize_filename(store_name),
        date.format("%Y%m%d")
    )
}

/// Full archive path: one subdirectory per store.
pub fn report_path(root: &Path, store_name: &str, date: NaiveDate) -> PathBuf {
    root.join(sanitize_filename(store_name))
        .join(report_file_name(store_name, date))
}

/// Write `bytes` to `path`, replacing any earlier report of the same day.
///
/// The bytes go to a sibling `.tmp` file first and are renamed into place, so the final
/// path only ever holds a complete document.
pub async fn persist_report(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let parent = path
        .parent()
        .ok_or_else(|| AppError::Internal(format!("Report path {:?} has no parent", path)))?;
    tokio::fs::create_dir_all(parent).await?;

    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    let written = match tokio::fs::write(&staging, bytes).await {
        Ok(()) => tokio::fs::rename(&staging, path).await,
        Err(err) => Err(err),
    };
    if let Err(err) = written {
        tokio::fs::remove_file(&staging).await.ok();
        return Err(err.into());
    }
    Ok(())
}
