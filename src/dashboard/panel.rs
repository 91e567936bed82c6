//! Global dashboard KPIs.

use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use super::join_weekly_disparos;
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{weekday_label, SalespersonWithDisparos};

/// Value of `dia_mais_bloqueio` when nobody is blocked.
pub const NO_BLOCKING_DAY: &str = "N/A";

/// Lightweight roster line listed under a status bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub last_status_type: Option<String>,
    pub last_status_date: Option<String>,
}

/// Summary shown on the main dashboard panel.
#[derive(Debug, Clone, Serialize)]
pub struct PanelSummary {
    pub total_disparos: i64,
    pub status_kpis: BTreeMap<String, usize>,
    pub vendedores_por_status: BTreeMap<String, Vec<RosterEntry>>,
    pub bases_pendentes_count: usize,
    pub dia_mais_bloqueio: String,
}

/// Fetch every salesperson, join the counters and aggregate for today.
pub async fn load_panel(repo: &Repository) -> Result<PanelSummary, AppError> {
    let salespeople = repo.list_salespeople().await?;
    let joined = join_weekly_disparos(repo, salespeople).await?;
    Ok(summarize_panel(&joined, Local::now().date_naive()))
}

/// Aggregate already-joined salespeople.
///
/// Blocked salespeople are attributed to `today`'s weekday, not to any historical date.
pub fn summarize_panel(rows: &[SalespersonWithDisparos], today: NaiveDate) -> PanelSummary {
    let mut total_disparos: i64 = 0;
    let mut status_kpis: BTreeMap<String, usize> = BTreeMap::new();
    let mut vendedores_por_status: BTreeMap<String, Vec<RosterEntry>> = BTreeMap::new();
    let mut bases_pendentes_count = 0;
    // Insertion-ordered so ties resolve to the first day encountered
    let mut blocked_by_day: Vec<(&'static str, usize)> = Vec::new();

    for row in rows {
        let salesperson = &row.salesperson;
        total_disparos = total_disparos.saturating_add(row.weekly_total());

        let key = salesperson.status_key();
        *status_kpis.entry(key.to_string()).or_default() += 1;
        vendedores_por_status
            .entry(key.to_string())
            .or_default()
            .push(RosterEntry {
                name: salesperson.name.clone(),
                last_status_type: salesperson.last_status_type.clone(),
                last_status_date: salesperson.last_status_date.clone(),
            });

        if salesperson.is_blocked() {
            let day = weekday_label(today.weekday());
            match blocked_by_day.iter_mut().find(|(label, _)| *label == day) {
                Some((_, count)) => *count += 1,
                None => blocked_by_day.push((day, 1)),
            }
        }

        if !salesperson.base_treated {
            bases_pendentes_count += 1;
        }
    }

    PanelSummary {
        total_disparos,
        status_kpis,
        vendedores_por_status,
        bases_pendentes_count,
        dia_mais_bloqueio: busiest_day(&blocked_by_day).to_string(),
    }
}

fn busiest_day(counts: &[(&'static str, usize)]) -> &'static str {
    let mut best: Option<(&'static str, usize)> = None;
    for &(day, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((day, count));
        }
    }
    best.map(|(day, _)| day).unwrap_or(NO_BLOCKING_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisparoSource, Salesperson, SalespersonStatus, WeekCounts, UNKNOWN_STATUS};

    fn row(
        id: i64,
        status: Option<SalespersonStatus>,
        base_treated: bool,
        counts: WeekCounts,
    ) -> SalespersonWithDisparos {
        SalespersonWithDisparos {
            salesperson: Salesperson {
                id,
                name: format!("Vendedor {}", id),
                email: None,
                store_id: Some(1),
                status,
                base_treated,
                daily_disparos: 0,
                last_status_type: status.map(|s| s.as_str().to_string()),
                last_status_date: Some("10/10/2026".to_string()),
            },
            disparos_semanais: counts,
            source: DisparoSource::Recorded,
        }
    }

    // 2026-10-16 is a Friday
    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_empty_panel() {
        let summary = summarize_panel(&[], friday());
        assert_eq!(summary.total_disparos, 0);
        assert!(summary.status_kpis.is_empty());
        assert!(summary.vendedores_por_status.is_empty());
        assert_eq!(summary.bases_pendentes_count, 0);
        assert_eq!(summary.dia_mais_bloqueio, NO_BLOCKING_DAY);
    }

    #[test]
    fn test_totals_histogram_and_roster() {
        let rows = vec![
            row(1, Some(SalespersonStatus::Connected), true, WeekCounts::from_fn(|_| 10)),
            row(2, Some(SalespersonStatus::Blocked), false, WeekCounts::from_fn(|_| 1)),
            row(3, Some(SalespersonStatus::Connected), false, WeekCounts::default()),
            row(4, None, true, WeekCounts::from_fn(|_| 2)),
        ];

        let summary = summarize_panel(&rows, friday());

        assert_eq!(summary.total_disparos, 70 + 7 + 14);
        assert_eq!(summary.status_kpis["Connected"], 2);
        assert_eq!(summary.status_kpis["Blocked"], 1);
        assert_eq!(summary.status_kpis[UNKNOWN_STATUS], 1);
        assert_eq!(summary.bases_pendentes_count, 2);

        let connected: Vec<_> = summary.vendedores_por_status["Connected"]
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(connected, ["Vendedor 1", "Vendedor 3"]);
        assert_eq!(
            summary.vendedores_por_status["Blocked"][0],
            RosterEntry {
                name: "Vendedor 2".into(),
                last_status_type: Some("Blocked".into()),
                last_status_date: Some("10/10/2026".into()),
            }
        );
    }

    #[test]
    fn test_blocking_day_is_todays_weekday() {
        let rows = vec![
            row(1, Some(SalespersonStatus::Blocked), true, WeekCounts::default()),
            row(2, Some(SalespersonStatus::Blocked), true, WeekCounts::default()),
        ];
        assert_eq!(summarize_panel(&rows, friday()).dia_mais_bloqueio, "sexta");

        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert_eq!(summarize_panel(&rows, monday).dia_mais_bloqueio, "segunda");
    }

    #[test]
    fn test_no_blocked_salesperson_gives_na() {
        let rows = vec![row(
            1,
            Some(SalespersonStatus::Restricted),
            true,
            WeekCounts::default(),
        )];
        assert_eq!(summarize_panel(&rows, friday()).dia_mais_bloqueio, "N/A");
    }

    #[test]
    fn test_busiest_day_ties_keep_first() {
        assert_eq!(busiest_day(&[("terca", 2), ("quarta", 2)]), "terca");
        assert_eq!(busiest_day(&[("terca", 1), ("quarta", 2)]), "quarta");
        assert_eq!(busiest_day(&[]), NO_BLOCKING_DAY);
    }

    #[test]
    fn test_flipping_base_flag_moves_pending_count_by_one() {
        let mut rows = vec![
            row(1, Some(SalespersonStatus::Connected), false, WeekCounts::default()),
            row(2, Some(SalespersonStatus::Connected), true, WeekCounts::default()),
        ];
        let before = summarize_panel(&rows, friday()).bases_pendentes_count;

        rows[0].salesperson.base_treated = true;
        assert_eq!(
            summarize_panel(&rows, friday()).bases_pendentes_count,
            before - 1
        );

        rows[1].salesperson.base_treated = false;
        rows[0].salesperson.base_treated = false;
        assert_eq!(
            summarize_panel(&rows, friday()).bases_pendentes_count,
            before + 1
        );
    }

    #[test]
    fn test_huge_stored_counters_do_not_overflow_total() {
        let huge = WeekCounts::from_fn(|_| i64::MAX / 2);
        let rows = vec![
            row(1, Some(SalespersonStatus::Connected), true, huge),
            row(2, Some(SalespersonStatus::Blocked), true, huge),
        ];
        assert_eq!(summarize_panel(&rows, friday()).total_disparos, i64::MAX);
    }
}
