//! Per-store row set consumed by the report renderer.

use super::join_weekly_disparos;
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{SalespersonWithDisparos, Store};

/// A store and its salespeople joined with the counters used for them.
#[derive(Debug, Clone)]
pub struct ReportData {
    pub store: Store,
    pub salespeople: Vec<SalespersonWithDisparos>,
}

impl ReportData {
    /// Sum of every weekday bucket across the joined salespeople.
    pub fn total_disparos(&self) -> i64 {
        self.salespeople
            .iter()
            .fold(0i64, |total, row| total.saturating_add(row.weekly_total()))
    }
}

/// Load a store and its joined salespeople.
pub async fn assemble_report_data(
    repo: &Repository,
    store_id: i64,
) -> Result<ReportData, AppError> {
    let store = repo
        .get_store(store_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Store {} not found", store_id)))?;

    let salespeople = repo.list_salespeople_by_store(store.id).await?;
    let salespeople = join_weekly_disparos(repo, salespeople).await?;

    Ok(ReportData { store, salespeople })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{load_panel, SIMULATED_MAX, SIMULATED_MIN};
    use crate::db::init_database;
    use crate::models::{DisparoSource, NewSalesperson, SalespersonStatus, WeekCounts};
    use tempfile::TempDir;

    async fn test_repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    async fn add_salesperson(repo: &Repository, store_id: i64, name: &str) -> i64 {
        repo.create_salesperson(&NewSalesperson {
            name: name.to_string(),
            email: None,
            store_id: Some(store_id),
            status: SalespersonStatus::Connected,
            base_treated: true,
            daily_disparos: 0,
            last_status_type: None,
            last_status_date: None,
        })
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_unknown_store_is_not_found() {
        let (repo, _dir) = test_repo().await;
        let result = assemble_report_data(&repo, 42).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_recorded_counters_are_kept_and_missing_ones_simulated() {
        let (repo, _dir) = test_repo().await;
        let store = repo.create_store("Loja Centro", "Carla").await.unwrap();
        let other = repo.create_store("Loja Outra", "Pedro").await.unwrap();
        let recorded = add_salesperson(&repo, store.id, "Ana").await;
        let missing = add_salesperson(&repo, store.id, "Bia").await;
        add_salesperson(&repo, other.id, "Caio").await;

        let stored = WeekCounts::from_fn(|_| 5);
        repo.upsert_weekly_disparos(recorded, &stored).await.unwrap();

        let data = assemble_report_data(&repo, store.id).await.unwrap();

        assert_eq!(data.store, store);
        assert_eq!(data.salespeople.len(), 2);

        let first = &data.salespeople[0];
        assert_eq!(first.salesperson.id, recorded);
        assert_eq!(first.source, DisparoSource::Recorded);
        assert_eq!(first.disparos_semanais, stored);

        let second = &data.salespeople[1];
        assert_eq!(second.salesperson.id, missing);
        assert_eq!(second.source, DisparoSource::Simulated);
        for (_, value) in second.disparos_semanais.iter() {
            assert!((SIMULATED_MIN..=SIMULATED_MAX).contains(&value));
        }

        assert_eq!(
            data.total_disparos(),
            stored.total() + second.disparos_semanais.total()
        );

        // Simulation never writes back
        assert!(repo.get_weekly_disparos(missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_without_salespeople_has_empty_rows() {
        let (repo, _dir) = test_repo().await;
        let store = repo.create_store("Loja Vazia", "Sara").await.unwrap();

        let data = assemble_report_data(&repo, store.id).await.unwrap();
        assert!(data.salespeople.is_empty());
        assert_eq!(data.total_disparos(), 0);
    }

    #[tokio::test]
    async fn test_panel_tracks_status_changes() {
        let (repo, _dir) = test_repo().await;
        let store = repo.create_store("Loja Centro", "Carla").await.unwrap();
        let ana = add_salesperson(&repo, store.id, "Ana").await;
        add_salesperson(&repo, store.id, "Bia").await;
        repo.upsert_weekly_disparos(ana, &WeekCounts::from_fn(|_| 1))
            .await
            .unwrap();

        let before = load_panel(&repo).await.unwrap();
        assert_eq!(before.status_kpis.get("Blocked"), None);
        assert_eq!(before.dia_mais_bloqueio, "N/A");
        // One recorded week of 7 plus one simulated week of 70..=560
        assert!(before.total_disparos >= 7 + 7 * SIMULATED_MIN);
        assert!(before.total_disparos <= 7 + 7 * SIMULATED_MAX);

        repo.update_salesperson_status(ana, SalespersonStatus::Blocked)
            .await
            .unwrap();

        let after = load_panel(&repo).await.unwrap();
        assert_eq!(after.status_kpis["Blocked"], 1);
        assert_eq!(after.status_kpis["Connected"], 1);
        assert_ne!(after.dia_mais_bloqueio, "N/A");
        assert_eq!(after.vendedores_por_status["Blocked"][0].name, "Ana");
        assert_eq!(
            after.vendedores_por_status["Blocked"][0]
                .last_status_type
                .as_deref(),
            Some("Blocked")
        );
    }

    #[tokio::test]
    async fn test_panel_pending_bases_follow_toggle() {
        let (repo, _dir) = test_repo().await;
        let store = repo.create_store("Loja Centro", "Carla").await.unwrap();
        let ana = add_salesperson(&repo, store.id, "Ana").await;

        assert_eq!(load_panel(&repo).await.unwrap().bases_pendentes_count, 0);
        repo.toggle_base_treated(ana).await.unwrap();
        assert_eq!(load_panel(&repo).await.unwrap().bases_pendentes_count, 1);
        repo.toggle_base_treated(ana).await.unwrap();
        assert_eq!(load_panel(&repo).await.unwrap().bases_pendentes_count, 0);
    }
}
