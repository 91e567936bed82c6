//! Panel aggregation and report data assembly.
//!
//! Both paths join salespeople with their weekly counters, substituting randomized
//! placeholder buckets when no record is stored. The placeholders are regenerated on
//! every call and never written back.

mod panel;
mod report_data;
mod simulated;

pub use panel::*;
pub use report_data::*;
pub use simulated::*;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{DisparoSource, Salesperson, SalespersonWithDisparos};

/// Attach stored weekly counters to each salesperson, simulating the missing ones.
pub async fn join_weekly_disparos(
    repo: &Repository,
    salespeople: Vec<Salesperson>,
) -> Result<Vec<SalespersonWithDisparos>, AppError> {
    let mut joined = Vec::with_capacity(salespeople.len());

    for salesperson in salespeople {
        let entry = match repo.get_weekly_disparos(salesperson.id).await? {
            Some(record) => SalespersonWithDisparos {
                salesperson,
                disparos_semanais: record.counts,
                source: DisparoSource::Recorded,
            },
            None => {
                tracing::debug!(
                    salesperson_id = salesperson.id,
                    "No weekly counters stored, using simulated values"
                );
                SalespersonWithDisparos {
                    salesperson,
                    disparos_semanais: simulated_week(),
                    source: DisparoSource::Simulated,
                }
            }
        };
        joined.push(entry);
    }

    Ok(joined)
}
