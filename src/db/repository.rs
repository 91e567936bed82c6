//! Database repository for CRUD operations.
//!
//! Every call borrows one pooled connection (or one transaction) and returns it to the
//! pool on all exit paths.

use chrono::{Local, NaiveDate};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreateEventRequest, DisparoSource, Event, NewSalesperson, Salesperson, SalespersonStatus,
    SalespersonWithDisparos, Store, WeekCounts, WeeklyDisparos,
};

const SALESPERSON_COLUMNS: &str = "id, nome, email, loja_id, status, base_tratada, disparos_dia, ultimo_status_tipo, ultimo_status_data";

const WEEK_COLUMNS: &str = "segunda, terca, quarta, quinta, sexta, sabado, domingo";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== STORE OPERATIONS ====================

    /// List all stores.
    pub async fn list_stores(&self) -> Result<Vec<Store>, AppError> {
        let rows = sqlx::query("SELECT id, nome, responsavel FROM lojas ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(store_from_row).collect())
    }

    /// Get a store by ID.
    pub async fn get_store(&self, id: i64) -> Result<Option<Store>, AppError> {
        let row = sqlx::query("SELECT id, nome, responsavel FROM lojas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(store_from_row))
    }

    /// Create a store on its own.
    pub async fn create_store(&self, name: &str, responsible: &str) -> Result<Store, AppError> {
        let mut conn = self.pool.acquire().await?;
        insert_store(&mut conn, name, responsible).await
    }

    /// Create a store and its initial manager in one transaction.
    ///
    /// The manager starts Connected with a treated base and a zero daily count.
    pub async fn create_store_with_manager(
        &self,
        name: &str,
        responsible: &str,
        manager_name: &str,
        manager_email: &str,
    ) -> Result<(Store, Salesperson), AppError> {
        let mut tx = self.pool.begin().await?;

        let store = insert_store(&mut tx, name, responsible).await?;
        let manager = NewSalesperson {
            name: manager_name.to_string(),
            email: Some(manager_email.to_string()),
            store_id: Some(store.id),
            status: SalespersonStatus::Connected,
            base_treated: true,
            daily_disparos: 0,
            last_status_type: Some(SalespersonStatus::Connected.as_str().to_string()),
            last_status_date: Some(status_date_stamp(today())),
        };
        let manager = insert_salesperson(&mut tx, &manager).await?;

        tx.commit().await?;
        Ok((store, manager))
    }

    /// Edit a store's name and responsible party.
    pub async fn update_store(
        &self,
        id: i64,
        name: &str,
        responsible: &str,
    ) -> Result<Store, AppError> {
        let result = sqlx::query("UPDATE lojas SET nome = ?, responsavel = ? WHERE id = ?")
            .bind(name)
            .bind(responsible)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Store {} not found", id)));
        }

        Ok(Store {
            id,
            name: name.to_string(),
            responsible: Some(responsible.to_string()),
        })
    }

    // ==================== SALESPERSON OPERATIONS ====================

    /// List all salespeople.
    pub async fn list_salespeople(&self) -> Result<Vec<Salesperson>, AppError> {
        let sql = format!("SELECT {} FROM vendedores ORDER BY id", SALESPERSON_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(salesperson_from_row).collect())
    }

    /// List the salespeople referencing a store.
    pub async fn list_salespeople_by_store(
        &self,
        store_id: i64,
    ) -> Result<Vec<Salesperson>, AppError> {
        let sql = format!(
            "SELECT {} FROM vendedores WHERE loja_id = ? ORDER BY id",
            SALESPERSON_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(store_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(salesperson_from_row).collect())
    }

    /// Get a salesperson by ID.
    pub async fn get_salesperson(&self, id: i64) -> Result<Option<Salesperson>, AppError> {
        let sql = format!("SELECT {} FROM vendedores WHERE id = ?", SALESPERSON_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(salesperson_from_row))
    }

    /// Create a salesperson.
    pub async fn create_salesperson(
        &self,
        new: &NewSalesperson,
    ) -> Result<Salesperson, AppError> {
        let mut conn = self.pool.acquire().await?;
        insert_salesperson(&mut conn, new).await
    }

    /// Change a salesperson's status and stamp the last-status fields with today's date.
    pub async fn update_salesperson_status(
        &self,
        id: i64,
        status: SalespersonStatus,
    ) -> Result<Salesperson, AppError> {
        let result = sqlx::query(
            "UPDATE vendedores SET status = ?, ultimo_status_tipo = ?, ultimo_status_data = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(status.as_str())
        .bind(status_date_stamp(today()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Salesperson {} not found", id)));
        }

        self.get_salesperson(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Salesperson {} not found", id)))
    }

    /// Flip the base-treated flag and return its new value. A missing flag counts as false.
    pub async fn toggle_base_treated(&self, id: i64) -> Result<bool, AppError> {
        let row = sqlx::query(
            "UPDATE vendedores SET base_tratada = CASE WHEN COALESCE(base_tratada, 0) = 0 THEN 1 ELSE 0 END WHERE id = ? RETURNING base_tratada",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let value: i32 = row.get("base_tratada");
                Ok(value != 0)
            }
            None => Err(AppError::NotFound(format!("Salesperson {} not found", id))),
        }
    }

    /// Set today's outreach count.
    pub async fn update_daily_disparos(&self, id: i64, value: i64) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE vendedores SET disparos_dia = ? WHERE id = ?")
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Salesperson {} not found", id)));
        }
        Ok(())
    }

    /// Delete a salesperson together with its weekly counters.
    pub async fn delete_salesperson(&self, id: i64) -> Result<(), AppError> {
        // Use a transaction so the counters never outlive their owner
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM disparos_semanais WHERE vendedor_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM vendedores WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Salesperson {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Every salesperson paired with its stored counters; absent records become zero buckets.
    ///
    /// Listing view only. The panel and report pipeline never zero-fill.
    pub async fn list_salespeople_with_disparos(
        &self,
    ) -> Result<Vec<SalespersonWithDisparos>, AppError> {
        let rows = sqlx::query(
            r#"SELECT v.id, v.nome, v.email, v.loja_id, v.status, v.base_tratada, v.disparos_dia,
                      v.ultimo_status_tipo, v.ultimo_status_data,
                      d.vendedor_id AS d_vendedor_id,
                      d.segunda, d.terca, d.quarta, d.quinta, d.sexta, d.sabado, d.domingo
               FROM vendedores v
               LEFT JOIN disparos_semanais d ON d.vendedor_id = v.id
               ORDER BY v.id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let recorded: Option<i64> = row.get("d_vendedor_id");
                let (disparos_semanais, source) = match recorded {
                    Some(_) => (week_counts_from_row(row), DisparoSource::Recorded),
                    None => (WeekCounts::default(), DisparoSource::ZeroFilled),
                };
                SalespersonWithDisparos {
                    salesperson: salesperson_from_row(row),
                    disparos_semanais,
                    source,
                }
            })
            .collect())
    }

    // ==================== WEEKLY DISPARO OPERATIONS ====================

    /// Get the stored weekly counters of a salesperson, if any.
    pub async fn get_weekly_disparos(
        &self,
        salesperson_id: i64,
    ) -> Result<Option<WeeklyDisparos>, AppError> {
        let sql = format!(
            "SELECT vendedor_id, {} FROM disparos_semanais WHERE vendedor_id = ?",
            WEEK_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(salesperson_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(|row| WeeklyDisparos {
            salesperson_id: row.get("vendedor_id"),
            counts: week_counts_from_row(row),
        }))
    }

    /// Insert or replace the weekly counters of a salesperson in a single statement.
    pub async fn upsert_weekly_disparos(
        &self,
        salesperson_id: i64,
        counts: &WeekCounts,
    ) -> Result<WeeklyDisparos, AppError> {
        if self.get_salesperson(salesperson_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Salesperson {} not found",
                salesperson_id
            )));
        }

        sqlx::query(
            r#"INSERT INTO disparos_semanais (vendedor_id, segunda, terca, quarta, quinta, sexta, sabado, domingo)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(vendedor_id) DO UPDATE SET
                   segunda = excluded.segunda,
                   terca = excluded.terca,
                   quarta = excluded.quarta,
                   quinta = excluded.quinta,
                   sexta = excluded.sexta,
                   sabado = excluded.sabado,
                   domingo = excluded.domingo"#,
        )
        .bind(salesperson_id)
        .bind(counts.segunda)
        .bind(counts.terca)
        .bind(counts.quarta)
        .bind(counts.quinta)
        .bind(counts.sexta)
        .bind(counts.sabado)
        .bind(counts.domingo)
        .execute(&self.pool)
        .await?;

        Ok(WeeklyDisparos {
            salesperson_id,
            counts: *counts,
        })
    }

    // ==================== EVENT OPERATIONS ====================

    /// List all events, most recent first.
    pub async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query(
            "SELECT id, nome, data_evento, loja_id FROM eventos ORDER BY data_evento DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(event_from_row).collect())
    }

    /// Create an event.
    pub async fn create_event(&self, request: &CreateEventRequest) -> Result<Event, AppError> {
        let result = sqlx::query("INSERT INTO eventos (nome, data_evento, loja_id) VALUES (?, ?, ?)")
            .bind(request.name.trim())
            .bind(request.event_date)
            .bind(request.store_id)
            .execute(&self.pool)
            .await?;

        Ok(Event {
            id: result.last_insert_rowid(),
            name: Some(request.name.trim().to_string()),
            event_date: Some(request.event_date),
            store_id: request.store_id,
        })
    }
}

// ==================== HELPERS ====================

async fn insert_store(
    conn: &mut SqliteConnection,
    name: &str,
    responsible: &str,
) -> Result<Store, AppError> {
    let result = sqlx::query("INSERT INTO lojas (nome, responsavel) VALUES (?, ?)")
        .bind(name)
        .bind(responsible)
        .execute(&mut *conn)
        .await?;

    Ok(Store {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        responsible: Some(responsible.to_string()),
    })
}

async fn insert_salesperson(
    conn: &mut SqliteConnection,
    new: &NewSalesperson,
) -> Result<Salesperson, AppError> {
    let result = sqlx::query(
        "INSERT INTO vendedores (nome, email, loja_id, status, base_tratada, disparos_dia, ultimo_status_tipo, ultimo_status_data) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&new.name)
    .bind(&new.email)
    .bind(new.store_id)
    .bind(new.status.as_str())
    .bind(new.base_treated as i32)
    .bind(new.daily_disparos)
    .bind(&new.last_status_type)
    .bind(&new.last_status_date)
    .execute(&mut *conn)
    .await?;

    Ok(Salesperson {
        id: result.last_insert_rowid(),
        name: new.name.clone(),
        email: new.email.clone(),
        store_id: new.store_id,
        status: Some(new.status),
        base_treated: new.base_treated,
        daily_disparos: new.daily_disparos,
        last_status_type: new.last_status_type.clone(),
        last_status_date: new.last_status_date.clone(),
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `DD/MM/YYYY` stamp stored in the last-status date column.
pub fn status_date_stamp(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn store_from_row(row: &SqliteRow) -> Store {
    Store {
        id: row.get("id"),
        name: row.get("nome"),
        responsible: row.get("responsavel"),
    }
}

fn salesperson_from_row(row: &SqliteRow) -> Salesperson {
    let status: Option<String> = row.get("status");
    let base_treated: Option<i32> = row.get("base_tratada");
    let daily_disparos: Option<i64> = row.get("disparos_dia");
    Salesperson {
        id: row.get("id"),
        name: row.get("nome"),
        email: row.get("email"),
        store_id: row.get("loja_id"),
        status: status.as_deref().and_then(SalespersonStatus::from_str),
        base_treated: base_treated.map(|v| v != 0).unwrap_or(false),
        daily_disparos: daily_disparos.unwrap_or(0),
        last_status_type: row.get("ultimo_status_tipo"),
        last_status_date: row.get("ultimo_status_data"),
    }
}

fn week_counts_from_row(row: &SqliteRow) -> WeekCounts {
    WeekCounts {
        segunda: row.get("segunda"),
        terca: row.get("terca"),
        quarta: row.get("quarta"),
        quinta: row.get("quinta"),
        sexta: row.get("sexta"),
        sabado: row.get("sabado"),
        domingo: row.get("domingo"),
    }
}

fn event_from_row(row: &SqliteRow) -> Event {
    Event {
        id: row.get("id"),
        name: row.get("nome"),
        event_date: row.get("data_evento"),
        store_id: row.get("loja_id"),
    }
}
