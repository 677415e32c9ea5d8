//! Repository for the `tables` table.

use sqlx::{PgExecutor, PgPool};
use seatwise_core::types::DbId;

use crate::models::table::{CreateTable, Table};

/// Column list for `tables` queries.
const COLUMNS: &str = "table_id, table_name, capacity, reservation_id, created_at, updated_at";

/// Provides CRUD and occupancy operations for tables.
pub struct TableRepo;

impl TableRepo {
    /// List every table, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Table>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tables ORDER BY table_name, table_id");
        sqlx::query_as::<_, Table>(&query).fetch_all(pool).await
    }

    /// Find a table by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Table>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tables WHERE table_id = $1");
        sqlx::query_as::<_, Table>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a table by ID and lock the row until the surrounding transaction
    /// ends. Seating flows lock the table before the reservation.
    pub async fn find_by_id_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Table>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tables WHERE table_id = $1 FOR UPDATE");
        sqlx::query_as::<_, Table>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find the table `reservation_id` occupies, if any, and lock it.
    pub async fn find_by_reservation_for_update<'e>(
        executor: impl PgExecutor<'e>,
        reservation_id: DbId,
    ) -> Result<Option<Table>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tables WHERE reservation_id = $1 FOR UPDATE");
        sqlx::query_as::<_, Table>(&query)
            .bind(reservation_id)
            .fetch_optional(executor)
            .await
    }

    /// Insert a new, free table, returning the full row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateTable,
    ) -> Result<Table, sqlx::Error> {
        let query = format!(
            "INSERT INTO tables (table_name, capacity) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Table>(&query)
            .bind(&input.table_name)
            .bind(input.capacity)
            .fetch_one(executor)
            .await
    }

    /// Point a table at the reservation now occupying it.
    /// Returns `None` if the table does not exist.
    pub async fn assign<'e>(
        executor: impl PgExecutor<'e>,
        table_id: DbId,
        reservation_id: DbId,
    ) -> Result<Option<Table>, sqlx::Error> {
        let query = format!(
            "UPDATE tables SET reservation_id = $1 WHERE table_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Table>(&query)
            .bind(reservation_id)
            .bind(table_id)
            .fetch_optional(executor)
            .await
    }

    /// Free a table. Returns `None` if the table does not exist.
    pub async fn clear<'e>(
        executor: impl PgExecutor<'e>,
        table_id: DbId,
    ) -> Result<Option<Table>, sqlx::Error> {
        let query = format!(
            "UPDATE tables SET reservation_id = NULL WHERE table_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Table>(&query)
            .bind(table_id)
            .fetch_optional(executor)
            .await
    }

    /// Free whichever table `reservation_id` occupies, if any.
    pub async fn release_reservation<'e>(
        executor: impl PgExecutor<'e>,
        reservation_id: DbId,
    ) -> Result<Option<Table>, sqlx::Error> {
        let query = format!(
            "UPDATE tables SET reservation_id = NULL WHERE reservation_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Table>(&query)
            .bind(reservation_id)
            .fetch_optional(executor)
            .await
    }
}
