//! Restaurant table model.

use serde::Serialize;
use sqlx::FromRow;
use seatwise_core::seating::TableSnapshot;
use seatwise_core::table::ValidTable;
use seatwise_core::types::{DbId, Timestamp};

/// A row from the `tables` table.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Table {
    pub table_id: DbId,
    pub table_name: String,
    pub capacity: i32,
    /// Reservation currently seated here; `None` when the table is free.
    pub reservation_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Table {
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            table_id: self.table_id,
            capacity: self.capacity,
            reservation_id: self.reservation_id,
        }
    }
}

/// DTO for inserting a table. New tables are always free; an initial
/// reservation goes through the seat flow.
#[derive(Debug, Clone)]
pub struct CreateTable {
    pub table_name: String,
    pub capacity: i32,
}

impl From<&ValidTable> for CreateTable {
    fn from(valid: &ValidTable) -> Self {
        Self {
            table_name: valid.table_name.clone(),
            capacity: valid.capacity,
        }
    }
}
