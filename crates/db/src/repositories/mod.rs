//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Reads and single-row writes take `&PgPool`; methods used inside a
//! seating transaction take any Postgres executor so they can run on
//! `&mut *tx` as well.

pub mod reservation_repo;
pub mod table_repo;

pub use reservation_repo::ReservationRepo;
pub use table_repo::TableRepo;
