pub mod reservations;
pub mod tables;
