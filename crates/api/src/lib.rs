//! Seatwise API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes) so
//! integration tests and the binary entrypoint share one router.

pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod request;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
