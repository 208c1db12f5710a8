//! Cake store HTTP server library.
//!
//! Exposes configuration, state, error mapping, the record service and the
//! route tree so the binary and the integration tests build the same app.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
