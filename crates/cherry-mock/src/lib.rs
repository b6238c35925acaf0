//! In-memory stand-in for the remote users REST service.
//!
//! Serves the same resource contract as the hosted API so the client and the
//! store can be exercised end to end without network access.

pub mod config;
pub mod error;
pub mod metrics;
pub mod router;
pub mod routes;
pub mod state;

pub use config::MockConfig;
pub use router::router;
pub use state::MockState;
