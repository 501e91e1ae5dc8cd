//! Push-notification delivery subsystem for a marketplace web app: a
//! page-context subscription manager that negotiates the keyed channel
//! with the backend, and the background-worker handlers (cache lifecycle,
//! push receive and display, click routing) written as plain async
//! functions behind platform ports, so they run and test outside any
//! browser runtime.

pub mod adapters;
pub mod config;
pub mod manager;
pub mod ports;
pub mod types;
pub mod worker;

pub use manager::{PermissionOutcome, SubscriptionManager};
pub use worker::{Worker, WorkerConfig};
