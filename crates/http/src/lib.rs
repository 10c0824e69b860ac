//! HTTP plumbing shared by the API server and the web frontend: the common
//! middleware stack, typed environment settings, tracing setup, and the
//! serve loop with graceful shutdown.

pub mod layers;
pub mod serve;
pub mod settings;
pub mod telemetry;
