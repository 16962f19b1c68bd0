//! Daily Snapshot application wiring: configuration and the capture step.

pub mod capture;
pub mod config;
pub mod error;
