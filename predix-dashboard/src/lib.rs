//! Predix Dashboard
//!
//! ## Overview
//!
//! Everything the dashboard does besides scoring: a machine registry, a
//! maintenance schedule, operator accounts, text reports and the key-value
//! persistence they all share. [`Dashboard`] owns one monitoring session and
//! keeps the stored collections in step with it.
//!
//! ## Persistence
//!
//! | key | contents |
//! |---|---|
//! | `users` | registered accounts, argon2 hashes only |
//! | `current_user` | logged-in account |
//! | `machines` | machine registry |
//! | `current_machine` | id of the monitored machine |
//! | `maintenance_history` | maintenance records |
//! | `alerts` | alert log, newest first |
//!
//! Records that fail to decode load as empty collections and are logged.
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use predix_dashboard::{Dashboard, MemoryStore};
//!
//! let mut dashboard = Dashboard::load(MemoryStore::new(), None, Utc::now())?;
//! dashboard.simulate_anomaly();
//! dashboard.refresh(Utc::now())?;
//!
//! let report = dashboard.report(Utc::now().date_naive());
//! assert!(report.to_string().contains("Current Status: Critical"));
//! # Ok::<(), predix_dashboard::DashboardError>(())
//! ```

pub mod accounts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod machines;
pub mod maintenance;
pub mod report;
pub mod store;

pub use accounts::{Accounts, SignupForm, User};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, DashboardResult, StoreError};
pub use machines::{Machine, MachineForm, MachineRegistry, MachineStats, MachineType};
pub use maintenance::{
    MaintenanceFilter, MaintenanceForm, MaintenanceRecord, MaintenanceSchedule, MaintenanceStats, MaintenanceStatus,
    Priority,
};
pub use report::MaintenanceReport;
pub use store::{FileStore, KeyValueStore, MemoryStore, TypedStore};
