//! Debt Drainer - shared expenses, settlements and debt micropayments
//!
//! This library records shared expenses with a payer and participant
//! shares, tells each user what they are owed and what they owe, settles
//! shares individually or in bulk, and keeps track of debts, their due
//! dates and small daily payments toward them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, participants, debts, budget categories)
//! - `storage`: JSON file storage layer
//! - `services`: Split, classification, settlement and the other business logic
//! - `reports`: Dashboard and budget aggregations
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `drainer` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use debt_drainer::config::{DrainerPaths, Settings};
//! use debt_drainer::reports::DashboardTotals;
//! use debt_drainer::storage::Storage;
//!
//! let paths = DrainerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let totals = DashboardTotals::generate(&storage, &settings.current_user_id)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{DrainerError, DrainerResult};
