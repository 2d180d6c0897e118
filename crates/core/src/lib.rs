#![warn(clippy::all, missing_docs)]

//! Core domain logic for the elimtui qualifiers tracker.
//!
//! This crate hosts the data models, static fixture table, standings
//! engine, adjustment ledger, tournament state container, and snapshot
//! backup layer used by the terminal UI and any future frontends.

pub mod backup;
pub mod config;
pub mod fixtures;
pub mod ledger;
pub mod models;
pub mod standings;
pub mod store;

pub use backup::{BackupEntry, BackupError, BackupManager, Snapshot};
pub use config::AppConfig;
pub use ledger::AdjustmentLedger;
pub use models::{Match, Outcome, Team, TeamStanding};
pub use standings::{compare_standings, compute_standings};
pub use store::{StoreError, StoreEvent, TournamentStore};
