//! Core library surface for the student roster TUI.
//!
//! The roster lives entirely in memory for one session. `store` owns the
//! records and the pending create/edit draft, `view` derives what the table
//! shows from the search box and group filter, and `ui` drives both from
//! key presses.
pub mod config;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod view;

/// Domain types shared by every layer.
pub use models::{Group, Student, StudentFields, StudentId};

/// Record store, draft session and their error type.
pub use store::{Draft, Panel, RecordStore, Roster, StoreError};

/// Search / group filter projection.
pub use view::{project, GroupFilter, Query};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
