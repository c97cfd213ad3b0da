//! FleetOps backend server
//!
//! Multi-tenant fleet-operations API: place search with optional live
//! geocoding augmentation, bulk-delete endpoints, spreadsheet export, and
//! vendor / integrated-vendor management.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod request_context;
pub mod services;
pub mod slug;
pub mod state;

pub use error::{Error, Result};
