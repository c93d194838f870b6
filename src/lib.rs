//! pltrack: daily, weekly and all-time P/L rollups from spreadsheet tabs

pub mod config;
pub mod services;
pub mod sources;
pub mod types;
