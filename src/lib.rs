//! Interactive browsers for two small tabular datasets: NYC Airbnb listings
//! (filter, list, map and per-selection details) and students performance
//! (read-only formatted table).

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod students;
pub mod ui;
