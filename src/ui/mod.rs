//! egui rendering. Everything here reads or mutates state through the
//! `state` / `data` APIs; no filtering or aggregation happens in the UI.

pub mod details;
pub mod list;
pub mod map;
pub mod panels;
pub mod students;
