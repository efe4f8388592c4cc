//! Data Sweeper: upload CSV/Excel files, clean them (deduplicate, mean-fill),
//! pick columns, chart them, convert between CSV and Excel, and extract plain
//! text from TXT/CSV/Excel/PDF files.
//!
//! All processing is UI-free: the [`state::AppState`] transition function takes
//! an [`state::Action`] and updates the session. The egui front end in [`app`]
//! and [`ui`] only renders state and records actions.

pub mod app;
pub mod color;
pub mod data;
pub mod error;
pub mod extract;
pub mod state;
pub mod ui;

pub use error::{Result, SweepError};
