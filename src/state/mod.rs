/// State management module
///
/// This module handles all application state:
/// - The report data model returned by the analysis service (data.rs)
/// - The Idle/Analyzing/Report controller (machine.rs)

pub mod data;
pub mod machine;

pub use data::AnalysisReport;
pub use machine::{AppState, Attempt, Controller, UserError};
