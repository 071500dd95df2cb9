//! Output formatting for analysis results.

pub mod json;
pub mod terminal;
