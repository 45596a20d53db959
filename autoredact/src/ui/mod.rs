//! Terminal presentation: theme, message helpers and summary tables.

pub mod output_format;
pub mod summary;
pub mod theme;
