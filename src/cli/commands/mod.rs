//! CLI command modules

pub mod catalog;
pub mod patch;
