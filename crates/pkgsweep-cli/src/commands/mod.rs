//! CLI commands

pub mod delete;
pub mod plan;
