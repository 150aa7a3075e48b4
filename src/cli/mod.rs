//! Command-line interface for the `art2a` tool.

pub mod commands;
