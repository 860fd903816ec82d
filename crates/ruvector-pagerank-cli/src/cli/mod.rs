//! CLI module for the PageRank bridge

pub mod commands;
pub mod format;

pub use commands::*;
pub use format::*;
