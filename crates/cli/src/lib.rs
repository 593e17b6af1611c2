//! bsc CLI library
//!
//! Exports the CLI components so command logic can be tested directly.

pub mod commands;
pub mod exit_code;
pub mod output;
