//! CLI library for testing purposes

pub mod config;
pub mod generate;
pub mod inputs;
pub mod validation;

pub use config::{FileConfig, OptionOverrides};
pub use generate::{Outcome, build_catalog, run_check_command, run_generate_command};
pub use inputs::{InputFiles, resolve_inputs};
