//! Issuance pipeline orchestration for mintseed.
//!
//! Wires the step components together in strict sequence, threads the
//! identifiers each step produces into the next, and assembles the
//! `PipelineReport` the CLI prints and maps to an exit code.

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::LaunchConfig;
pub use error::{AppError, AppResult};
pub use pipeline::{exit_code, IssuancePipeline, LaunchParams, PipelineSettings};
