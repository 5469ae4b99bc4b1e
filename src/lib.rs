pub mod cli;
pub mod commands;
pub mod converters;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod models;
pub mod telemetry;

pub use error::{K6GenError, Result};
