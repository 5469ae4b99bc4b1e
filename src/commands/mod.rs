pub mod generate;

pub use generate::{GenerateCommandArgs, execute_generate};
