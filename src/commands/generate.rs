//! Generate command implementation
//!
//! Loads an OpenAPI document and writes the k6 script generated from it.

use crate::converters::{ConvertOptions, Converter, K6Converter};
use crate::error::Result;
use crate::loader::load_openapi;
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Arguments for [`execute_generate`]
#[derive(Debug, Clone, Copy)]
pub struct GenerateCommandArgs<'a> {
    pub input_path: &'a Path,
    pub output_path: &'a Path,
    pub auth_key: Option<&'a str>,
}

/// Execute the generate command, returning the number of endpoints written
pub fn execute_generate(args: GenerateCommandArgs<'_>) -> Result<usize> {
    println!(
        "{} Loading OpenAPI spec from {}...",
        "→".blue(),
        args.input_path.display()
    );
    let spec = load_openapi(args.input_path)?;

    println!("{} Generating k6 test script...", "→".blue());
    let options = ConvertOptions {
        auth_key: args.auth_key.map(str::to_string),
        ..Default::default()
    };
    let script = K6Converter::new().convert_spec(&spec, &options)?;

    fs::write(args.output_path, &script.content)?;

    println!(
        "{} Generated k6 test script: {}",
        "✓".green(),
        args.output_path.display()
    );
    println!(
        "  Found {} endpoints (excluding /admin paths)",
        script.endpoint_count
    );
    println!("\n{}", "To run the test:".bold());
    println!(
        "  k6 run {} -e AUTH_KEY='your-key' -e BASE_URL='https://api.example.com'",
        args.output_path.display()
    );

    Ok(script.endpoint_count)
}
