use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use k6gen::{
    cli::Cli,
    commands::{self, GenerateCommandArgs},
    telemetry,
};
use std::process::ExitCode;

fn run(cli: &Cli) -> anyhow::Result<()> {
    commands::execute_generate(GenerateCommandArgs {
        input_path: &cli.input,
        output_path: &cli.output,
        auth_key: cli.auth_key.as_deref(),
    })
    .with_context(|| format!("Failed to generate {}", cli.output.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    telemetry::init_telemetry();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("{:#}", e);
            eprintln!("{} {}", "Error:".red(), e.root_cause());
            ExitCode::FAILURE
        }
    }
}
