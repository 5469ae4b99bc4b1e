use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "k6gen")]
#[command(version)]
#[command(about = "Generate k6 load test script from OpenAPI specification", long_about = None)]
#[command(after_help = "Examples:
  # Basic usage
  k6gen -i api.yaml -o test.js

  # With authorization key
  k6gen -i api.yaml -o test.js --auth-key \"your-api-key\"

  # Run the generated test
  k6 run test.js -e AUTH_KEY=\"your-api-key\" -e BASE_URL=\"https://api.example.com\"")]
pub struct Cli {
    /// Input OpenAPI spec file (YAML or JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output k6 test script file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Authorization key used when AUTH_KEY is not set at run time
    #[arg(long)]
    pub auth_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::parse_from(["k6gen", "-i", "api.yaml", "-o", "test.js", "--auth-key", "abc"]);
        assert_eq!(cli.input, PathBuf::from("api.yaml"));
        assert_eq!(cli.output, PathBuf::from("test.js"));
        assert_eq!(cli.auth_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_input_and_output_are_required() {
        assert!(Cli::try_parse_from(["k6gen", "-i", "api.yaml"]).is_err());
        assert!(Cli::try_parse_from(["k6gen", "-o", "test.js"]).is_err());
    }
}
