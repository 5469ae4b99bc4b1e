/// Output format of diagnostic logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        let format = std::env::var("K6GEN_LOG_FORMAT")
            .map(|value| Self::parse_format(&value))
            .unwrap_or(LogFormat::Text);

        Self {
            format,
            default_filter: "k6gen=warn".to_string(),
        }
    }

    fn parse_format(value: &str) -> LogFormat {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}
