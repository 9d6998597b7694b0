use clap::Parser;
use postman_client::{ClientConfig, DEFAULT_BASE_URL};
use reqwest::Method;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "postmanctl",
    about = "Send requests to the Postman API and print the JSON response",
    version
)]
pub struct Cli {
    /// API key for Postman (alternatively use POSTMAN_API_KEY env var)
    #[arg(long, env = "POSTMAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the Postman API
    #[arg(long, env = "POSTMAN_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Write logs to a file instead of stderr
    #[arg(long)]
    pub log_to_file: bool,

    /// HTTP method to use
    #[arg(short = 'X', long = "request", default_value = "GET", value_parser = parse_method)]
    pub method: Method,

    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,

    /// Resource path segments, e.g. `collections <id>`
    #[arg(required = true)]
    pub resource: Vec<String>,
}

/// Parses an HTTP method, case-insensitively for the standard ones
fn parse_method(s: &str) -> Result<Method, String> {
    Method::from_bytes(s.to_ascii_uppercase().as_bytes()).map_err(|e| e.to_string())
}

impl Cli {
    /// Builds the client configuration, or `None` when no API key was given
    pub fn client_config(&self) -> Option<ClientConfig> {
        let api_key = self.api_key.clone()?;
        Some(ClientConfig {
            api_key,
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
        })
    }
}
