use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneratorConfig {
    pub backend: String, // "rules" or "webhook"
    pub webhook_url: Option<String>,
    pub sample_csv: String, // base64 CSV sent along with webhook prompts
    pub timeout_secs: u64,
    pub fallback_to_rules: bool,
    pub simulated_latency_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QueryConfig {
    pub max_question_chars: usize,
    pub history_limit: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub json: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub web: WebConfig,
    pub generator: GeneratorConfig,
    pub query: QueryConfig,
    pub logging: LoggingConfig,
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SQL generator backend ("rules" or "webhook")
    #[arg(long)]
    pub backend: Option<String>,

    /// Webhook URL for the webhook backend
    #[arg(long)]
    pub webhook_url: Option<String>,
}

impl AppConfig {
    pub fn new(args: &CliArgs) -> Result<Self, ConfigError> {
        // Start with the built-in defaults so every key is present
        let mut config_builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        // Add configuration from file if specified
        if let Some(config_path) = &args.config {
            config_builder = config_builder.add_source(File::from(config_path.as_path()));
        } else {
            // Check for config in default locations
            let default_locations = vec![
                "config.toml",
                "config/config.toml",
                "/etc/nl-query/config.toml",
            ];

            for location in default_locations {
                if Path::new(location).exists() {
                    config_builder =
                        config_builder.add_source(File::new(location, config::FileFormat::Toml));
                    break;
                }
            }
        }

        // NLQ__GENERATOR__BACKEND=webhook and friends
        config_builder = config_builder.add_source(Environment::with_prefix("NLQ").separator("__"));

        // Build the config
        let mut config: AppConfig = config_builder.build()?.try_deserialize()?;

        // Override with command line args if provided
        if let Some(host) = &args.host {
            config.web.host = host.clone();
        }
        if let Some(port) = args.port {
            config.web.port = port;
        }
        if let Some(backend) = &args.backend {
            config.generator.backend = backend.clone();
        }
        if let Some(webhook_url) = &args.webhook_url {
            config.generator.webhook_url = Some(webhook_url.clone());
        }

        Ok(config)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: "rules".to_string(),
            webhook_url: None,
            sample_csv: "YmFyayxzb3JndSwgZ2VsacWfbGVyaQ0KQWxpLCBTYXRpxZ9sYXIsIHRhbGUgMQ0KQsO8cmUsIEJ1eWVyLCB0YWxlIDI=".to_string(),
            timeout_secs: 60,
            fallback_to_rules: true,
            simulated_latency_ms: 0,
        }
    }
}

// Default implementation
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            generator: GeneratorConfig::default(),
            query: QueryConfig {
                max_question_chars: 2000,
                history_limit: 50,
            },
            logging: LoggingConfig { json: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[web]
port = 8088

[generator]
backend = "webhook"
webhook_url = "http://localhost:5678/webhook/prompt-to-sql"

[query]
history_limit = 5
"#
        )
        .unwrap();

        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            ..CliArgs::default()
        };
        let config = AppConfig::new(&args).unwrap();

        assert_eq!(config.web.port, 8088);
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.generator.backend, "webhook");
        assert_eq!(
            config.generator.webhook_url.as_deref(),
            Some("http://localhost:5678/webhook/prompt-to-sql")
        );
        assert!(config.generator.fallback_to_rules);
        assert_eq!(config.query.history_limit, 5);
        assert_eq!(config.query.max_question_chars, 2000);
    }

    #[test]
    fn test_cli_args_win() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            backend: Some("webhook".to_string()),
            webhook_url: Some("http://example.invalid/hook".to_string()),
        };
        let config = AppConfig::new(&args).unwrap();

        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.generator.backend, "webhook");
        assert_eq!(config.generator.webhook_url.as_deref(), Some("http://example.invalid/hook"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let args = CliArgs {
            config: Some(PathBuf::from("/nonexistent/nl-query.toml")),
            ..CliArgs::default()
        };
        assert!(AppConfig::new(&args).is_err());
    }
}
