pub mod models;
pub mod providers;

use crate::classifier::{self, SqlGenerationResult};
use crate::config::GeneratorConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug)]
pub enum GeneratorError {
    ConnectionError(String),
    ResponseError(String),
    ConfigError(String),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::ConnectionError(msg) => write!(f, "Generator connection error: {}", msg),
            GeneratorError::ResponseError(msg) => write!(f, "Generator response error: {}", msg),
            GeneratorError::ConfigError(msg) => write!(f, "Generator configuration error: {}", msg),
        }
    }
}

impl Error for GeneratorError {}

#[async_trait]
pub trait SqlGenerator: Send + Sync {
    async fn generate(&self, question: &str) -> Result<SqlGenerationResult, GeneratorError>;

    fn name(&self) -> &'static str;
}

/// A generated query plus the backend failure that forced a fallback, if any.
#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    #[serde(flatten)]
    pub result: SqlGenerationResult,
    pub backend: &'static str,
    pub error: Option<String>,
}

pub struct GeneratorManager {
    generator: Box<dyn SqlGenerator>,
    fallback_to_rules: bool,
}

impl GeneratorManager {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let generator: Box<dyn SqlGenerator> = match config.backend.as_str() {
            "rules" => Box::new(providers::rules::RuleBasedGenerator::new(config)),
            "webhook" => Box::new(providers::webhook::WebhookGenerator::new(config)?),
            _ => {
                return Err(GeneratorError::ConfigError(format!(
                    "Unsupported generator backend: {}",
                    config.backend
                )));
            }
        };

        Ok(Self {
            generator,
            fallback_to_rules: config.fallback_to_rules,
        })
    }

    pub fn backend(&self) -> &'static str {
        self.generator.name()
    }

    pub async fn generate(&self, question: &str) -> Result<Generated, GeneratorError> {
        match self.generator.generate(question).await {
            Ok(result) => {
                info!(backend = self.backend(), kind = ?result.kind, dataset = %result.dataset, "Generated SQL");
                Ok(Generated {
                    result,
                    backend: self.backend(),
                    error: None,
                })
            }
            Err(e) if self.fallback_to_rules => {
                warn!("Backend '{}' failed, answering from rules: {}", self.backend(), e);
                Ok(Generated {
                    result: classifier::classify(question),
                    backend: providers::rules::BACKEND_NAME,
                    error: Some(e.to_string()),
                })
            }
            Err(e) => Err(e),
        }
    }
}
