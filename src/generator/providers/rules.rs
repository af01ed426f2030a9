use crate::classifier::{self, SqlGenerationResult};
use crate::config::GeneratorConfig;
use crate::generator::{GeneratorError, SqlGenerator};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub const BACKEND_NAME: &str = "rules";

pub struct RuleBasedGenerator {
    // Lets a UI exercise its loading state; zero means answer immediately.
    simulated_latency: Duration,
}

impl RuleBasedGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            simulated_latency: Duration::from_millis(config.simulated_latency_ms),
        }
    }
}

#[async_trait]
impl SqlGenerator for RuleBasedGenerator {
    async fn generate(&self, question: &str) -> Result<SqlGenerationResult, GeneratorError> {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }

        let result = classifier::classify(question);
        debug!("Rule classifier picked {:?} for: {}", result.kind, question);
        Ok(result)
    }

    fn name(&self) -> &'static str {
        BACKEND_NAME
    }
}
