use crate::config::AppConfig;
use crate::generator::models::QueryHistoryItem;
use crate::generator::{Generated, GeneratorManager};
use crate::web::templates::init_templates;
use minijinja::Environment;
use std::collections::VecDeque;
use tokio::sync::RwLock;
use tracing::debug;

/// Shared application state for the web server
pub struct AppState {
    pub config: AppConfig,
    pub template_env: Environment<'static>,
    pub generator: GeneratorManager,
    // Most recent first, capped at `query.history_limit`
    pub history: RwLock<VecDeque<QueryHistoryItem>>,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, generator: GeneratorManager) -> Result<Self, minijinja::Error> {
        Ok(Self {
            config,
            template_env: init_templates()?,
            generator,
            history: RwLock::new(VecDeque::new()),
            startup_time: chrono::Utc::now(),
        })
    }

    pub async fn record_query(&self, question: &str, generated: &Generated) {
        let limit = self.config.query.history_limit;
        if limit == 0 {
            return;
        }

        let item = QueryHistoryItem {
            question: question.to_string(),
            sql: generated.result.sql.clone(),
            kind: generated.result.kind,
            dataset: generated.result.dataset,
            backend: generated.backend.to_string(),
            timestamp: chrono::Utc::now(),
        };

        let mut history = self.history.write().await;
        history.push_front(item);
        history.truncate(limit);
        debug!("History holds {} queries", history.len());
    }

    pub async fn recent_history(&self) -> Vec<QueryHistoryItem> {
        self.history.read().await.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier;

    fn state_with_limit(limit: usize) -> AppState {
        let mut config = AppConfig::default();
        config.query.history_limit = limit;
        let generator = GeneratorManager::new(&config.generator).unwrap();
        AppState::new(config, generator).unwrap()
    }

    fn generated(question: &str) -> Generated {
        Generated {
            result: classifier::classify(question),
            backend: "rules",
            error: None,
        }
    }

    #[tokio::test]
    async fn test_history_is_latest_first_and_bounded() {
        let state = state_with_limit(2);
        for question in ["oee", "hurda", "üretim"] {
            state.record_query(question, &generated(question)).await;
        }

        let history = state.recent_history().await;
        let questions: Vec<_> = history.iter().map(|h| h.question.as_str()).collect();
        assert_eq!(questions, vec!["üretim", "hurda"]);
        assert_eq!(history[0].dataset, classifier::DatasetTag::Production);
    }

    #[tokio::test]
    async fn test_zero_limit_disables_history() {
        let state = state_with_limit(0);
        state.record_query("oee", &generated("oee")).await;
        assert!(state.recent_history().await.is_empty());
    }
}
