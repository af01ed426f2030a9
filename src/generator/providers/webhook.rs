use crate::classifier::{DatasetTag, QueryKind, SqlGenerationResult};
use crate::config::GeneratorConfig;
use crate::generator::{GeneratorError, SqlGenerator};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

pub const BACKEND_NAME: &str = "webhook";

/// Sends questions to an external prompt-to-SQL webhook.
pub struct WebhookGenerator {
    client: reqwest::Client,
    webhook_url: String,
    sample_csv: String,
}

#[derive(Serialize, Debug)]
struct WebhookRequest<'a> {
    mode: &'static str,
    prompt: &'a str,
    csv: &'a str,
}

impl WebhookGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let webhook_url = config
            .webhook_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                GeneratorError::ConfigError("Webhook URL is required for webhook backend".to_string())
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            webhook_url,
            sample_csv: config.sample_csv.clone(),
        })
    }

    fn build_request<'a>(&'a self, question: &'a str) -> WebhookRequest<'a> {
        WebhookRequest {
            mode: "csv",
            prompt: question,
            csv: &self.sample_csv,
        }
    }
}

/// Extracts the SQL from a webhook body. The body must be a JSON object; its
/// `sql` string wins, otherwise the object is returned pretty-printed so the
/// caller still sees what came back.
fn parse_response(body: &str) -> Result<SqlGenerationResult, GeneratorError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        GeneratorError::ResponseError(format!("Failed to parse webhook response: {} - Response was: {}", e, body))
    })?;

    let object = value.as_object().ok_or_else(|| {
        GeneratorError::ResponseError(format!("Webhook response is not a JSON object: {}", body))
    })?;

    let sql = match object.get("sql") {
        Some(Value::String(sql)) => sql.clone(),
        None | Some(Value::Null) => serde_json::to_string_pretty(&value)
            .map_err(|e| GeneratorError::ResponseError(e.to_string()))?,
        Some(other) => {
            return Err(GeneratorError::ResponseError(format!(
                "Webhook `sql` field is not a string: {}",
                other
            )));
        }
    };

    if sql.trim().is_empty() {
        return Err(GeneratorError::ResponseError("Webhook returned empty SQL".to_string()));
    }

    let explanation = object
        .get("explanation")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    let dataset = DatasetTag::from_sql(&sql);

    Ok(SqlGenerationResult {
        sql,
        explanation,
        kind: QueryKind::from(dataset),
        dataset,
    })
}

#[async_trait]
impl SqlGenerator for WebhookGenerator {
    async fn generate(&self, question: &str) -> Result<SqlGenerationResult, GeneratorError> {
        info!("Sending question to webhook");
        debug!("Webhook URL: {}", self.webhook_url);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&self.build_request(question))
            .send()
            .await
            .map_err(|e| GeneratorError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Webhook responded with status code: {}", status);
            return Err(GeneratorError::ResponseError(format!(
                "Webhook responded with status code: {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeneratorError::ResponseError(format!("Failed to read response body: {}", e)))?;

        debug!("Raw response from webhook: {}", body);

        parse_response(&body)
    }

    fn name(&self) -> &'static str {
        BACKEND_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn webhook_config(url: Option<&str>) -> GeneratorConfig {
        GeneratorConfig {
            backend: BACKEND_NAME.to_string(),
            webhook_url: url.map(str::to_string),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_requires_webhook_url() {
        assert!(matches!(
            WebhookGenerator::new(&webhook_config(None)),
            Err(GeneratorError::ConfigError(_))
        ));
        assert!(matches!(
            WebhookGenerator::new(&webhook_config(Some("  "))),
            Err(GeneratorError::ConfigError(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let generator = WebhookGenerator::new(&webhook_config(Some("http://localhost:5678/webhook/prompt-to-sql"))).unwrap();
        let body = serde_json::to_value(generator.build_request("hurda nedenleri")).unwrap();

        assert_eq!(body["mode"], "csv");
        assert_eq!(body["prompt"], "hurda nedenleri");
        assert_eq!(body["csv"], GeneratorConfig::default().sample_csv);
    }

    #[test]
    fn test_parse_sql_field() {
        let result = parse_response(r#"{"sql": "SELECT * FROM satışlar;", "explanation": "Tüm satışlar"}"#).unwrap();
        assert_eq!(result.sql, "SELECT * FROM satışlar;");
        assert_eq!(result.explanation.as_deref(), Some("Tüm satışlar"));
        assert_eq!(result.dataset, DatasetTag::Sales);
        assert_eq!(result.kind, QueryKind::Sales);
    }

    #[test]
    fn test_parse_without_sql_field_returns_body() {
        let result = parse_response(r#"{"output": "SELECT AVG(oee) FROM hat"}"#).unwrap();
        assert!(result.sql.contains("\"output\""));
        assert!(result.explanation.is_none());
        assert_eq!(result.dataset, DatasetTag::Oee);
    }

    #[test]
    fn test_parse_rejects_empty_and_invalid() {
        assert!(matches!(parse_response(r#"{"sql": "  "}"#), Err(GeneratorError::ResponseError(_))));
        assert!(matches!(parse_response("not json"), Err(GeneratorError::ResponseError(_))));
    }

    #[test]
    fn test_parse_rejects_non_object_bodies() {
        for body in ["null", "42", "\"SELECT 1;\"", "[]"] {
            assert!(
                matches!(parse_response(body), Err(GeneratorError::ResponseError(_))),
                "{}",
                body
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_string_sql() {
        assert!(matches!(parse_response(r#"{"sql": 123}"#), Err(GeneratorError::ResponseError(_))));
        assert!(matches!(
            parse_response(r#"{"sql": {"text": "SELECT 1;"}}"#),
            Err(GeneratorError::ResponseError(_))
        ));
    }

    #[test]
    fn test_parse_null_sql_returns_body() {
        let result = parse_response(r#"{"sql": null, "message": "kalite raporu"}"#).unwrap();
        assert!(result.sql.contains("\"message\""));
        assert_eq!(result.dataset, DatasetTag::Quality);
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_connection_error() {
        // Bind and drop a listener so the port is known to be closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = format!("http://127.0.0.1:{}/webhook", port);
        let generator = WebhookGenerator::new(&webhook_config(Some(&url))).unwrap();
        assert!(matches!(
            generator.generate("oee").await,
            Err(GeneratorError::ConnectionError(_))
        ));
    }
}
