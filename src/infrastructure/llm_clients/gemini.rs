use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: Option<GeminiErrorBody>,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: Option<String>,
}

pub struct GeminiClient {
    client: reqwest::Client,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn endpoint(config: &LLMConfig, api_key: &str) -> Result<Url> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        let model_id = config.model.trim().trim_start_matches("models/");
        let mut url = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            base_url, model_id
        ))
        .map_err(|e| AppError::ConfigError(format!("Invalid provider URL: {}", e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    fn generation_config(config: &LLMConfig) -> Option<GenerationConfig> {
        if config.temperature.is_none() && config.max_tokens.is_none() {
            return None;
        }
        Some(GenerationConfig {
            temperature: config.temperature.map(f64::from),
            max_output_tokens: config.max_tokens,
        })
    }

    /// Best-effort extraction of `error.message` from a failed response.
    fn provider_message(body: &str) -> Option<String> {
        serde_json::from_str::<GeminiErrorResponse>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .and_then(|error| error.message)
            .filter(|message| !message.trim().is_empty())
    }

    fn first_candidate_text(response: GeminiResponse) -> Option<String> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.is_empty())
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, config: &LLMConfig, api_key: &str, prompt: &str) -> Result<String> {
        if api_key.trim().is_empty() {
            return Err(AppError::MissingApiKey);
        }

        let url = Self::endpoint(config, api_key)?;
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Self::generation_config(config),
        };

        debug!(model = %config.model, "Sending generateContent request");

        let mut request = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(secs) = config.timeout_secs {
            request = request.timeout(Duration::from_secs(secs));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "Translation provider returned an error");
            let detail =
                Self::provider_message(&text).unwrap_or_else(|| status.as_u16().to_string());
            return Err(AppError::LLMError(format!("API Error: {}", detail)));
        }

        let json: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::ParseError(format!("Failed to parse JSON: {}", e)))?;

        Self::first_candidate_text(json)
            .ok_or_else(|| AppError::ParseError("Invalid response format".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::ServerHandle;
    use actix_web::http::StatusCode;
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct CapturedRequest {
        path: String,
        query: String,
        body: serde_json::Value,
    }

    struct MockProvider {
        status: u16,
        body: serde_json::Value,
        captured: Mutex<Vec<CapturedRequest>>,
    }

    async fn handle_provider_request(
        req: HttpRequest,
        body: web::Bytes,
        data: web::Data<MockProvider>,
    ) -> HttpResponse {
        data.captured.lock().unwrap().push(CapturedRequest {
            path: req.path().to_string(),
            query: req.query_string().to_string(),
            body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
        });
        let status = StatusCode::from_u16(data.status).unwrap();
        HttpResponse::build(status).json(data.body.clone())
    }

    fn start_provider(
        status: u16,
        body: serde_json::Value,
    ) -> (LLMConfig, web::Data<MockProvider>, ServerHandle) {
        let data = web::Data::new(MockProvider {
            status,
            body,
            captured: Mutex::new(Vec::new()),
        });
        let server_data = data.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_data.clone())
                .default_service(web::route().to(handle_provider_request))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let config = LLMConfig {
            base_url: format!("http://{}", addr),
            ..LLMConfig::default()
        };
        (config, data, handle)
    }

    fn success_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }

    #[actix_web::test]
    async fn test_generate_returns_first_candidate_text() {
        let (config, provider, handle) = start_provider(200, success_body("xin chào thế giới"));

        let result = GeminiClient::new()
            .generate(&config, "secret", "translate hello world")
            .await;
        assert_eq!(result.unwrap(), "xin chào thế giới");

        let captured = provider.captured.lock().unwrap().clone();
        assert_eq!(captured.len(), 1);
        assert_eq!(
            captured[0].path,
            "/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(captured[0].query, "key=secret");
        assert_eq!(
            captured[0].body,
            json!({ "contents": [ { "parts": [ { "text": "translate hello world" } ] } ] })
        );

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_generate_surfaces_provider_message() {
        let (config, provider, handle) =
            start_provider(429, json!({ "error": { "message": "rate limited" } }));

        let err = GeminiClient::new()
            .generate(&config, "secret", "prompt")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::LLMError("API Error: rate limited".to_string()));
        assert_eq!(provider.captured.lock().unwrap().len(), 1);

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_generate_falls_back_to_status_code() {
        let (config, _provider, handle) = start_provider(503, json!({ "unexpected": true }));

        let err = GeminiClient::new()
            .generate(&config, "secret", "prompt")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::LLMError("API Error: 503".to_string()));

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_generate_rejects_missing_candidate_path() {
        let (config, _provider, handle) =
            start_provider(200, json!({ "candidates": [ { "content": { "parts": [] } } ] }));

        let err = GeminiClient::new()
            .generate(&config, "secret", "prompt")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::ParseError("Invalid response format".to_string()));

        handle.stop(false).await;
    }

    #[tokio::test]
    async fn test_generate_without_key_makes_no_request() {
        let config = LLMConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..LLMConfig::default()
        };
        let err = GeminiClient::new()
            .generate(&config, "  ", "prompt")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::MissingApiKey);
    }

    #[test]
    fn test_endpoint_encodes_key() {
        let url = GeminiClient::endpoint(&LLMConfig::default(), "a b&c").unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent?key=a+b%26c"
        );
    }

    #[test]
    fn test_generation_config_omitted_by_default() {
        let body = GeminiRequest {
            contents: vec![],
            generation_config: GeminiClient::generation_config(&LLMConfig::default()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("generationConfig").is_none());
    }
}
