//! OpenAI API client.

use std::time::Duration;

use async_trait::async_trait;
use guildforge_core::errors::{GuildError, GuildResult};
use guildforge_core::ports::{ImageGenerator, TextGenerator};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Size requested from the image endpoint.
pub const IMAGE_SIZE: &str = "1024x1024";

/// Connection and model settings for [`OpenAiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub temperature: f32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenAiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com".to_string(),
            chat_model: "gpt-4".to_string(),
            image_model: "dall-e-3".to_string(),
            temperature: 0.4,
            timeout_secs: 120,
        }
    }

    /// Full URL for an API path, tolerating a base URL that already ends in `/v1`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/{}", base, path)
        } else {
            format!("{}/v1/{}", base, path)
        }
    }
}

/// OpenAI client for chat completions and image generation.
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: reqwest::Client,
    /// Plain client for fetching generated images; the signed URLs must not
    /// receive our API key.
    download_client: reqwest::Client,
    settings: OpenAiSettings,
}

/// Request body for the Chat Completions API
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Request body for the Images API
#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`GuildError::Config`] if the API key cannot be used as a header
    /// value or the HTTP client cannot be built.
    pub fn new(settings: OpenAiSettings) -> GuildResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|_| GuildError::Config("OPENAI_API_KEY is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GuildError::Config(format!("failed to build HTTP client: {}", e)))?;

        let download_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GuildError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            download_client,
            settings,
        })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> GuildResult<String> {
        let url = self.settings.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GuildError::ExternalService(format!("request to {} failed: {}", path, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GuildError::ExternalService(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(GuildError::ExternalService(format!(
                "{} returned {}: {}",
                path,
                status,
                api_error_message(&text)
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    #[instrument(skip(self, prompt), fields(model = %self.settings.chat_model))]
    async fn complete(&self, prompt: String) -> GuildResult<String> {
        let request = ChatCompletionsRequest {
            model: &self.settings.chat_model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.settings.temperature,
        };

        let body = self.post_json("chat/completions", &request).await?;
        let content = parse_chat_response(&body)?;
        info!(content_len = content.len(), "Chat completion received");
        Ok(content)
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    #[instrument(skip(self, prompt), fields(model = %self.settings.image_model))]
    async fn generate_image(&self, prompt: String) -> GuildResult<String> {
        let request = ImageGenerationRequest {
            model: &self.settings.image_model,
            prompt: &prompt,
            size: IMAGE_SIZE,
            n: 1,
        };

        let body = self.post_json("images/generations", &request).await?;
        parse_image_response(&body)
    }

    async fn download(&self, url: String) -> GuildResult<Vec<u8>> {
        let response = self
            .download_client
            .get(&url)
            .send()
            .await
            .map_err(|e| GuildError::DownloadFailure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GuildError::DownloadFailure(format!(
                "image host returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GuildError::DownloadFailure(e.to_string()))?;
        debug!(bytes = bytes.len(), "Downloaded generated image");
        Ok(bytes.to_vec())
    }
}

/// Pull the assistant text out of a Chat Completions response body.
pub fn parse_chat_response(body: &str) -> GuildResult<String> {
    let response: ChatCompletionsResponse = serde_json::from_str(body)
        .map_err(|e| GuildError::ExternalService(format!("unexpected chat response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| GuildError::ExternalService("chat response had no content".to_string()))
}

/// Pull the first image URL out of an Images API response body.
pub fn parse_image_response(body: &str) -> GuildResult<String> {
    let response: ImageGenerationResponse = serde_json::from_str(body)
        .map_err(|e| GuildError::ExternalService(format!("unexpected image response: {}", e)))?;

    response
        .data
        .into_iter()
        .find_map(|image| image.url)
        .ok_or_else(|| GuildError::ExternalService("image response had no URL".to_string()))
}

/// Best-effort extraction of the `error.message` field of an API error body.
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().chars().take(200).collect())
}
