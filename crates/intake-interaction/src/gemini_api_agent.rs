//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls `models/<model>:generateContent` for text (optionally JSON mode)
//! and for image generation, where the image comes back as inline data.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use intake_core::config::GenerationConfig;
use intake_core::{IntakeError, Result};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// An image sent to or received from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 payload without the data-URL header
    pub data: String,
}

impl InlineImage {
    /// Splits a `data:<mime>;base64,<payload>` URL. A bare base64 string is
    /// accepted as JPEG.
    pub fn from_data_url(input: &str) -> Self {
        match input
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
        {
            Some((header, payload)) => Self {
                mime_type: header
                    .strip_suffix(";base64")
                    .unwrap_or(header)
                    .to_string(),
                data: payload.to_string(),
            },
            None => Self {
                mime_type: "image/jpeg".to_string(),
                data: input.to_string(),
            },
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: BASE64_STANDARD.encode(bytes),
        }
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Reads the API key from the environment variable named in `config`.
    ///
    /// The text model is used; switch with [`GeminiApiAgent::with_model`].
    pub fn try_from_config(config: &GenerationConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            IntakeError::config(format!(
                "Environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        if api_key.trim().is_empty() {
            return Err(IntakeError::config(format!(
                "Environment variable {} is empty",
                config.api_key_env
            )));
        }

        let model = if config.text_model.is_empty() {
            DEFAULT_GEMINI_MODEL
        } else {
            config.text_model.as_str()
        };
        Ok(Self::new(api_key, model).with_base_url(config.base_url.clone()))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates text. With `json_mode` the model is asked for
    /// `application/json` output.
    pub async fn generate_text(&self, prompt: &str, json_mode: bool) -> Result<String> {
        let generation_config = json_mode.then(|| GenerationSettings {
            response_mime_type: Some("application/json".to_string()),
            response_modalities: None,
            image_config: None,
        });
        let request = self.build_request(prompt, None, generation_config);
        let response = self.send_request(&request).await?;
        extract_text_response(response)
    }

    /// Generates one image and returns it as a data URL.
    pub async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&InlineImage>,
        aspect_ratio: &str,
    ) -> Result<String> {
        let generation_config = Some(GenerationSettings {
            response_mime_type: None,
            response_modalities: Some(vec!["IMAGE".to_string()]),
            image_config: Some(ImageSettings {
                aspect_ratio: aspect_ratio.to_string(),
            }),
        });
        let request = self.build_request(prompt, reference, generation_config);
        let response = self.send_request(&request).await?;
        extract_image_response(response).map(|image| image.to_data_url())
    }

    fn build_request(
        &self,
        prompt: &str,
        reference: Option<&InlineImage>,
        generation_config: Option<GenerationSettings>,
    ) -> GenerateContentRequest {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        if let Some(image) = reference {
            parts.push(Part::InlineData {
                inline_data: InlineDataPayload {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config,
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| IntakeError::generation(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        response
            .json()
            .await
            .map_err(|err| IntakeError::generation(format!("Failed to parse Gemini response: {err}")))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationSettings>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageSettings>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageSettings {
    aspect_ratio: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartResponse {
    text: Option<String>,
    inline_data: Option<InlineDataPayload>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn first_parts(response: GenerateContentResponse) -> Vec<PartResponse> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    let text: String = first_parts(response)
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    if text.trim().is_empty() {
        return Err(IntakeError::generation(
            "Gemini API returned no text in the response candidates",
        ));
    }
    Ok(text)
}

fn extract_image_response(response: GenerateContentResponse) -> Result<InlineImage> {
    first_parts(response)
        .into_iter()
        .find_map(|part| part.inline_data)
        .map(|inline| InlineImage {
            mime_type: inline.mime_type,
            data: inline.data,
        })
        .ok_or_else(|| IntakeError::generation("Gemini API returned no image data"))
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> IntakeError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    let mut text = format!("HTTP {}: {}", status.as_u16(), message);
    if is_retryable {
        text.push_str(" (retryable");
        if let Some(delay) = retry_after {
            text.push_str(&format!(", retry after {}s", delay.as_secs()));
        }
        text.push(')');
    }
    IntakeError::generation(text)
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Retry-After HTTP-date parsing is omitted
    None
}
