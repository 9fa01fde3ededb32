use crate::{VisionError, VisionModel, VisionResult};

use idv_config::OcrConfig;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::debug;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};

/// Gemini `generateContent` REST client
pub struct GeminiVisionClient {
    client: ReqwestClient,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 2],
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GeminiVisionClient {
    pub fn new(config: &OcrConfig) -> VisionResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout())
            .build()
            .map_err(VisionError::from_reqwest)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl VisionModel for GeminiVisionClient {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, image: &[u8], mime_type: &str, prompt: &str) -> VisionResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(VisionError::unavailable("OCR API key is not configured"));
        };

        let body = GenerateRequest {
            contents: [Content {
                parts: [
                    RequestPart::Text { text: prompt },
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: BASE64.encode(image),
                        },
                    },
                ],
            }],
        };

        debug!("Sending {} byte image to {}", image.len(), self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(VisionError::from_reqwest)?;

        let status = response.status();
        let text = response.text().await.map_err(VisionError::from_reqwest)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            return Err(VisionError::api(status.as_u16(), message));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| VisionError::invalid_response(e.to_string()))?;

        let reply: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if reply.trim().is_empty() {
            return Err(VisionError::invalid_response("response contained no text"));
        }

        Ok(reply)
    }
}
