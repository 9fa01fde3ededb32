use crate::{DetectedFace, FaceComparison, FaceModel, FaceModelError, FaceModelResult, FaceReference};

use idv_config::FaceConfig;
use idv_core::FaceEmbedding;

use std::path::Path;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::debug;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client for a DeepFace-compatible HTTP service
/// (`/extract_faces`, `/represent`, `/verify`).
pub struct FaceServiceClient {
    client: ReqwestClient,
    base_url: String,
    model_name: String,
    detector_backend: String,
    distance_metric: String,
}

#[derive(Serialize)]
struct ExtractFacesRequest<'a> {
    img: String,
    detector_backend: &'a str,
    enforce_detection: bool,
    align: bool,
}

#[derive(Serialize)]
struct RepresentRequest<'a> {
    img: String,
    model_name: &'a str,
    detector_backend: &'a str,
    enforce_detection: bool,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    img1: String,
    /// Image as a data URI, or a precomputed embedding
    img2: Value,
    model_name: &'a str,
    detector_backend: &'a str,
    distance_metric: &'a str,
    anti_spoofing: bool,
    enforce_detection: bool,
}

#[derive(Deserialize)]
struct Results<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Deserialize)]
struct ExtractedFace {
    face: String,
    #[serde(default)]
    confidence: f64,
}

#[derive(Deserialize)]
struct Representation {
    embedding: Vec<f64>,
}

#[derive(Deserialize)]
struct VerifyResponse {
    verified: bool,
    distance: f64,
    threshold: f64,
    #[serde(default)]
    is_spoof: Option<bool>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl FaceServiceClient {
    pub fn new(config: &FaceConfig) -> FaceModelResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout())
            .build()
            .map_err(FaceModelError::from_reqwest)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_name: config.model_name.clone(),
            detector_backend: config.detector_backend.clone(),
            distance_metric: config.distance_metric.clone(),
        })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> FaceModelResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(FaceModelError::from_reqwest)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(FaceModelError::from_reqwest)?;

        // The service reports failures as {"error": "..."}, sometimes with 200
        if let Ok(ErrorResponse { error }) = serde_json::from_str::<ErrorResponse>(&text) {
            return Err(FaceModelError::from_service_message(status.as_u16(), error));
        }

        if !status.is_success() {
            return Err(FaceModelError::from_service_message(status.as_u16(), text));
        }

        serde_json::from_str(&text).map_err(|e| {
            FaceModelError::invalid_response(format!("{path}: {e}"))
        })
    }
}

#[async_trait]
impl FaceModel for FaceServiceClient {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn distance_metric(&self) -> &str {
        &self.distance_metric
    }

    async fn extract_faces(&self, image: &Path) -> FaceModelResult<Vec<DetectedFace>> {
        let body = ExtractFacesRequest {
            img: data_uri(image).await?,
            detector_backend: &self.detector_backend,
            enforce_detection: true,
            align: true,
        };

        let response: Results<ExtractedFace> = self.post("/extract_faces", &body).await?;

        response
            .results
            .into_iter()
            .map(|face| {
                Ok(DetectedFace {
                    image: decode_image(&face.face)?,
                    confidence: face.confidence,
                })
            })
            .collect()
    }

    async fn represent(&self, image: &Path) -> FaceModelResult<FaceEmbedding> {
        let body = RepresentRequest {
            img: data_uri(image).await?,
            model_name: &self.model_name,
            detector_backend: &self.detector_backend,
            enforce_detection: true,
        };

        let response: Results<Representation> = self.post("/represent", &body).await?;

        response
            .results
            .into_iter()
            .next()
            .map(|representation| FaceEmbedding::new(representation.embedding))
            .filter(|embedding| !embedding.is_empty())
            .ok_or_else(|| FaceModelError::embedding_failed("service returned no embedding"))
    }

    async fn verify(
        &self,
        live: &Path,
        reference: FaceReference<'_>,
        anti_spoofing: bool,
    ) -> FaceModelResult<FaceComparison> {
        let img2 = match reference {
            FaceReference::Image(path) => Value::String(data_uri(path).await?),
            FaceReference::Embedding(embedding) => serde_json::to_value(embedding)
                .map_err(|e| FaceModelError::invalid_response(e.to_string()))?,
        };

        let body = VerifyRequest {
            img1: data_uri(live).await?,
            img2,
            model_name: &self.model_name,
            detector_backend: &self.detector_backend,
            distance_metric: &self.distance_metric,
            anti_spoofing,
            enforce_detection: true,
        };

        let response: VerifyResponse = self.post("/verify", &body).await?;

        Ok(FaceComparison {
            verified: response.verified,
            distance: response.distance,
            threshold: response.threshold,
            is_spoof: response.is_spoof,
        })
    }
}

/// Read an image file into a base64 data URI
async fn data_uri(path: &Path) -> FaceModelResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| FaceModelError::io(path, e))?;

    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        _ => "image/jpeg",
    };

    Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}

/// Decode a base64 image, with or without a data URI prefix
fn decode_image(encoded: &str) -> FaceModelResult<Vec<u8>> {
    let payload = encoded
        .split_once(',')
        .map_or(encoded, |(_, data)| data);

    BASE64
        .decode(payload.trim())
        .map_err(|e| FaceModelError::invalid_response(format!("face image is not base64: {e}")))
}
