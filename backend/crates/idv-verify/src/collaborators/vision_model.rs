use crate::VisionResult;

use async_trait::async_trait;

/// Multimodal model that answers a text prompt about one image.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// False when the model cannot be called at all (e.g. no API key)
    fn is_available(&self) -> bool;

    /// Send `image` with `prompt` and return the model's text reply
    async fn generate(&self, image: &[u8], mime_type: &str, prompt: &str) -> VisionResult<String>;
}
