//! Reads text fields and the portrait embedding off an identity document.

use crate::{FaceModel, FaceModelError, Result as VerifyErrorResult, VerifyError, VisionError, VisionModel};

use idv_core::{ExtractedDetails, FaceEmbedding};

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;
use log::{error, info, warn};
use serde_json::Value;
use tempfile::NamedTempFile;

/// Instruction sent with every document image
pub const EXTRACTION_PROMPT: &str = r#"You read Indian identity documents. Identify the card in the image as exactly one of: "Voter ID", "Aadhaar card", "PAN card", "Driving License".

Answer with a single JSON object using only these keys:
{
  "card_type": "Voter ID | Aadhaar card | PAN card | Driving License",
  "name": "full name as printed",
  "dob": "date of birth, DD-MM-YYYY when possible",
  "aadhaar_no": "the 12-digit Aadhaar number, no spaces",
  "pan_no": "the Permanent Account Number",
  "license_no": "the driving licence number",
  "expiration_date": "licence expiry or 'Valid Till' date",
  "father_mother_name": "father's or mother's name",
  "voter_id_number": "the EPIC number, only on a Voter ID"
}

Aadhaar cards also print a 16-digit Virtual ID (VID). Never return the VID: aadhaar_no holds only the 12-digit Aadhaar number, and a VID is never a voter_id_number.
Leave out any key that does not apply to the card or cannot be read. Do not use placeholders such as "N/A". Write numbers without inner spaces."#;

/// Output of the extraction stage
#[derive(Debug, Clone)]
pub struct Extraction {
    pub details: ExtractedDetails,
    /// None when no usable face was found; the pipeline stops here
    pub embedding: Option<FaceEmbedding>,
}

pub struct DocumentExtractor {
    vision: Arc<dyn VisionModel>,
    face_model: Arc<dyn FaceModel>,
    face_contrast: f32,
    scratch_dir: PathBuf,
}

impl DocumentExtractor {
    pub fn new(
        vision: Arc<dyn VisionModel>,
        face_model: Arc<dyn FaceModel>,
        face_contrast: f32,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            vision,
            face_model,
            face_contrast,
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn is_ocr_available(&self) -> bool {
        self.vision.is_available()
    }

    /// Extract text fields and the document face embedding.
    ///
    /// Collaborator failures are recorded in the returned details. Only an
    /// unavailable OCR service or a failed background task is an error.
    pub async fn extract(&self, document: &Path) -> VerifyErrorResult<Extraction> {
        info!("Processing ID card {}", document.display());

        let mut details = match self.read_text(document).await? {
            Ok(details) => details,
            Err(message) => {
                error!("ID card processing failed: {message}");
                return Ok(Extraction {
                    details: ExtractedDetails {
                        processing_error: Some(message),
                        ..ExtractedDetails::default()
                    },
                    embedding: None,
                });
            }
        };

        if details.parse_error.is_some() {
            warn!("OCR reply was not valid JSON; continuing with face extraction");
        }

        let embedding = self.embed_portrait(document, &mut details).await?;

        Ok(Extraction { details, embedding })
    }

    /// Outer error: OCR unavailable. Inner error: processing failure message.
    async fn read_text(
        &self,
        document: &Path,
    ) -> VerifyErrorResult<Result<ExtractedDetails, String>> {
        let bytes = match tokio::fs::read(document).await {
            Ok(bytes) => bytes,
            Err(e) => return Ok(Err(format!("Cannot read ID card image: {e}"))),
        };

        let jpeg = match tokio::task::spawn_blocking(move || to_rgb_jpeg(&bytes)).await? {
            Ok(jpeg) => jpeg,
            Err(e) => return Ok(Err(format!("ID card image is unreadable: {e}"))),
        };

        let reply = match self
            .vision
            .generate(&jpeg, "image/jpeg", EXTRACTION_PROMPT)
            .await
        {
            Ok(reply) => reply,
            Err(VisionError::Unavailable { message, .. }) => {
                return Err(VerifyError::ocr_unavailable(message));
            }
            Err(e) => return Ok(Err(format!("OCR request failed: {}", e.detail()))),
        };

        let details = parse_ocr_reply(&reply);
        info!(
            "OCR extracted card type {:?}",
            details.card_type.as_deref().unwrap_or("unknown")
        );
        Ok(Ok(details))
    }

    /// Detect the portrait, enhance it, and embed it. Failures land in `details`.
    async fn embed_portrait(
        &self,
        document: &Path,
        details: &mut ExtractedDetails,
    ) -> VerifyErrorResult<Option<FaceEmbedding>> {
        let faces = match self.face_model.extract_faces(document).await {
            Ok(faces) => faces,
            Err(FaceModelError::FaceNotDetected { message, .. }) => {
                warn!("No face on ID card: {message}");
                details.face_detection_error = Some(format!("ID Face detection failed: {message}"));
                return Ok(None);
            }
            Err(e) => {
                error!("Face extraction on ID card failed: {e}");
                details.processing_error = Some(format!("Face extraction failed: {}", e.detail()));
                return Ok(None);
            }
        };

        let Some(face) = faces.into_iter().next() else {
            warn!("Face service returned no faces for the ID card");
            details.face_detection_error = Some("No face detected on ID card".to_string());
            return Ok(None);
        };
        info!("ID card face detected (confidence {:.2})", face.confidence);

        let contrast = self.face_contrast;
        let scratch_dir = self.scratch_dir.clone();
        let crop = tokio::task::spawn_blocking(move || {
            write_enhanced_crop(&face.image, contrast, &scratch_dir)
        })
        .await?;

        // Removed when dropped at the end of this function
        let crop = match crop {
            Ok(crop) => crop,
            Err(message) => {
                error!("{message}");
                details.face_embedding_error = Some(message);
                return Ok(None);
            }
        };

        match self.face_model.represent(crop.path()).await {
            Ok(embedding) if !embedding.is_empty() => {
                info!("Generated {}-d embedding from ID card face", embedding.len());
                Ok(Some(embedding))
            }
            Ok(_) => {
                details.face_embedding_error =
                    Some("Failed to generate embedding from ID face".to_string());
                Ok(None)
            }
            Err(FaceModelError::FaceNotDetected { message, .. }) => {
                details.face_detection_error = Some(format!("ID Face detection failed: {message}"));
                Ok(None)
            }
            Err(e) => {
                error!("Embedding of ID card face failed: {e}");
                details.face_embedding_error = Some(format!(
                    "Failed to generate embedding from ID face: {}",
                    e.detail()
                ));
                Ok(None)
            }
        }
    }
}

/// Parse the OCR model's reply into details.
///
/// Markdown fences are stripped first. When the remainder does not parse,
/// the outermost `{...}` slice is tried before giving up.
pub fn parse_ocr_reply(reply: &str) -> ExtractedDetails {
    let cleaned = reply.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    if let Some(details) = parse_object(cleaned) {
        return details;
    }

    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}'))
        && start < end
        && let Some(details) = parse_object(&cleaned[start..=end])
    {
        return details;
    }

    ExtractedDetails::unparseable(cleaned)
}

fn parse_object(text: &str) -> Option<ExtractedDetails> {
    let value: Value = serde_json::from_str(text).ok()?;
    ExtractedDetails::from_ocr_value(&value).ok()
}

/// Decode any supported image and re-encode it as RGB JPEG
fn to_rgb_jpeg(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Jpeg)?;
    Ok(out.into_inner())
}

/// Contrast-enhance a face crop and write it to a scratch JPEG file
fn write_enhanced_crop(
    face: &[u8],
    contrast: f32,
    scratch_dir: &Path,
) -> Result<NamedTempFile, String> {
    let enhanced = image::load_from_memory(face)
        .map_err(|e| format!("Failed to decode ID face crop: {e}"))?
        .adjust_contrast(contrast)
        .to_rgb8();

    let mut file = tempfile::Builder::new()
        .prefix("id_face_")
        .suffix(".jpg")
        .tempfile_in(scratch_dir)
        .map_err(|e| format!("Failed to create ID face scratch file: {e}"))?;

    enhanced
        .write_to(file.as_file_mut(), ImageFormat::Jpeg)
        .map_err(|e| format!("Failed to write ID face scratch file: {e}"))?;

    Ok(file)
}
