pub mod face_model;
pub mod face_service_client;
pub mod gemini_client;
pub mod vision_model;
