pub mod uploaded_image;
pub mod verification;
