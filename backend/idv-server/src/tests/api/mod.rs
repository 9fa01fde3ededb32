mod error;
mod uploaded_image;
