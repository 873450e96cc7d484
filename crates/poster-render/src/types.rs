use poster_layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("QR code error: {0}")]
    Qr(#[from] qrcode::types::QrError),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Invalid book manifest: {0}")]
    Manifest(String),
    #[error("No books to render: {0}")]
    NoBooks(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
