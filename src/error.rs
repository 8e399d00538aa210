use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generated content that does not match the expected JSON shape.
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// A TrueType file that could not be read or parsed.
    #[error("Font error: {0}")]
    Font(String),

    #[error("PDF generation error: {0}")]
    Pdf(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidContent(e.to_string())
    }
}
