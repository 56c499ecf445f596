#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(&'static str),
    #[error("Could not parse a YouTube video ID from {0:?}")]
    InvalidVideoRef(String),
}
