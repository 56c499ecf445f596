pub mod diarize;
pub mod whisper;

use std::{fmt::Debug, future::Future, path::Path};

use digest_export::Segment;

/// Local speech-to-text over a prepared WAV file
pub trait Transcriber {
    type Error: Debug;

    fn transcribe(
        &self,
        audio: &Path,
    ) -> impl Future<Output = Result<TranscribeResponse, Self::Error>> + Send;
}

#[derive(Debug, Clone)]
pub struct TranscribeResponse {
    /// Total speech duration in seconds
    pub duration: f64,
    /// Detected language, when the model reports one
    pub language: Option<String>,
    pub segments: Vec<Segment>,
}
