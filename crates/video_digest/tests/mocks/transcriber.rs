use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use digest_export::Segment;
use video_digest::{TranscribeResponse, Transcriber};

#[derive(Clone)]
pub struct MockTranscriber {
    pub segments: Vec<Segment>,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriber {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            segments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Transcriber for MockTranscriber {
    type Error = anyhow::Error;

    async fn transcribe(&self, audio: &Path) -> Result<TranscribeResponse, Self::Error> {
        self.calls.lock().unwrap().push(audio.to_path_buf());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(TranscribeResponse {
            duration: self.segments.last().map(|s| s.end).unwrap_or(0.0),
            language: Some("en".to_string()),
            segments: self.segments.clone(),
        })
    }
}
