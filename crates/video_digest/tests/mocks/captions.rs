use std::sync::{Arc, Mutex};

use digest_export::Segment;
use video_digest::CaptionSource;

#[derive(Clone)]
pub struct MockCaptionSource {
    pub segments: Option<Vec<Segment>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockCaptionSource {
    pub fn with_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments: Some(segments),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            segments: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            segments: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl CaptionSource for MockCaptionSource {
    type Error = anyhow::Error;

    async fn fetch_captions(
        &self,
        video_id: &str,
        _lang: &str,
    ) -> Result<Option<Vec<Segment>>, Self::Error> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.segments.clone())
    }
}
