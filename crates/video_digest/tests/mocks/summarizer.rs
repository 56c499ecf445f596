use std::sync::{Arc, Mutex};

use digest_export::Summary;
use video_digest::Summarizer;

#[derive(Clone)]
pub struct MockSummarizer {
    pub tldr: String,
    pub detailed: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(tldr: &str, detailed: &str) -> Self {
        Self {
            tldr: tldr.to_string(),
            detailed: detailed.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            tldr: String::new(),
            detailed: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Summarizer for MockSummarizer {
    const MAX_INPUT_TOKENS: usize = 1024;

    type Error = anyhow::Error;

    async fn summarize(&self, transcript: &str) -> Result<Summary, Self::Error> {
        self.calls.lock().unwrap().push(transcript.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(Summary {
            tldr: self.tldr.clone(),
            detailed: self.detailed.clone(),
        })
    }
}
