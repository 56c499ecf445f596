use std::sync::{Arc, Mutex};

use video_digest::TitleFetcher;

#[derive(Clone)]
pub struct MockTitleFetcher {
    pub title: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTitleFetcher {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            title: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TitleFetcher for MockTitleFetcher {
    type Error = anyhow::Error;

    async fn fetch_title(&self, video_id: &str) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.title.clone())
    }
}
