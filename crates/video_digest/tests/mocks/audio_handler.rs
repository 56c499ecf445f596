use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use video_digest::AudioHandler;

#[derive(Clone)]
pub struct MockAudioHandler {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl Default for MockAudioHandler {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockAudioHandler {
    pub fn failing(msg: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl AudioHandler for MockAudioHandler {
    async fn download(&self, video_id: &str, _audio_dl_path: &Path) -> anyhow::Result<PathBuf> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.calls.lock().unwrap().push(video_id.to_string());
        Ok(PathBuf::from(format!("/tmp/mock/{video_id}.m4a")))
    }

    async fn prepare(
        &self,
        video_id: &str,
        _source: &Path,
        audio_dl_path: &Path,
    ) -> anyhow::Result<PathBuf> {
        Ok(audio_dl_path.join(format!("{video_id}.wav")))
    }
}
