use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use video_digest::{DiarizedTurn, Diarizer};

#[derive(Clone)]
pub struct MockDiarizer {
    pub turns: Vec<DiarizedTurn>,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl MockDiarizer {
    pub fn new(turns: Vec<DiarizedTurn>) -> Self {
        Self {
            turns,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            turns: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Diarizer for MockDiarizer {
    const DIARIZATION_MODEL: &'static str = "mock-pyannote";

    type Error = anyhow::Error;

    async fn diarize(&self, audio: &Path) -> Result<Vec<DiarizedTurn>, Self::Error> {
        self.calls.lock().unwrap().push(audio.to_path_buf());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.turns.clone())
    }
}
