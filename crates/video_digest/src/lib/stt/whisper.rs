use std::path::{Path, PathBuf};

use digest_export::Segment;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::stt::{TranscribeResponse, Transcriber};

#[derive(Debug, thiserror::Error)]
pub enum WhisperError {
    #[error("Whisper model not found at {0}. Download a ggml model there (e.g. from the whisper.cpp model zoo) or point --model-dir at one")]
    ModelMissing(PathBuf),
    #[error("Failed to read audio: {0}")]
    Audio(#[from] hound::Error),
    #[error("Whisper error: {0}")]
    Model(#[from] whisper_rs::WhisperError),
    #[error("Model produced no speech segments")]
    NoSpeech,
}

/// Runs a local ggml Whisper model over a prepared 16 kHz mono WAV file
pub struct WhisperTranscriber {
    model_path: PathBuf,
    language: Option<String>,
}

impl WhisperTranscriber {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        WhisperTranscriber {
            model_path: model_path.into(),
            language: None,
        }
    }

    /// Pins the decode language instead of letting the model detect it
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    /// `ggml-<size>.bin` under the model directory, for the CLI's
    /// tiny/base/small/medium/large size selector
    pub fn model_path_for(size: &str, model_dir: &Path) -> PathBuf {
        model_dir.join(format!("ggml-{size}.bin"))
    }

    pub fn default_model_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("video-digest")
            .join("models")
    }

    fn read_samples(audio: &Path) -> Result<Vec<f32>, WhisperError> {
        let mut reader = hound::WavReader::open(audio)?;
        reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32).map_err(WhisperError::from))
            .collect()
    }

    fn run_model(&self, samples: &[f32]) -> Result<TranscribeResponse, WhisperError> {
        let ctx_params = WhisperContextParameters {
            use_gpu: true,
            ..Default::default()
        };
        let model_path = self.model_path.to_string_lossy();
        let ctx = WhisperContext::new_with_params(&model_path, ctx_params)?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_print_progress(false);
        params.set_print_special(false);
        params.set_print_realtime(false);
        if let Some(lang) = &self.language {
            params.set_language(Some(lang.as_str()));
        }

        let mut state = ctx.create_state()?;
        state.full(params, samples)?;

        let mut segments = Vec::new();
        for segment in state.as_iter() {
            let Ok(text) = segment.to_str() else {
                continue;
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            // whisper timestamps are centiseconds
            segments.push(Segment::new(
                segment.start_timestamp() as f64 / 100.0,
                segment.end_timestamp() as f64 / 100.0,
                text,
            ));
        }

        if segments.is_empty() {
            return Err(WhisperError::NoSpeech);
        }

        let language = whisper_rs::get_lang_str(state.full_lang_id_from_state())
            .map(str::to_string);
        let duration = segments.last().map(|s| s.end).unwrap_or(0.0);

        Ok(TranscribeResponse {
            duration,
            language,
            segments,
        })
    }
}

impl Transcriber for WhisperTranscriber {
    type Error = WhisperError;

    #[tracing::instrument(skip(self), fields(model = %self.model_path.display()))]
    async fn transcribe(&self, audio: &Path) -> Result<TranscribeResponse, Self::Error> {
        if !self.model_path.exists() {
            return Err(WhisperError::ModelMissing(self.model_path.clone()));
        }

        let samples = Self::read_samples(audio)?;
        tracing::info!(samples = samples.len(), "Running local transcription");
        self.run_model(&samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_path_follows_ggml_naming() {
        let path = WhisperTranscriber::model_path_for("medium", Path::new("/models"));
        assert_eq!(path, PathBuf::from("/models/ggml-medium.bin"));
    }

    #[tokio::test]
    async fn missing_model_is_reported_with_its_path() {
        let transcriber = WhisperTranscriber::new("/nonexistent/ggml-tiny.bin");
        let err = transcriber
            .transcribe(Path::new("/tmp/whatever.wav"))
            .await
            .unwrap_err();
        assert!(matches!(err, WhisperError::ModelMissing(p) if p.ends_with("ggml-tiny.bin")));
    }
}
