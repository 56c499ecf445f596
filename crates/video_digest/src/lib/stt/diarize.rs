use std::{fmt::Debug, future::Future, path::Path};

use digest_export::Segment;
use serde::Deserialize;

/// Environment variable holding the inference token that enables diarization
pub const HF_TOKEN_ENV: &str = "HF_TOKEN";

/// Speaker diarization over a prepared WAV file
pub trait Diarizer {
    const DIARIZATION_MODEL: &'static str;

    type Error: Debug;

    fn diarize(
        &self,
        audio: &Path,
    ) -> impl Future<Output = Result<Vec<DiarizedTurn>, Self::Error>> + Send;
}

/// One speaker turn reported by the diarization model
#[derive(Debug, Clone, Deserialize)]
pub struct DiarizedTurn {
    pub start: f64,
    pub end: f64,
    pub speaker: String,
}

#[derive(Debug, thiserror::Error)]
pub enum HfError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Diarization through the hosted inference endpoint, gated on a bearer
/// token from the environment.
pub struct HfDiarizer {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl HfDiarizer {
    const BASE_URL: &'static str = "https://api-inference.huggingface.co";

    pub fn new(token: impl Into<String>) -> Self {
        HfDiarizer {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: Self::BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Configuration-time capability check: `None` when no token is set
    pub fn from_env() -> Option<Self> {
        std::env::var(HF_TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(Self::new)
    }
}

impl Diarizer for HfDiarizer {
    const DIARIZATION_MODEL: &'static str = "pyannote/speaker-diarization-3.1";

    type Error = HfError;

    #[tracing::instrument(skip(self))]
    async fn diarize(&self, audio: &Path) -> Result<Vec<DiarizedTurn>, Self::Error> {
        let bytes = tokio::fs::read(audio).await?;

        let resp = self
            .client
            .post(format!(
                "{}/models/{}",
                self.base_url,
                Self::DIARIZATION_MODEL
            ))
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "audio/wav")
            .body(bytes)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(HfError::Api { status, message });
        }

        Ok(resp.json::<Vec<DiarizedTurn>>().await?)
    }
}

/// Placeholder filling the processor's diarizer slot when diarization was
/// not requested; never invoked.
#[derive(Debug, Default, Clone)]
pub struct NoDiarization;

impl Diarizer for NoDiarization {
    const DIARIZATION_MODEL: &'static str = "none";

    type Error = std::convert::Infallible;

    async fn diarize(&self, _audio: &Path) -> Result<Vec<DiarizedTurn>, Self::Error> {
        Ok(Vec::new())
    }
}

/// Labels each segment with the first diarization turn whose time interval
/// overlaps the segment's interval; segments with no overlapping turn stay
/// unlabeled.
pub fn assign_speakers(segments: &mut [Segment], turns: &[DiarizedTurn]) {
    for segment in segments {
        if let Some(turn) = turns.iter().find(|t| segment.overlaps(t.start, t.end)) {
            segment.speaker = Some(turn.speaker.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(start: f64, end: f64, speaker: &str) -> DiarizedTurn {
        DiarizedTurn {
            start,
            end,
            speaker: speaker.to_string(),
        }
    }

    #[test]
    fn assigns_first_overlapping_turn() {
        let mut segments = vec![
            Segment::new(0.0, 4.0, "hello"),
            Segment::new(4.0, 8.0, "there"),
        ];
        let turns = vec![
            turn(0.0, 3.0, "SPEAKER_00"),
            turn(2.0, 5.0, "SPEAKER_01"),
            turn(5.0, 9.0, "SPEAKER_02"),
        ];

        assign_speakers(&mut segments, &turns);

        assert_eq!(segments[0].speaker.as_deref(), Some("SPEAKER_00"));
        // both later turns overlap; the first in track order wins
        assert_eq!(segments[1].speaker.as_deref(), Some("SPEAKER_01"));
    }

    #[test]
    fn non_overlapping_segments_stay_unlabeled() {
        let mut segments = vec![Segment::new(10.0, 12.0, "quiet part")];
        assign_speakers(&mut segments, &[turn(0.0, 5.0, "SPEAKER_00")]);
        assert!(segments[0].speaker.is_none());
    }
}
