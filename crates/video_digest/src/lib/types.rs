//! Serde projections of the YouTube payloads the pipeline reads. Only the
//! fields we consume are modeled; everything else is ignored.

use serde::Deserialize;

/// The slice of `ytInitialPlayerResponse` that carries caption data
#[derive(Debug, Deserialize)]
pub struct PlayerResponse {
    #[serde(default)]
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
    #[serde(default)]
    pub player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracklistRenderer {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrack>,
}

/// One caption track advertised for a video
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `"asr"` marks machine-generated tracks
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_translatable: bool,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Response of the public oEmbed metadata endpoint
#[derive(Debug, Deserialize)]
pub struct OEmbedResponse {
    pub title: String,
}
