pub mod audio_handler;
pub mod captions;
pub mod oembed;

use std::{
    fmt::Debug,
    future::Future,
    path::{Path, PathBuf},
};

use digest_export::Segment;

pub const WATCH_BASE_URL: &str = "https://www.youtube.com/watch";

/// Canonical watch URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_BASE_URL}?v={video_id}")
}

/// Official caption retrieval. `Ok(None)` means the video exposes no usable
/// caption track; that is a signal to fall back, not an error.
pub trait CaptionSource {
    type Error: Debug;

    fn fetch_captions(
        &self,
        video_id: &str,
        lang: &str,
    ) -> impl Future<Output = Result<Option<Vec<Segment>>, Self::Error>> + Send;
}

/// Human-readable title lookup
pub trait TitleFetcher {
    type Error: Debug;

    fn fetch_title(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Audio acquisition for the local speech-to-text fallback: `download`
/// fetches best-audio into `audio_dl_path`, `prepare` converts the download
/// into the 16 kHz mono WAV the transcriber consumes.
pub trait AudioHandler {
    fn download(
        &self,
        video_id: &str,
        audio_dl_path: &Path,
    ) -> impl Future<Output = anyhow::Result<PathBuf>> + Send;

    fn prepare(
        &self,
        video_id: &str,
        source: &Path,
        audio_dl_path: &Path,
    ) -> impl Future<Output = anyhow::Result<PathBuf>> + Send;
}
