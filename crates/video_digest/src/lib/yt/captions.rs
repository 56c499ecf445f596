use std::{ops::Deref, sync::LazyLock};

use digest_export::Segment;
use regex::Regex;

use crate::{
    parser::WatchPage,
    types::{CaptionTrack, PlayerResponse},
    yt::{watch_url, CaptionSource},
};

static TEXT_CUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text([^>]*)>(.*?)</text>").unwrap());
static START_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"start="([0-9.]+)""#).unwrap());
static DUR_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"dur="([0-9.]+)""#).unwrap());
static INNER_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Extract(#[from] crate::Error),
}

/// Fetches official caption tracks by scraping the watch page's player
/// response and downloading the selected timedtext track.
#[derive(Default)]
pub struct CaptionClient(pub reqwest::Client);

impl Deref for CaptionClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl CaptionClient {
    async fn fetch_watch_page(&self, video_id: &str) -> Result<WatchPage, CaptionError> {
        let html = self
            .get(watch_url(video_id))
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(html.into())
    }
}

impl CaptionSource for CaptionClient {
    type Error = CaptionError;

    #[tracing::instrument(skip(self))]
    async fn fetch_captions(
        &self,
        video_id: &str,
        lang: &str,
    ) -> Result<Option<Vec<Segment>>, Self::Error> {
        let page = self.fetch_watch_page(video_id).await?;
        let player: PlayerResponse = page.player_response()?;

        let tracks = player
            .captions
            .and_then(|c| c.player_captions_tracklist_renderer)
            .map(|r| r.caption_tracks)
            .unwrap_or_default();
        if tracks.is_empty() {
            tracing::debug!("Video advertises no caption tracks");
            return Ok(None);
        }

        let Some(track) = select_track(&tracks, lang) else {
            return Ok(None);
        };
        tracing::debug!(
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        let xml = self
            .get(track_url(track, lang))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let segments = parse_timedtext(&xml);
        Ok(if segments.is_empty() {
            None
        } else {
            Some(segments)
        })
    }
}

/// Track selection policy: the requested language first (human-authored
/// over generated), then any human-authored track, then whatever is left.
pub(crate) fn select_track<'a>(tracks: &'a [CaptionTrack], lang: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == lang && !t.is_generated())
        .or_else(|| tracks.iter().find(|t| t.language_code == lang))
        .or_else(|| tracks.iter().find(|t| !t.is_generated()))
        .or_else(|| tracks.first())
}

/// Appends a `tlang` translation request when the selected track is not in
/// the requested language but advertises translatability.
pub(crate) fn track_url(track: &CaptionTrack, lang: &str) -> String {
    if track.language_code != lang && track.is_translatable {
        format!("{}&tlang={lang}", track.base_url)
    } else {
        track.base_url.clone()
    }
}

/// Parses timedtext XML cues (`<text start=".." dur="..">`) into ordered
/// segments, dropping markup and empty cues.
pub(crate) fn parse_timedtext(xml: &str) -> Vec<Segment> {
    let mut segments = Vec::new();

    for cue in TEXT_CUE_RE.captures_iter(xml) {
        let attrs = &cue[1];
        let start = START_ATTR_RE
            .captures(attrs)
            .and_then(|c| c[1].parse::<f64>().ok())
            .unwrap_or(0.0);
        let duration = DUR_ATTR_RE
            .captures(attrs)
            .and_then(|c| c[1].parse::<f64>().ok())
            .unwrap_or(0.0);

        let stripped = INNER_TAG_RE.replace_all(&cue[2], "");
        let text = html_escape::decode_html_entities(stripped.as_ref())
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            continue;
        }

        segments.push(Segment::new(start, start + duration, text));
    }

    segments
}
