use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A timed span of transcript speech. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the span, in seconds from the beginning of the video
    pub start: f64,
    /// End of the span, in seconds
    pub end: f64,
    pub text: String,
    /// Speaker label assigned by diarization, when available
    #[serde(default)]
    pub speaker: Option<String>,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Segment {
            start,
            end,
            text: text.into(),
            speaker: None,
        }
    }

    /// Whether this segment's time interval overlaps `[start, end)`
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        start < self.end && end > self.start
    }
}

/// The short and detailed summary produced once per video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Single concise sentence, at most 30 words
    pub tldr: String,
    /// Longer structured passage
    pub detailed: String,
}

/// The unit passed to export: everything known about one processed video.
///
/// Serializes with the flat keys `title`, `url`, `tldr`, `detailed`,
/// `transcript`, `segments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub title: String,
    pub url: String,
    #[serde(flatten)]
    pub summary: Summary,
    /// Concatenated transcript text, segment texts joined with single spaces
    pub transcript: String,
    pub segments: Vec<Segment>,
}

impl Content {
    /// Merges the pipeline stage outputs into one record, deriving the
    /// transcript text from the segments.
    pub fn assemble(
        title: impl Into<String>,
        url: impl Into<String>,
        summary: Summary,
        segments: Vec<Segment>,
    ) -> Self {
        let transcript = transcript_text(&segments);
        Content {
            title: title.into(),
            url: url.into(),
            summary,
            transcript,
            segments,
        }
    }
}

/// Segment texts joined with single spaces, empty spans dropped
pub fn transcript_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .join(" ")
}
