pub mod extractive;
pub mod seq2seq;

use std::{fmt::Debug, future::Future, sync::LazyLock};

use digest_export::Summary;
use regex::Regex;

pub use extractive::ExtractiveSummarizer;
pub use seq2seq::Seq2SeqSummarizer;

/// Fixed characters-per-token approximation used to budget model input
pub const APPROX_CHARS_PER_TOKEN: usize = 4;
/// Fraction of the token budget actually filled, headroom for tokenizer drift
const BUDGET_FILL_PERCENT: usize = 85;
const TLDR_MAX_WORDS: usize = 30;

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?]["')\]]*\s+"#).unwrap());

/// Reduces a transcript into the short + detailed [`Summary`]
pub trait Summarizer {
    /// Token budget a single model call may consume
    const MAX_INPUT_TOKENS: usize = 1024;

    type Error: Debug;

    fn summarize(
        &self,
        transcript: &str,
    ) -> impl Future<Output = Result<Summary, Self::Error>> + Send;
}

/// Character budget for one model call under the chars-per-token heuristic
pub(crate) fn chunk_budget(max_input_tokens: usize) -> usize {
    max_input_tokens * APPROX_CHARS_PER_TOKEN * BUDGET_FILL_PERCENT / 100
}

/// Splits on sentence boundaries (terminal punctuation followed by
/// whitespace); a trailing unterminated sentence is kept.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last = 0;

    for boundary in SENTENCE_END_RE.find_iter(text) {
        sentences.push(text[last..boundary.end()].trim());
        last = boundary.end();
    }
    if last < text.len() {
        sentences.push(text[last..].trim());
    }

    sentences.retain(|s| !s.is_empty());
    sentences
}

/// Splits `text` into chunks of at most `max_chars` characters, preferring
/// sentence boundaries and hard-splitting sentences that alone exceed the
/// bound. Text within the bound comes back as a single chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut buf = String::new();
    let mut buf_chars = 0usize;

    for sentence in split_sentences(text) {
        let sentence_chars = sentence.chars().count();

        if sentence_chars > max_chars {
            if !buf.is_empty() {
                chunks.push(std::mem::take(&mut buf));
                buf_chars = 0;
            }
            let mut rest = sentence;
            while rest.chars().count() > max_chars {
                let split_at = rest
                    .char_indices()
                    .nth(max_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                chunks.push(rest[..split_at].to_string());
                rest = &rest[split_at..];
            }
            if !rest.is_empty() {
                buf.push_str(rest);
                buf_chars = rest.chars().count();
            }
            continue;
        }

        let separator = usize::from(!buf.is_empty());
        if buf_chars + separator + sentence_chars > max_chars {
            chunks.push(std::mem::take(&mut buf));
            buf_chars = 0;
        }
        if !buf.is_empty() {
            buf.push(' ');
            buf_chars += 1;
        }
        buf.push_str(sentence);
        buf_chars += sentence_chars;
    }

    if !buf.is_empty() {
        chunks.push(buf);
    }
    chunks
}

/// The TL;DR heuristic: first sentence of the detailed summary, truncated
/// to 30 words with an ellipsis marker when longer.
pub fn tldr_from(detailed: &str) -> String {
    let first = split_sentences(detailed)
        .into_iter()
        .next()
        .unwrap_or(detailed)
        .trim();

    let words: Vec<&str> = first.split_whitespace().collect();
    if words.len() > TLDR_MAX_WORDS {
        format!("{}…", words[..TLDR_MAX_WORDS].join(" "))
    } else {
        first.to_string()
    }
}

/// The summarization backend, decided once at configuration time: a
/// seq2seq endpoint when one is configured, the extractive fallback
/// otherwise.
pub enum ConfiguredSummarizer {
    Seq2Seq(Seq2SeqSummarizer),
    Extractive(ExtractiveSummarizer),
}

impl ConfiguredSummarizer {
    pub fn from_config(
        endpoint: Option<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        match endpoint {
            Some(url) => {
                let model = model.into();
                tracing::info!(%model, "Using seq2seq summarization endpoint");
                let mut summarizer = Seq2SeqSummarizer::new(url, model);
                if let Some(key) = api_key {
                    summarizer = summarizer.with_api_key(key);
                }
                ConfiguredSummarizer::Seq2Seq(summarizer)
            }
            None => {
                tracing::info!("No summarization endpoint configured, using extractive fallback");
                ConfiguredSummarizer::Extractive(ExtractiveSummarizer::default())
            }
        }
    }
}

impl Summarizer for ConfiguredSummarizer {
    type Error = anyhow::Error;

    async fn summarize(&self, transcript: &str) -> Result<Summary, Self::Error> {
        match self {
            ConfiguredSummarizer::Seq2Seq(s) => {
                s.summarize(transcript).await.map_err(anyhow::Error::from)
            }
            ConfiguredSummarizer::Extractive(s) => {
                s.summarize(transcript).await.map_err(|never| match never {})
            }
        }
    }
}
