use serde::Deserialize;

use crate::summarize::{chunk_budget, chunk_text, tldr_from, Summarizer};
use digest_export::Summary;

#[derive(Debug, thiserror::Error)]
pub enum Seq2SeqError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Model returned an empty summary")]
    EmptySummary,
}

/// Summarization through a pretrained sequence-to-sequence model behind an
/// OpenAI-compatible chat-completions endpoint (hosted or a local model
/// server). Long transcripts are chunked under the model's token budget,
/// summarized per chunk, and reduced by a meta-summarization pass.
pub struct Seq2SeqSummarizer {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl Seq2SeqSummarizer {
    const SYSTEM_PROMPT: &'static str = include_str!("./prompts/summarize_0.txt");

    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Seq2SeqSummarizer {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    async fn send_summary_request(&self, input: &str) -> Result<String, Seq2SeqError> {
        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0.0,
            "messages": [
                {
                    "role": "system",
                    "content": Self::SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": input
                }
            ]
        });

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(Seq2SeqError::Api { status, message });
        }

        let completion = resp.json::<CompletionResponse>().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(Seq2SeqError::EmptySummary)
    }
}

impl Summarizer for Seq2SeqSummarizer {
    const MAX_INPUT_TOKENS: usize = 1024;

    type Error = Seq2SeqError;

    #[tracing::instrument(skip_all, fields(model = %self.model))]
    async fn summarize(&self, transcript: &str) -> Result<Summary, Self::Error> {
        let budget = chunk_budget(Self::MAX_INPUT_TOKENS);
        let chunks = chunk_text(transcript, budget);
        tracing::info!(chunks = chunks.len(), "Summarizing transcript");

        let mut partials = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            partials.push(self.send_summary_request(chunk).await?);
        }

        let detailed = if partials.len() > 1 {
            // second pass folds the per-chunk summaries into one passage
            let combined = partials.join("\n\n");
            let meta_input: String = combined.chars().take(budget).collect();
            self.send_summary_request(&meta_input).await?
        } else {
            partials.pop().ok_or(Seq2SeqError::EmptySummary)?
        };

        Ok(Summary {
            tldr: tldr_from(&detailed),
            detailed,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}
