//! Extractive fallback used when no summarization model is configured:
//! ranks sentences by centrality over a sentence-similarity graph and
//! re-emits the most central ones in document order.

use std::{collections::HashMap, convert::Infallible};

use digest_export::Summary;

use crate::summarize::{split_sentences, tldr_from, Summarizer};

/// Minimum cosine similarity for two sentences to share a graph edge
const SIMILARITY_THRESHOLD: f64 = 0.1;
const DAMPING: f64 = 0.85;
const MAX_ITERATIONS: usize = 100;
const CONVERGENCE_EPSILON: f64 = 1e-6;
/// Hard cap on the degenerate no-sentence fallback
const FALLBACK_CHARS: usize = 1200;

/// Graph-centrality extractive summarizer
pub struct ExtractiveSummarizer {
    sentence_count: usize,
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        ExtractiveSummarizer { sentence_count: 7 }
    }
}

impl ExtractiveSummarizer {
    pub fn new(sentence_count: usize) -> Self {
        ExtractiveSummarizer { sentence_count }
    }

    fn extract(&self, transcript: &str) -> String {
        let sentences = split_sentences(transcript);
        if sentences.is_empty() {
            return transcript.trim().chars().take(FALLBACK_CHARS).collect();
        }
        if sentences.len() <= self.sentence_count {
            return sentences.join("\n\n");
        }

        let vectors: Vec<HashMap<String, f64>> = sentences
            .iter()
            .map(|s| term_frequencies(s))
            .collect();
        let scores = centrality(&similarity_matrix(&vectors));

        let mut ranked: Vec<usize> = (0..sentences.len()).collect();
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        let mut selected: Vec<usize> = ranked.into_iter().take(self.sentence_count).collect();
        // most central sentences, back in document order
        selected.sort_unstable();

        selected
            .into_iter()
            .map(|i| sentences[i])
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Summarizer for ExtractiveSummarizer {
    const MAX_INPUT_TOKENS: usize = usize::MAX;

    type Error = Infallible;

    async fn summarize(&self, transcript: &str) -> Result<Summary, Self::Error> {
        let detailed = self.extract(transcript);
        Ok(Summary {
            tldr: tldr_from(&detailed),
            detailed,
        })
    }
}

fn term_frequencies(sentence: &str) -> HashMap<String, f64> {
    let mut tf = HashMap::new();
    for word in sentence.split(|c: char| !c.is_alphanumeric()) {
        if word.len() < 2 {
            continue;
        }
        *tf.entry(word.to_lowercase()).or_insert(0.0) += 1.0;
    }
    tf
}

fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(word, weight)| b.get(word).map(|other| weight * other))
        .sum();
    if dot == 0.0 {
        return 0.0;
    }
    let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();
    dot / (norm_a * norm_b)
}

fn similarity_matrix(vectors: &[HashMap<String, f64>]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let sim = cosine_similarity(&vectors[i], &vectors[j]);
            if sim >= SIMILARITY_THRESHOLD {
                matrix[i][j] = sim;
                matrix[j][i] = sim;
            }
        }
    }
    matrix
}

/// Power iteration over the row-normalized similarity graph
fn centrality(matrix: &[Vec<f64>]) -> Vec<f64> {
    let n = matrix.len();
    let row_sums: Vec<f64> = matrix.iter().map(|row| row.iter().sum()).collect();
    let mut scores = vec![1.0 / n as f64; n];

    for _ in 0..MAX_ITERATIONS {
        let mut next = vec![(1.0 - DAMPING) / n as f64; n];
        for i in 0..n {
            if row_sums[i] == 0.0 {
                continue;
            }
            for j in 0..n {
                if matrix[i][j] > 0.0 {
                    next[j] += DAMPING * scores[i] * matrix[i][j] / row_sums[i];
                }
            }
        }

        let delta: f64 = scores
            .iter()
            .zip(&next)
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = next;
        if delta < CONVERGENCE_EPSILON {
            break;
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn central_theme_sentences_are_selected_in_document_order() {
        let transcript = "The rocket launch was delayed by weather. \
            Engineers reviewed the rocket launch checklist again. \
            I had a sandwich for lunch. \
            The launch window for the rocket opens tomorrow. \
            Weather forecasts favor a morning rocket launch. \
            My sandwich had too much mustard. \
            Mission control confirmed the rocket launch is go.";

        let summary = ExtractiveSummarizer::new(3)
            .summarize(transcript)
            .await
            .unwrap();

        let picked: Vec<&str> = summary.detailed.split("\n\n").collect();
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|s| s.contains("rocket")));

        // document order preserved
        let positions: Vec<usize> = picked
            .iter()
            .map(|s| transcript.find(*s).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn short_transcripts_pass_through() {
        let transcript = "Only one sentence here.";
        let summary = ExtractiveSummarizer::default()
            .summarize(transcript)
            .await
            .unwrap();
        assert_eq!(summary.detailed, "Only one sentence here.");
        assert_eq!(summary.tldr, "Only one sentence here.");
    }

    #[tokio::test]
    async fn empty_transcript_yields_empty_summary() {
        let summary = ExtractiveSummarizer::default().summarize("").await.unwrap();
        assert!(summary.detailed.is_empty());
        assert!(summary.tldr.is_empty());
    }
}
