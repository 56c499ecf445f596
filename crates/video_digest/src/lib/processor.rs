pub mod builder;

use std::{
    fs::remove_dir_all,
    path::{Path, PathBuf},
};

use anyhow::Context;
use digest_export::{safe_file_stem, Content, ExportFormat, Exporter, Segment};

use crate::{
    parser,
    stt::{
        diarize::{assign_speakers, Diarizer},
        Transcriber,
    },
    summarize::Summarizer,
    yt::{watch_url, AudioHandler, CaptionSource, TitleFetcher},
};

// The core per-video digest processor: captions or local speech-to-text,
// summarization, content assembly, export.
pub struct VideoProcessor<C, F, A, T, S, E, D>
where
    C: CaptionSource + Send + Sync + 'static,
    F: TitleFetcher + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    E: Exporter + Send + Sync + 'static,
    D: Diarizer + Send + Sync + 'static,
{
    workdir: PathBuf,
    lang: String,
    captions: C,
    title_fetcher: F,
    audio_handler: A,
    transcriber: T,
    summarizer: S,
    exporter: E,
    diarizer: Option<D>,
}

/// What happened to each reference of a batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub exported: Vec<PathBuf>,
    pub failed: Vec<String>,
}

impl<C, F, A, T, S, E, D> VideoProcessor<C, F, A, T, S, E, D>
where
    C: CaptionSource + Send + Sync + 'static,
    F: TitleFetcher + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    E: Exporter + Send + Sync + 'static,
    D: Diarizer + Send + Sync + 'static,
{
    /// Runs the full per-video pipeline and assembles the content record
    #[tracing::instrument(skip(self))]
    pub async fn process_video(&self, reference: &str) -> anyhow::Result<Content> {
        let video_id = parser::extract_video_id(reference)?;
        let url = watch_url(&video_id);

        let title = match self.title_fetcher.fetch_title(&video_id).await {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!(error = ?e, "Title lookup failed, using placeholder");
                format!("YouTube Video {video_id}")
            }
        };

        let segments = self.obtain_transcript(&video_id).await?;

        let transcript_text = digest_export::transcript_text(&segments);
        let summary = self
            .summarizer
            .summarize(&transcript_text)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to summarize transcript: {e:?}"))?;

        Ok(Content::assemble(title, url, summary, segments))
    }

    /// Official captions first; local transcription when captions are
    /// missing or diarization was explicitly requested.
    #[tracing::instrument(skip(self))]
    async fn obtain_transcript(&self, video_id: &str) -> anyhow::Result<Vec<Segment>> {
        if self.diarizer.is_none() {
            match self.captions.fetch_captions(video_id, &self.lang).await {
                Ok(Some(segments)) => return Ok(segments),
                Ok(None) => {
                    tracing::info!("No official captions found, attempting local transcription");
                }
                Err(e) => {
                    tracing::warn!(error = ?e, "Caption fetch failed, attempting local transcription");
                }
            }
        } else {
            tracing::info!("Diarization requested, transcribing locally");
        }

        let audio_dl_path = self.workdir.join("audio");
        let downloaded = self
            .audio_handler
            .download(video_id, &audio_dl_path)
            .await
            .context("Failed to download audio")?;
        let wav_path = self
            .audio_handler
            .prepare(video_id, &downloaded, &audio_dl_path)
            .await
            .context("Failed to prepare audio")?;

        let response = self
            .transcriber
            .transcribe(&wav_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to transcribe audio: {e:?}"))?;
        let mut segments = response.segments;
        anyhow::ensure!(!segments.is_empty(), "No transcript obtainable for {video_id}");

        if let Some(diarizer) = &self.diarizer {
            match diarizer.diarize(&wav_path).await {
                Ok(turns) => assign_speakers(&mut segments, &turns),
                Err(e) => {
                    tracing::warn!(error = ?e, "Diarization failed, keeping segments unlabeled");
                }
            }
        }

        Ok(segments)
    }

    /// Processes a batch sequentially. A failing video is logged and
    /// skipped; the rest of the batch continues.
    #[tracing::instrument(skip(self, references), fields(count = references.len()))]
    pub async fn run(
        self,
        references: &[String],
        format: ExportFormat,
        output: Option<&Path>,
    ) -> anyhow::Result<BatchOutcome> {
        let is_batch = references.len() > 1;
        if is_batch {
            if let Some(dir) = output {
                tokio::fs::create_dir_all(dir).await?;
            }
        }

        let mut outcome = BatchOutcome::default();
        for reference in references {
            match self.digest_one(reference, format, output, is_batch).await {
                Ok(path) => outcome.exported.push(path),
                Err(e) => {
                    tracing::error!(%reference, error = ?e, "Skipping video");
                    outcome.failed.push(reference.clone());
                }
            }
        }

        tracing::info!(
            exported = outcome.exported.len(),
            failed = outcome.failed.len(),
            "Batch finished"
        );
        Ok(outcome)
    }

    async fn digest_one(
        &self,
        reference: &str,
        format: ExportFormat,
        output: Option<&Path>,
        is_batch: bool,
    ) -> anyhow::Result<PathBuf> {
        let content = self.process_video(reference).await?;
        let path = output_path(&content, reference, format, output, is_batch)?;
        self.exporter.export(&content, &path, format).await?;
        Ok(path)
    }
}

/// Batch runs write `<safe title>.<ext>` into the output directory; single
/// runs honor an explicit output path.
fn output_path(
    content: &Content,
    reference: &str,
    format: ExportFormat,
    output: Option<&Path>,
    is_batch: bool,
) -> anyhow::Result<PathBuf> {
    let stem = safe_file_stem(&content.title);
    let stem = if stem.is_empty() {
        parser::extract_video_id(reference)?
    } else {
        stem
    };
    let filename = format!("{stem}.{}", format.extension());

    Ok(match (output, is_batch) {
        (Some(dir), true) => dir.join(filename),
        (Some(path), false) => path.to_path_buf(),
        (None, _) => PathBuf::from(filename),
    })
}

impl<C, F, A, T, S, E, D> Drop for VideoProcessor<C, F, A, T, S, E, D>
where
    C: CaptionSource + Send + Sync + 'static,
    F: TitleFetcher + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    E: Exporter + Send + Sync + 'static,
    D: Diarizer + Send + Sync + 'static,
{
    fn drop(&mut self) {
        let audio_path = self.workdir.join("audio");

        if audio_path.exists() {
            if let Err(e) = remove_dir_all(&audio_path) {
                tracing::warn!(error = ?e, path = ?audio_path, "Failed to clean up audio directory");
            } else {
                tracing::info!(path = ?audio_path, "Cleaned up audio directory");
            }
        }
    }
}
