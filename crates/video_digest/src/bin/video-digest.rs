use std::path::PathBuf;

use clap::Parser;
use digest_export::{ExportFormat, FileExporter};
use video_digest::{
    tracing::init_tracing_subscriber,
    yt::{audio_handler::YtDlpAudio, captions::CaptionClient, oembed::OEmbedClient},
    ConfiguredSummarizer, HfDiarizer, VideoProcessorBuilder, WhisperTranscriber,
};

#[derive(Parser)]
#[command(
    name = "video-digest",
    about = "YouTube transcript digest: captions or local Whisper, summarized and exported"
)]
struct Cli {
    /// YouTube video URL(s) or 11-character ID(s)
    #[arg(required = true)]
    videos: Vec<String>,

    /// Output file path (single video) or directory (batch)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output format (md, json, html, pdf)
    #[arg(long, short, default_value = "md")]
    format: ExportFormat,

    /// Preferred transcript language
    #[arg(long, env = "VIDEO_DIGEST_LANG", default_value = "en")]
    lang: String,

    /// Whisper model size (tiny, base, small, medium, large)
    #[arg(long, env = "WHISPER_MODEL", default_value = "tiny")]
    whisper_model: String,

    /// Directory holding ggml Whisper models
    #[arg(long, env = "WHISPER_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// Model name requested from the summarization endpoint
    #[arg(long, env = "SUMMARY_MODEL", default_value = "facebook/bart-large-cnn")]
    summary_model: String,

    /// OpenAI-compatible summarization endpoint; extractive fallback when unset
    #[arg(long, env = "SUMMARIZER_URL")]
    summarizer_url: Option<String>,

    /// API key for the summarization endpoint
    #[arg(long, env = "SUMMARIZER_API_KEY", hide_env_values = true)]
    summarizer_api_key: Option<String>,

    /// Enable speaker diarization (requires HF_TOKEN)
    #[arg(long)]
    diarization: bool,

    /// Working directory for downloaded audio
    #[arg(long, default_value = "/var/tmp/video-digest")]
    workdir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let model_dir = cli
        .model_dir
        .unwrap_or_else(WhisperTranscriber::default_model_dir);
    let transcriber =
        WhisperTranscriber::new(WhisperTranscriber::model_path_for(&cli.whisper_model, &model_dir))
            .with_language(cli.lang.clone());

    let summarizer = ConfiguredSummarizer::from_config(
        cli.summarizer_url,
        cli.summarizer_api_key,
        cli.summary_model,
    );

    let diarizer = if cli.diarization {
        let diarizer = HfDiarizer::from_env();
        if diarizer.is_none() {
            tracing::warn!("Diarization requested but HF_TOKEN is not set, skipping diarization");
        }
        diarizer
    } else {
        None
    };

    let processor = VideoProcessorBuilder::new(&cli.workdir)
        .captions(CaptionClient::default())
        .title_fetcher(OEmbedClient::default())
        .audio_handler(YtDlpAudio)
        .transcriber(transcriber)
        .summarizer(summarizer)
        .exporter(FileExporter)
        .diarizer(diarizer)
        .lang(cli.lang.clone())
        .build();

    let outcome = processor
        .run(&cli.videos, cli.format, cli.output.as_deref())
        .await?;

    if outcome.exported.is_empty() && !outcome.failed.is_empty() {
        anyhow::bail!("No videos could be processed");
    }
    Ok(())
}
