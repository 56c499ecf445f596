use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use clap::Parser;
use digest_export::{
    format_timestamp, render_bytes, safe_file_stem, Content, ExportFormat, FileExporter,
};
use html_escape::encode_text;
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use video_digest::{
    tracing::init_tracing_subscriber,
    yt::{audio_handler::YtDlpAudio, captions::CaptionClient, oembed::OEmbedClient},
    ConfiguredSummarizer, HfDiarizer, VideoProcessorBuilder, WhisperTranscriber,
};

#[derive(Parser)]
#[command(
    name = "video-digest-web",
    about = "Interactive browser form for the video digest pipeline"
)]
struct Cli {
    /// Address to serve the form on
    #[arg(long, env = "VIDEO_DIGEST_LISTEN", default_value = "127.0.0.1:8787")]
    listen: SocketAddr,

    /// Directory holding ggml Whisper models
    #[arg(long, env = "WHISPER_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// OpenAI-compatible summarization endpoint; extractive fallback when unset
    #[arg(long, env = "SUMMARIZER_URL")]
    summarizer_url: Option<String>,

    /// API key for the summarization endpoint
    #[arg(long, env = "SUMMARIZER_API_KEY", hide_env_values = true)]
    summarizer_api_key: Option<String>,

    /// Working directory for downloaded audio
    #[arg(long, default_value = "/var/tmp/video-digest-web")]
    workdir: PathBuf,
}

struct AppState {
    model_dir: PathBuf,
    summarizer_url: Option<String>,
    summarizer_api_key: Option<String>,
    workdir: PathBuf,
    /// Contents of the last processed batch, indexed by the download routes
    results: Mutex<Vec<Content>>,
}

#[derive(Debug, Deserialize)]
struct ProcessForm {
    videos: String,
    #[serde(default = "default_lang")]
    lang: String,
    #[serde(default = "default_whisper_model")]
    whisper_model: String,
    #[serde(default = "default_summary_model")]
    summary_model: String,
    #[serde(default)]
    diarization: Option<String>,
}

fn default_lang() -> String {
    "en".into()
}

fn default_whisper_model() -> String {
    "tiny".into()
}

fn default_summary_model() -> String {
    "facebook/bart-large-cnn".into()
}

const FORM_PAGE: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Video Digest</title></head>
<body>
<h1>YouTube Transcript &amp; Summary</h1>
<form method="post" action="/process">
  <p><label>YouTube URL(s) or ID(s), one per line<br>
    <textarea name="videos" rows="5" cols="80"></textarea></label></p>
  <p><label>Language <input name="lang" value="en" size="5"></label></p>
  <p><label>Whisper model
    <select name="whisper_model">
      <option>tiny</option><option>base</option><option>small</option>
      <option>medium</option><option>large</option>
    </select></label></p>
  <p><label>Summary model <input name="summary_model" value="facebook/bart-large-cnn" size="40"></label></p>
  <p><label><input type="checkbox" name="diarization" value="on"> Enable speaker diarization (requires HF_TOKEN)</label></p>
  <p><button type="submit">Process</button></p>
</form>
</body>
</html>
"#;

async fn index() -> Html<&'static str> {
    Html(FORM_PAGE)
}

async fn process(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ProcessForm>,
) -> Html<String> {
    let references: Vec<String> = form
        .videos
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if references.is_empty() {
        return Html("<p>Enter at least one URL or ID. <a href=\"/\">Back</a></p>".into());
    }

    let transcriber = WhisperTranscriber::new(WhisperTranscriber::model_path_for(
        &form.whisper_model,
        &state.model_dir,
    ))
    .with_language(form.lang.clone());
    let summarizer = ConfiguredSummarizer::from_config(
        state.summarizer_url.clone(),
        state.summarizer_api_key.clone(),
        form.summary_model.clone(),
    );
    let diarizer = if form.diarization.is_some() {
        let diarizer = HfDiarizer::from_env();
        if diarizer.is_none() {
            tracing::warn!("Diarization requested but HF_TOKEN is not set, skipping diarization");
        }
        diarizer
    } else {
        None
    };

    let processor = VideoProcessorBuilder::new(&state.workdir)
        .captions(CaptionClient::default())
        .title_fetcher(OEmbedClient::default())
        .audio_handler(YtDlpAudio)
        .transcriber(transcriber)
        .summarizer(summarizer)
        .exporter(FileExporter)
        .diarizer(diarizer)
        .lang(form.lang.clone())
        .build();

    let mut page = String::from("<!doctype html><html><head><meta charset=\"utf-8\"><title>Video Digest results</title></head><body><h1>Results</h1>");
    let mut results = state.results.lock().await;
    results.clear();

    for reference in &references {
        match processor.process_video(reference).await {
            Ok(content) => {
                page.push_str(&render_result(results.len(), &content));
                results.push(content);
            }
            Err(e) => {
                tracing::error!(%reference, error = ?e, "Skipping video");
                page.push_str(&format!(
                    "<p>Error with {}: {}</p>",
                    encode_text(reference),
                    encode_text(&format!("{e:#}"))
                ));
            }
        }
    }

    page.push_str("<p><a href=\"/\">Back</a></p></body></html>");
    Html(page)
}

fn render_result(index: usize, content: &Content) -> String {
    let mut html = String::new();
    html.push_str(&format!("<h2>{}</h2>", encode_text(&content.title)));
    html.push_str(&format!(
        "<p>Source: <a href=\"{url}\">{url}</a></p>",
        url = encode_text(&content.url)
    ));
    html.push_str(&format!(
        "<h3>TLTR</h3><p>{}</p>",
        encode_text(&content.summary.tldr)
    ));
    html.push_str(&format!(
        "<h3>Detailed summary</h3><p>{}</p>",
        encode_text(&content.summary.detailed)
    ));
    html.push_str(&format!(
        "<details><summary>Full transcript</summary><p>{}</p></details>",
        encode_text(&content.transcript)
    ));

    if !content.segments.is_empty() {
        html.push_str("<details><summary>Timestamped transcript</summary>");
        for seg in &content.segments {
            let speaker = seg
                .speaker
                .as_deref()
                .map(|s| format!(" [{}]", encode_text(s)))
                .unwrap_or_default();
            html.push_str(&format!(
                "<p><b>{}{}:</b> {}</p>",
                format_timestamp(seg.start),
                speaker,
                encode_text(&seg.text)
            ));
        }
        html.push_str("</details>");
    }

    html.push_str("<p>Download: ");
    for format in ExportFormat::ALL {
        html.push_str(&format!(
            "<a href=\"/download/{index}/{ext}\">{ext}</a> ",
            ext = format.extension()
        ));
    }
    html.push_str("</p>");
    html
}

async fn download(
    State(state): State<Arc<AppState>>,
    Path((index, format)): Path<(usize, String)>,
) -> Response {
    let format = match format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let results = state.results.lock().await;
    let Some(content) = results.get(index) else {
        return (StatusCode::NOT_FOUND, "Unknown result index").into_response();
    };

    let scratch_dir = state.workdir.join("downloads");
    if let Err(e) = tokio::fs::create_dir_all(&scratch_dir).await {
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }

    match render_bytes(content, format, &scratch_dir).await {
        Ok(bytes) => {
            let stem = safe_file_stem(&content.title);
            let stem = if stem.is_empty() { "digest".into() } else { stem };
            let disposition = format!(
                "attachment; filename=\"{stem}.{}\"",
                format.extension()
            );
            ([(header::CONTENT_DISPOSITION, disposition)], bytes).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let state = Arc::new(AppState {
        model_dir: cli
            .model_dir
            .unwrap_or_else(WhisperTranscriber::default_model_dir),
        summarizer_url: cli.summarizer_url,
        summarizer_api_key: cli.summarizer_api_key,
        workdir: cli.workdir,
        results: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/", get(index))
        .route("/process", post(process))
        .route("/download/:index/:format", get(download))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    tracing::info!(listen = %cli.listen, "Serving the digest form");
    axum::serve(listener, app).await?;

    Ok(())
}
