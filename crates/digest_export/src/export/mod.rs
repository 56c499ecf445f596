pub(crate) mod html;
pub(crate) mod markdown;
mod pdf;

use std::{future::Future, path::Path, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::Content;

static UNSAFE_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-]+").unwrap());

const MAX_FILE_STEM_CHARS: usize = 80;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unsupported format: {0} (expected one of md, json, html, pdf)")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("PDF renderer `{binary}` not found. Install it with `{install_hint}`")]
    PdfRendererMissing {
        binary: &'static str,
        install_hint: &'static str,
    },
    #[error("PDF rendering failed: {0}")]
    PdfRender(String),
}

/// Target serialization for a [`Content`] record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
    Html,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Markdown,
        ExportFormat::Json,
        ExportFormat::Html,
        ExportFormat::Pdf,
    ];

    /// File extension, which doubles as the CLI selector string
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            "html" => Ok(ExportFormat::Html),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

pub trait Exporter {
    fn export(
        &self,
        content: &Content,
        path: &Path,
        format: ExportFormat,
    ) -> impl Future<Output = Result<(), ExportError>> + Send;
}

impl<T: Exporter + Send + Sync> Exporter for &T {
    async fn export(
        &self,
        content: &Content,
        path: &Path,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        (**self).export(content, path, format).await
    }
}

/// Serializes [`Content`] records to files on the local filesystem
#[derive(Debug, Default, Clone)]
pub struct FileExporter;

impl Exporter for FileExporter {
    async fn export(
        &self,
        content: &Content,
        path: &Path,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        match format {
            // weasyprint writes the file itself
            ExportFormat::Pdf => pdf::render_pdf(&html::to_html(content), path).await?,
            _ => tokio::fs::write(path, render(content, format)?).await?,
        }

        tracing::info!(path = %path.display(), format = %format, "Wrote export");
        Ok(())
    }
}

fn render(content: &Content, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let bytes = match format {
        ExportFormat::Markdown => markdown::to_markdown(content).into_bytes(),
        ExportFormat::Json => serde_json::to_vec_pretty(content)?,
        // PDF goes through the same intermediate HTML document
        ExportFormat::Html | ExportFormat::Pdf => html::to_html(content).into_bytes(),
    };
    Ok(bytes)
}

/// Renders a [`Content`] record to in-memory bytes, for callers that serve
/// downloads instead of writing files. PDF still requires the external
/// renderer and a scratch path.
pub async fn render_bytes(
    content: &Content,
    format: ExportFormat,
    scratch_dir: &Path,
) -> Result<Vec<u8>, ExportError> {
    if format == ExportFormat::Pdf {
        let out = scratch_dir.join("render.pdf");
        pdf::render_pdf(&html::to_html(content), &out).await?;
        return Ok(tokio::fs::read(&out).await?);
    }
    render(content, format)
}

/// Reduces a video title to a filesystem-safe file stem: non-word runs
/// collapse to `_`, leading/trailing `_` stripped, capped at 80 chars.
pub fn safe_file_stem(title: &str) -> String {
    UNSAFE_FILENAME_RE
        .replace_all(title, "_")
        .trim_matches('_')
        .chars()
        .take(MAX_FILE_STEM_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Segment, Summary};

    fn sample_content() -> Content {
        Content::assemble(
            "Tips & tricks: 10/10?",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            Summary {
                tldr: "A tip.".into(),
                detailed: "A tip. And another tip.".into(),
            },
            vec![
                Segment::new(0.0, 5.0, "Hello"),
                Segment::new(5.0, 10.0, "World"),
            ],
        )
    }

    #[test]
    fn unknown_format_is_a_user_facing_error() {
        let err = "docx".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(s) if s == "docx"));
    }

    #[test]
    fn format_selector_round_trips() {
        for format in ExportFormat::ALL {
            assert_eq!(format.extension().parse::<ExportFormat>().unwrap(), format);
        }
    }

    #[test]
    fn safe_file_stem_collapses_unsafe_runs() {
        assert_eq!(safe_file_stem("Tips & tricks: 10/10?"), "Tips_tricks_10_10");
        assert_eq!(safe_file_stem("???"), "");
        let long = "a".repeat(200);
        assert_eq!(safe_file_stem(&long).chars().count(), 80);
    }

    #[tokio::test]
    async fn exports_with_unsafe_title_produce_valid_files() {
        let content = sample_content();
        let dir = tempfile::tempdir().unwrap();
        let exporter = FileExporter;

        for format in [ExportFormat::Markdown, ExportFormat::Json, ExportFormat::Html] {
            let name = format!("{}.{}", safe_file_stem(&content.title), format.extension());
            let path = dir.path().join(name);
            exporter.export(&content, &path, format).await.unwrap();
            let written = tokio::fs::read_to_string(&path).await.unwrap();
            assert!(!written.is_empty());
        }
    }

    #[tokio::test]
    async fn json_export_round_trips_through_disk() {
        let content = sample_content();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        FileExporter
            .export(&content, &path, ExportFormat::Json)
            .await
            .unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: Content = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, content);
    }
}
