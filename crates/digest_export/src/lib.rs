//! # Digest Export Module
//!
//! This module provides the structured content record the video-digest
//! pipeline assembles per video, and the exporters that serialize that
//! record to Markdown, JSON, HTML and PDF.
//!
//! The module owns no pipeline logic; it is an abstraction layer between
//! an assembled [`Content`] record and bytes on disk.

mod content;
mod export;

pub use content::{transcript_text, Content, Segment, Summary};
pub use export::markdown::{format_timestamp, to_markdown};
pub use export::{
    render_bytes, safe_file_stem, ExportError, ExportFormat, Exporter, FileExporter,
};
