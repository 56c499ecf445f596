mod error;
pub mod parser;
mod processor;
pub mod stt;
pub mod summarize;
pub mod tracing;
pub mod types;
pub mod yt;

pub use error::Error;
pub use processor::{builder::VideoProcessorBuilder, BatchOutcome, VideoProcessor};
pub use stt::{
    diarize::{Diarizer, DiarizedTurn, HfDiarizer},
    whisper::WhisperTranscriber,
    TranscribeResponse, Transcriber,
};
pub use summarize::{ConfiguredSummarizer, Summarizer};
pub use yt::{AudioHandler, CaptionSource, TitleFetcher};
