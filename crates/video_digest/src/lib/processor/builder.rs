use std::path::PathBuf;

use digest_export::Exporter;

use crate::{
    stt::{
        diarize::{Diarizer, NoDiarization},
        Transcriber,
    },
    summarize::Summarizer,
    yt::{AudioHandler, CaptionSource, TitleFetcher},
    VideoProcessor,
};

pub struct VideoProcessorBuilder<C = (), F = (), A = (), T = (), S = (), E = (), D = NoDiarization>
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

impl VideoProcessorBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            lang: "en".into(),
            captions: (),
            title_fetcher: (),
            audio_handler: (),
            transcriber: (),
            summarizer: (),
            exporter: (),
            diarizer: None,
        }
    }
}

impl<C, F, A, T, S, E, D> VideoProcessorBuilder<C, F, A, T, S, E, D> {
    pub fn captions<C2: CaptionSource + Send + Sync + 'static>(
        self,
        captions: C2,
    ) -> VideoProcessorBuilder<C2, F, A, T, S, E, D> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            lang: self.lang,
            captions,
            title_fetcher: self.title_fetcher,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            exporter: self.exporter,
            diarizer: self.diarizer,
        }
    }

    pub fn title_fetcher<F2: TitleFetcher + Send + Sync + 'static>(
        self,
        title_fetcher: F2,
    ) -> VideoProcessorBuilder<C, F2, A, T, S, E, D> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            lang: self.lang,
            captions: self.captions,
            title_fetcher,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            exporter: self.exporter,
            diarizer: self.diarizer,
        }
    }

    pub fn audio_handler<A2: AudioHandler + Send + Sync + 'static>(
        self,
        audio_handler: A2,
    ) -> VideoProcessorBuilder<C, F, A2, T, S, E, D> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            lang: self.lang,
            captions: self.captions,
            title_fetcher: self.title_fetcher,
            audio_handler,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            exporter: self.exporter,
            diarizer: self.diarizer,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> VideoProcessorBuilder<C, F, A, T2, S, E, D> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            lang: self.lang,
            captions: self.captions,
            title_fetcher: self.title_fetcher,
            audio_handler: self.audio_handler,
            transcriber,
            summarizer: self.summarizer,
            exporter: self.exporter,
            diarizer: self.diarizer,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> VideoProcessorBuilder<C, F, A, T, S2, E, D> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            lang: self.lang,
            captions: self.captions,
            title_fetcher: self.title_fetcher,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            summarizer,
            exporter: self.exporter,
            diarizer: self.diarizer,
        }
    }

    pub fn exporter<E2: Exporter + Send + Sync + 'static>(
        self,
        exporter: E2,
    ) -> VideoProcessorBuilder<C, F, A, T, S, E2, D> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            lang: self.lang,
            captions: self.captions,
            title_fetcher: self.title_fetcher,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            exporter,
            diarizer: self.diarizer,
        }
    }

    /// `None` leaves diarization off; `Some` forces the local transcription
    /// path and labels its segments.
    pub fn diarizer<D2: Diarizer + Send + Sync + 'static>(
        self,
        diarizer: Option<D2>,
    ) -> VideoProcessorBuilder<C, F, A, T, S, E, D2> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            lang: self.lang,
            captions: self.captions,
            title_fetcher: self.title_fetcher,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            exporter: self.exporter,
            diarizer,
        }
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}

impl<C, F, A, T, S, E, D> VideoProcessorBuilder<C, F, A, T, S, E, D>
where
    C: CaptionSource + Send + Sync + 'static,
    F: TitleFetcher + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    E: Exporter + Send + Sync + 'static,
    D: Diarizer + Send + Sync + 'static,
{
    pub fn build(self) -> VideoProcessor<C, F, A, T, S, E, D> {
        VideoProcessor {
            workdir: self.workdir,
            lang: self.lang,
            captions: self.captions,
            title_fetcher: self.title_fetcher,
            audio_handler: self.audio_handler,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            exporter: self.exporter,
            diarizer: self.diarizer,
        }
    }
}
