use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::yt::{watch_url, AudioHandler};

/// Downloads best-audio with `yt-dlp` and resamples it with `ffmpeg` into
/// the 16 kHz mono WAV the local speech-to-text model expects.
#[derive(Debug, Default, Clone)]
pub struct YtDlpAudio;

impl AudioHandler for YtDlpAudio {
    #[tracing::instrument(skip(self))]
    async fn download(&self, video_id: &str, audio_dl_path: &Path) -> anyhow::Result<PathBuf> {
        tokio::fs::create_dir_all(audio_dl_path).await?;

        let output_template = audio_dl_path.join(format!("{video_id}.%(ext)s"));
        let output = Command::new("yt-dlp")
            .arg(watch_url(video_id))
            .arg("-f")
            .arg("bestaudio/best")
            .arg("--no-progress")
            .arg("--print")
            .arg("after_move:filepath")
            .arg("-o")
            .arg(&output_template)
            .output()
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to spawn yt-dlp"))?;

        if !output.status.success() {
            anyhow::bail!(
                "Failed to download audio: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let downloaded = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        if !downloaded.exists() {
            anyhow::bail!(
                "yt-dlp did not produce expected file: {}",
                downloaded.display()
            );
        }
        Ok(downloaded)
    }

    #[tracing::instrument(skip(self))]
    async fn prepare(
        &self,
        video_id: &str,
        source: &Path,
        audio_dl_path: &Path,
    ) -> anyhow::Result<PathBuf> {
        let wav_path = audio_dl_path.join(format!("{video_id}.wav"));

        // resample if not already done
        if !wav_path.exists() {
            let output = Command::new("ffmpeg")
                .arg("-y")
                .arg("-i")
                .arg(source)
                .arg("-vn")
                .arg("-acodec")
                .arg("pcm_s16le")
                .arg("-ar")
                .arg("16000")
                .arg("-ac")
                .arg("1")
                .arg(&wav_path)
                .output()
                .await
                .inspect_err(|e| tracing::error!(error = ?e, "Failed to spawn ffmpeg"))?;

            if !output.status.success() {
                anyhow::bail!(
                    "Failed to extract audio: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
        } else {
            tracing::debug!("Prepared audio already exists at {}", wav_path.display());
        }

        Ok(wav_path)
    }
}
