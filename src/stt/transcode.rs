//! Voice-clip transcoding — compressed chat audio → 16 kHz mono WAV.
//!
//! Chat platforms deliver voice clips in compressed containers (OGG/Opus
//! today).  The speech oracle wants a plain waveform, so the clip is written
//! to a scoped temp file and run through `ffmpeg`.  Both temp files are
//! removed on every exit path — `NamedTempFile` deletes on drop.
//!
//! A transcoding failure is an environment problem (missing binary, broken
//! codec), not a content problem, and carries its own error variant so the
//! user sees a different message than for unintelligible speech.

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// TranscribeError
// ---------------------------------------------------------------------------

/// Errors from preparing a voice clip for the speech oracle.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// `ffmpeg` is missing or rejected the clip.
    #[error("audio transcoding failed: {0}")]
    Transcode(String),

    /// The clip could not be staged on disk.
    #[error("could not stage the voice clip: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Transcoder trait
// ---------------------------------------------------------------------------

/// Converts a compressed voice clip into WAV bytes.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn to_wav(&self, clip: &[u8]) -> Result<Vec<u8>, TranscribeError>;
}

// ---------------------------------------------------------------------------
// FfmpegTranscoder
// ---------------------------------------------------------------------------

/// Shells out to `ffmpeg` for the container/codec conversion.
///
/// The binary path comes from config so deployments can point at a bundled
/// build; the default `"ffmpeg"` resolves through `PATH`.
pub struct FfmpegTranscoder {
    ffmpeg: String,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: &str) -> Self {
        Self {
            ffmpeg: ffmpeg_path.to_string(),
        }
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn to_wav(&self, clip: &[u8]) -> Result<Vec<u8>, TranscribeError> {
        let src = tempfile::Builder::new()
            .prefix("clip-")
            .suffix(".oga")
            .tempfile()?;
        let dst = tempfile::Builder::new()
            .prefix("clip-")
            .suffix(".wav")
            .tempfile()?;

        tokio::fs::write(src.path(), clip).await?;

        // 16 kHz mono is what speech oracles expect; -y because the dst temp
        // file already exists.
        let output = tokio::process::Command::new(&self.ffmpeg)
            .arg("-y")
            .arg("-i")
            .arg(src.path())
            .args(["-ar", "16000", "-ac", "1", "-f", "wav"])
            .arg(dst.path())
            .output()
            .await
            .map_err(|e| TranscribeError::Transcode(format!("{}: {e}", self.ffmpeg)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last_line = stderr.lines().last().unwrap_or("unknown error");
            return Err(TranscribeError::Transcode(last_line.to_string()));
        }

        let wav = tokio::fs::read(dst.path()).await?;
        Ok(wav)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_reports_transcode_error() {
        let transcoder = FfmpegTranscoder::new("/definitely/not/installed/ffmpeg");
        let err = transcoder.to_wav(b"fake-ogg-bytes").await.unwrap_err();
        assert!(matches!(err, TranscribeError::Transcode(_)));
        assert!(err.to_string().contains("transcoding failed"));
    }
}
