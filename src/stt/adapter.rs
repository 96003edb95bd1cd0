//! Voice transcription adapter — compressed clip in, transcript out.
//!
//! [`VoiceTranscriber`] owns the whole clip-to-text path: stage the clip,
//! transcode it to WAV, call the speech oracle.  Oracle failures and empty
//! recognitions both come back as `Ok("")` — the session layer re-prompts
//! the same question either way.  Only a transcoding failure surfaces as an
//! error, because it needs a different user-facing message.

use std::sync::Arc;

use crate::config::SttConfig;
use crate::stt::oracle::{RemoteSpeechToText, SpeechToText};
use crate::stt::transcode::{FfmpegTranscoder, TranscribeError, Transcoder};

// ---------------------------------------------------------------------------
// VoiceTranscriber
// ---------------------------------------------------------------------------

/// Converts a captured voice clip into text via transcode + speech oracle.
pub struct VoiceTranscriber {
    transcoder: Arc<dyn Transcoder>,
    oracle: Arc<dyn SpeechToText>,
    language: String,
}

impl VoiceTranscriber {
    /// Build an adapter over explicit collaborators (used by tests).
    pub fn new(
        transcoder: Arc<dyn Transcoder>,
        oracle: Arc<dyn SpeechToText>,
        language: &str,
    ) -> Self {
        Self {
            transcoder,
            oracle,
            language: language.to_string(),
        }
    }

    /// Build the production adapter from config.
    pub fn from_config(config: &SttConfig) -> Self {
        Self::new(
            Arc::new(FfmpegTranscoder::new(&config.ffmpeg_path)),
            Arc::new(RemoteSpeechToText::from_config(config)),
            &config.language,
        )
    }

    /// Transcribe one voice clip.
    ///
    /// * `Ok(text)` — best-effort transcript, possibly empty.
    /// * `Err(TranscribeError)` — the clip never reached the oracle
    ///   (environment problem; surface the transcoding message).
    pub async fn transcribe_clip(&self, clip: &[u8]) -> Result<String, TranscribeError> {
        let wav = self.transcoder.to_wav(clip).await?;

        match self.oracle.transcribe(&wav, &self.language).await {
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => {
                log::warn!("speech oracle failed, treating clip as silence: {e}");
                Ok(String::new())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::stt::oracle::SttError;

    struct PassthroughTranscoder;

    #[async_trait]
    impl Transcoder for PassthroughTranscoder {
        async fn to_wav(&self, clip: &[u8]) -> Result<Vec<u8>, TranscribeError> {
            Ok(clip.to_vec())
        }
    }

    struct BrokenTranscoder;

    #[async_trait]
    impl Transcoder for BrokenTranscoder {
        async fn to_wav(&self, _clip: &[u8]) -> Result<Vec<u8>, TranscribeError> {
            Err(TranscribeError::Transcode("ffmpeg: not found".into()))
        }
    }

    struct FixedOracle(Result<String, ()>);

    #[async_trait]
    impl SpeechToText for FixedOracle {
        async fn transcribe(&self, _wav: &[u8], _language: &str) -> Result<String, SttError> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(SttError::Request("connection refused".into())),
            }
        }
    }

    fn transcriber(
        transcoder: impl Transcoder + 'static,
        oracle: FixedOracle,
    ) -> VoiceTranscriber {
        VoiceTranscriber::new(Arc::new(transcoder), Arc::new(oracle), "en-US")
    }

    #[tokio::test]
    async fn returns_transcript_on_success() {
        let t = transcriber(
            PassthroughTranscoder,
            FixedOracle(Ok("  hello there  ".into())),
        );
        assert_eq!(t.transcribe_clip(b"ogg").await.unwrap(), "hello there");
    }

    #[tokio::test]
    async fn oracle_failure_degrades_to_empty_transcript() {
        let t = transcriber(PassthroughTranscoder, FixedOracle(Err(())));
        assert_eq!(t.transcribe_clip(b"ogg").await.unwrap(), "");
    }

    #[tokio::test]
    async fn empty_recognition_is_ok_and_empty() {
        let t = transcriber(PassthroughTranscoder, FixedOracle(Ok("   ".into())));
        assert_eq!(t.transcribe_clip(b"ogg").await.unwrap(), "");
    }

    #[tokio::test]
    async fn transcode_failure_is_surfaced_as_error() {
        let t = transcriber(BrokenTranscoder, FixedOracle(Ok("never reached".into())));
        let err = t.transcribe_clip(b"ogg").await.unwrap_err();
        assert!(matches!(err, TranscribeError::Transcode(_)));
    }
}
