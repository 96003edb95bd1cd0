//! STT (Speech-to-Text) module.
//!
//! # Architecture
//!
//! ```text
//! voice clip (OGG/Opus bytes)
//!        │
//!        ▼
//! ┌──────────────────┐     ┌────────────────────┐
//! │ Transcoder       │     │ SpeechToText       │
//! │ (ffmpeg → WAV)   │────▶│ (remote oracle)    │
//! └──────────────────┘     └─────────┬──────────┘
//!        scoped temp files           │
//!        deleted on every path       ▼
//!                        transcript | "" (best effort)
//! ```
//!
//! [`VoiceTranscriber`] wires the two stages together.  The two failure
//! classes stay distinct: a transcoding error is an environment problem with
//! its own user message, while oracle failures quietly become an empty
//! transcript and a "could not understand" re-prompt.

pub mod adapter;
pub mod oracle;
pub mod transcode;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use adapter::VoiceTranscriber;
pub use oracle::{RemoteSpeechToText, SpeechToText, SttError};
pub use transcode::{FfmpegTranscoder, TranscribeError, Transcoder};
