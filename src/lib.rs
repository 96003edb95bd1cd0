//! Speaking Zone — conversational English-assessment service.
//!
//! A user takes a turn-based exam (speaking by voice clips, writing by one
//! labeled submission) and receives a 20–75 score mapped onto CEFR and an
//! approximate IELTS range.
//!
//! # Pipeline
//!
//! ```text
//! inbound turn ─▶ session::ExamRouter (state machine, entitlement gate)
//!     │ voice                          │ final answer / submission
//!     ▼                                ▼
//! stt::VoiceTranscriber          assess::AssessmentEngine
//! (ffmpeg → speech oracle)       (grader::ExamGrader w/ model fallback,
//!                                 caps, clamping, heuristic fallback)
//!                                      │
//!                                      ▼
//!                        assess::scale (CEFR band, IELTS range)
//!                                      │
//!                                      ▼
//!                        outbound result + stats::UsageStats increment
//! ```
//!
//! Every external service — grading oracle, speech oracle, entitlement gate,
//! dictionary/translator, transport — sits behind an async trait, so the
//! whole pipeline runs against in-process doubles in tests.

pub mod assess;
pub mod config;
pub mod gate;
pub mod grader;
pub mod lookup;
pub mod session;
pub mod stats;
pub mod stt;
pub mod transport;
