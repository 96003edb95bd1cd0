//! Grading oracle client module.
//!
//! This module provides:
//! * [`GraderBackend`] — async trait for one structured completion request.
//! * [`HttpBackend`] — OpenAI-compatible REST backend (production).
//! * [`ExamGrader`] — ordered candidate-model fallback over a backend.
//! * [`extract_json_object`] — prose-tolerant JSON span extraction.
//! * [`SpeakingJudgment`] / [`WritingJudgment`] — typed judgments.
//! * [`GraderError`] — per-request error variants.
//!
//! # Fallback contract
//!
//! ```text
//! grade(system, payload)
//!   │
//!   ├─ candidate 1 ── transport error / no JSON ──┐
//!   ├─ candidate 2 ── transport error / no JSON ──┤  one attempt each,
//!   ├─ …                                          │  never retried
//!   └─ candidate N ── transport error / no JSON ──┘
//!        │
//!        └─ first well-formed JSON object ──▶ Some(judgment)
//!           all candidates exhausted       ──▶ None  (caller uses heuristic)
//! ```

pub mod client;
pub mod extract;
pub mod judgment;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ExamGrader, GraderBackend, GraderError, HttpBackend};
pub use extract::extract_json_object;
pub use judgment::{PerQuestion, SpeakingJudgment, WritingJudgment};
pub use prompt::{
    speaking_instructions, speaking_payload, writing_instructions, writing_payload,
};
