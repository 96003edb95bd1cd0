//! Exam session module — per-user conversation state and turn routing.
//!
//! # Architecture
//!
//! ```text
//! Inbound turn (text / voice / back / mode signal)
//!        │
//!        ▼
//! ExamRouter::handle()            ← one async task per turn
//!        │   per-user tokio::Mutex — same-user turns never overlap
//!        ├─ entitlement gate      (every turn, fail closed)
//!        ├─ Session state machine (Idle / speaking / writing)
//!        ├─ VoiceTranscriber      (speaking answers)
//!        ├─ AssessmentEngine      (3rd answer / submission)
//!        ├─ UsageStats            (per-user exam counters)
//!        └─ Outbound::send_text   (prompts, results, corrections)
//! ```

pub mod bank;
pub mod router;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use router::ExamRouter;
pub use state::{Session, SessionMode};
