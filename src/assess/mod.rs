//! Assessment module — scoring pipeline from grader judgment to final record.
//!
//! # Pipeline
//!
//! ```text
//! speaking: (question, answer)×3 ──▶ ExamGrader ──▶ clamp ──▶ relevance cap ─┐
//! writing:  prompts + submission ──▶ section split / word counts / coverage  │
//!                                    ──▶ ExamGrader ──▶ clamp ──▶ cov. cap ──┤
//!                                                                            ▼
//!                                          AssessmentRecord (score, CEFR, IELTS,
//!                                          feedback + advice, corrected text)
//! ```
//!
//! Grader unavailability is handled inside [`AssessmentEngine`] with local
//! heuristic scores; callers always get a record.

pub mod engine;
pub mod scale;
pub mod writing;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use engine::{AssessmentEngine, AssessmentRecord, WritingAssessment, WRITING_MIN_WORDS};
pub use scale::{clamp, CefrBand, MAX_SCORE, MIN_SCORE};
pub use writing::{advice_block, coverage, split_sections, word_count};
