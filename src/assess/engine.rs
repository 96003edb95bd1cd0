//! Assessment engine — grading orchestration and deterministic post-processing.
//!
//! The engine calls the grading oracle, then applies rules that never depend
//! on the oracle being well-behaved: score clamping, the relevance cap for
//! speaking, the coverage/off-topic cap for writing, and the local heuristic
//! scores used when every grader candidate has failed.
//!
//! Caps only ever lower a score.  A fluent but off-topic performance must not
//! score above the A2 band no matter what the oracle returned.

use std::sync::Arc;

use crate::assess::scale::{clamp, CefrBand};
use crate::assess::writing::{advice_block, coverage, split_sections, word_count};
use crate::grader::{self, ExamGrader, SpeakingJudgment, WritingJudgment};

// ---------------------------------------------------------------------------
// Post-processing constants
// ---------------------------------------------------------------------------
// Threshold values are part of the grading contract and are used literally;
// they are not derived from any formula.

/// Mean relevance below this always caps the score.
const RELEVANCE_FLOOR: f64 = 2.0;

/// Mean relevance below this caps a score that would otherwise reach B1.
const RELEVANCE_SOFT: f64 = 3.0;

/// Ceiling applied by the relevance and coverage caps.
const OFF_TOPIC_CAP: i64 = 37;

/// Writing coverage at or below this counts as off-topic work.
const LOW_COVERAGE_MAX: u8 = 1;

/// Speaking fallback: answers shorter than this many words in total.
const SHORT_ANSWER_WORDS: usize = 12;

/// Speaking fallback scores (short / normal-length answers).
const SPEAKING_FALLBACK_SHORT: i64 = 24;
const SPEAKING_FALLBACK: i64 = 35;

/// Writing fallback scores by coverage (≤1 / 2 / 3).
const WRITING_FALLBACK_LOW: i64 = 20;
const WRITING_FALLBACK_MID: i64 = 32;
const WRITING_FALLBACK_FULL: i64 = 45;

/// Minimum word counts for writing tasks 1/2/3.
pub const WRITING_MIN_WORDS: [usize; 3] = [50, 120, 180];

/// Shown instead of grader feedback when every candidate failed.
const SERVICE_DOWN_UZ: &str =
    "Baholash xizmati hozircha javob bermayapti, natija taxminiy hisoblandi. \
     Keyinroq qayta urinib ko'ring.";

/// Placeholder for an empty corrected-text field.
const EMPTY_PLACEHOLDER: &str = "—";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// The final assessment delivered outward.
#[derive(Debug, Clone)]
pub struct AssessmentRecord {
    /// Clamped score, always within 20–75.
    pub score: i64,
    /// CEFR band for the clamped score.
    pub band: CefrBand,
    /// Narrative feedback (grader or fallback), in Uzbek.
    pub feedback: String,
    /// Corrected English rendering of the learner's work.
    pub corrected: String,
}

impl AssessmentRecord {
    fn new(score: i64, feedback: String, corrected: String) -> Self {
        let score = clamp(score);
        Self {
            score,
            band: CefrBand::from_score(score),
            feedback,
            corrected,
        }
    }

    /// Approximate IELTS range for the record's band.
    pub fn ielts(&self) -> &'static str {
        self.band.ielts_range()
    }
}

/// A writing assessment plus its per-task breakdown.
#[derive(Debug, Clone)]
pub struct WritingAssessment {
    pub record: AssessmentRecord,
    /// Words found in sections 1/2/3.
    pub word_counts: [usize; 3],
    /// Number of sections meeting their minimum, 0–3.
    pub coverage: u8,
}

// ---------------------------------------------------------------------------
// AssessmentEngine
// ---------------------------------------------------------------------------

/// Orchestrates grader calls and applies the deterministic scoring rules.
pub struct AssessmentEngine {
    grader: Arc<ExamGrader>,
}

impl AssessmentEngine {
    pub fn new(grader: Arc<ExamGrader>) -> Self {
        Self { grader }
    }

    // -----------------------------------------------------------------------
    // Speaking
    // -----------------------------------------------------------------------

    /// Grade a completed speaking session of exactly three (question, answer)
    /// pairs.
    pub async fn assess_speaking(&self, pairs: &[(String, String)]) -> AssessmentRecord {
        let payload = grader::speaking_payload(pairs);
        let judgment = self
            .grader
            .grade(grader::speaking_instructions(), &payload)
            .await
            .and_then(SpeakingJudgment::from_value);

        match judgment {
            Some(j) => {
                let mut score = clamp(j.score_20_75);
                let avg = j.avg_relevance();
                if avg < RELEVANCE_FLOOR {
                    score = score.min(OFF_TOPIC_CAP);
                } else if avg < RELEVANCE_SOFT && score > OFF_TOPIC_CAP {
                    score = OFF_TOPIC_CAP;
                }
                AssessmentRecord::new(score, j.feedback_uz, j.corrected_best)
            }
            None => self.speaking_fallback(pairs),
        }
    }

    /// Local heuristic used when the grader is unreachable: a token score
    /// keyed off total answer length, clearly flagged as approximate.
    fn speaking_fallback(&self, pairs: &[(String, String)]) -> AssessmentRecord {
        let joined = pairs
            .iter()
            .map(|(_, answer)| answer.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let score = if word_count(&joined) < SHORT_ANSWER_WORDS {
            SPEAKING_FALLBACK_SHORT
        } else {
            SPEAKING_FALLBACK
        };

        let corrected = if joined.trim().is_empty() {
            EMPTY_PLACEHOLDER.to_string()
        } else {
            joined
        };

        AssessmentRecord::new(score, SERVICE_DOWN_UZ.to_string(), corrected)
    }

    // -----------------------------------------------------------------------
    // Writing
    // -----------------------------------------------------------------------

    /// Grade a writing submission against its three task prompts.
    ///
    /// The advice block is produced from the parsed sections alone and is
    /// appended to the narrative feedback on both the grader and fallback
    /// paths.
    pub async fn assess_writing(
        &self,
        prompts: &[String],
        submission: &str,
    ) -> WritingAssessment {
        let sections = split_sections(submission);
        let word_counts = [
            word_count(&sections[0]),
            word_count(&sections[1]),
            word_count(&sections[2]),
        ];
        let cov = coverage(&word_counts, &WRITING_MIN_WORDS);
        let advice = advice_block(&word_counts, &WRITING_MIN_WORDS);

        let payload = grader::writing_payload(prompts, submission);
        let judgment = self
            .grader
            .grade(grader::writing_instructions(), &payload)
            .await
            .and_then(WritingJudgment::from_value);

        let (score, narrative, corrected) = match judgment {
            Some(j) => {
                let mut score = clamp(j.score_20_75);
                if cov <= LOW_COVERAGE_MAX || j.off_topic {
                    score = score.min(OFF_TOPIC_CAP);
                }
                (score, j.feedback_uz, j.corrected_english)
            }
            None => {
                let base = match cov {
                    0 | 1 => WRITING_FALLBACK_LOW,
                    2 => WRITING_FALLBACK_MID,
                    _ => WRITING_FALLBACK_FULL,
                };
                let mut score = clamp(base);
                if cov <= LOW_COVERAGE_MAX {
                    score = score.min(OFF_TOPIC_CAP);
                }
                (
                    score,
                    SERVICE_DOWN_UZ.to_string(),
                    EMPTY_PLACEHOLDER.to_string(),
                )
            }
        };

        let feedback = format!("{narrative}\n\n{advice}");
        WritingAssessment {
            record: AssessmentRecord::new(score, feedback, corrected),
            word_counts,
            coverage: cov,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
