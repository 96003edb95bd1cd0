//! Typed grader judgments parsed from the extracted JSON object.
//!
//! A judgment is only usable when the integer score is present; every other
//! field is optional and defaults.  The per-question relevance list is parsed
//! leniently — a malformed list degrades to empty (relevance 0) rather than
//! discarding an otherwise usable score.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// SpeakingJudgment
// ---------------------------------------------------------------------------

/// Relevance verdict for one answered question.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerQuestion {
    /// How on-topic the answer was, 0–5.
    #[serde(default)]
    pub relevance: f64,
}

/// Grader verdict for a completed speaking session.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakingJudgment {
    /// Raw score on the 20–75 scale.  Required — a completion without it is
    /// malformed.
    pub score_20_75: i64,

    /// Per-question relevance, in question order.
    #[serde(default, deserialize_with = "lenient_per_question")]
    pub per_question: Vec<PerQuestion>,

    /// Narrative feedback for the learner, in Uzbek.
    #[serde(default)]
    pub feedback_uz: String,

    /// Corrected English rendering of the strongest answer.
    #[serde(default)]
    pub corrected_best: String,
}

impl SpeakingJudgment {
    /// Parse a judgment out of an extracted JSON object.  `None` means the
    /// object is malformed and the caller should fall back.
    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    /// Arithmetic mean of the per-question relevance values; 0.0 when the
    /// list is empty.
    pub fn avg_relevance(&self) -> f64 {
        if self.per_question.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.per_question.iter().map(|q| q.relevance).sum();
        sum / self.per_question.len() as f64
    }
}

/// Accept any JSON for the relevance list; anything that is not a list of
/// `{relevance}` objects becomes an empty list.
fn lenient_per_question<'de, D>(deserializer: D) -> Result<Vec<PerQuestion>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// WritingJudgment
// ---------------------------------------------------------------------------

/// Grader verdict for a writing submission.
#[derive(Debug, Clone, Deserialize)]
pub struct WritingJudgment {
    /// Raw score on the 20–75 scale.  Required.
    pub score_20_75: i64,

    /// Whether the submission as a whole missed the assigned tasks.
    #[serde(default)]
    pub off_topic: bool,

    /// Narrative feedback for the learner, in Uzbek.
    #[serde(default)]
    pub feedback_uz: String,

    /// Corrected English rendering of the submission's strongest part.
    #[serde(default)]
    pub corrected_english: String,
}

impl WritingJudgment {
    /// Parse a judgment out of an extracted JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
