//! Grading prompt builders — strict-JSON instructions plus exam payloads.
//!
//! The instructions pin the reply shape down hard (single JSON object, fixed
//! keys, integer score on the 20–75 scale) because the judgment parser only
//! accepts that shape.  Feedback is requested in Uzbek — the learner-facing
//! language — while corrections stay in English.

// ---------------------------------------------------------------------------
// System instructions
// ---------------------------------------------------------------------------

/// Speaking-session grading contract.
const SPEAKING_INSTRUCTIONS: &str = "\
You are a strict English speaking examiner for Uzbek learners.
You receive three interview questions and the learner's transcribed answers.

Grade the performance and reply with ONLY one JSON object, no prose:
{
  \"score_20_75\": <integer 20-75, overall speaking level>,
  \"per_question\": [{\"relevance\": <0-5>}, {\"relevance\": <0-5>}, {\"relevance\": <0-5>}],
  \"feedback_uz\": \"<2-4 sentences of feedback in Uzbek>\",
  \"corrected_best\": \"<the learner's best answer, rewritten in correct English>\"
}

Rules:
1. relevance measures how well the answer addresses its question (0 = off-topic).
2. Judge grammar, vocabulary range and coherence, not accent.
3. Transcription artifacts (missing punctuation) are not the learner's fault.
4. feedback_uz must be written in Uzbek.";

/// Writing-submission grading contract.
const WRITING_INSTRUCTIONS: &str = "\
You are a strict English writing examiner for Uzbek learners.
You receive three writing tasks and the learner's single submission, which
should contain the three answers labeled 1), 2), 3).

Grade the submission and reply with ONLY one JSON object, no prose:
{
  \"score_20_75\": <integer 20-75, overall writing level>,
  \"off_topic\": <true if the submission ignores the assigned tasks>,
  \"feedback_uz\": \"<2-4 sentences of feedback in Uzbek>\",
  \"corrected_english\": \"<the strongest passage, rewritten in correct English>\"
}

Rules:
1. Judge task response, organisation, vocabulary and grammar.
2. A submission that answers different questions than assigned is off_topic.
3. feedback_uz must be written in Uzbek.";

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Instructions for the speaking grading request.
pub fn speaking_instructions() -> &'static str {
    SPEAKING_INSTRUCTIONS
}

/// Instructions for the writing grading request.
pub fn writing_instructions() -> &'static str {
    WRITING_INSTRUCTIONS
}

/// Build the speaking payload: numbered question/answer pairs in order.
pub fn speaking_payload(pairs: &[(String, String)]) -> String {
    let mut payload = String::with_capacity(1024);
    for (i, (question, answer)) in pairs.iter().enumerate() {
        payload.push_str(&format!(
            "Question {n}: {question}\nAnswer {n}: {answer}\n\n",
            n = i + 1
        ));
    }
    payload
}

/// Build the writing payload: the three task prompts followed by the raw
/// submission exactly as the learner sent it.
pub fn writing_payload(prompts: &[String], submission: &str) -> String {
    let mut payload = String::with_capacity(1024 + submission.len());
    for (i, prompt) in prompts.iter().enumerate() {
        payload.push_str(&format!("Task {}: {prompt}\n", i + 1));
    }
    payload.push_str("\nLearner submission:\n");
    payload.push_str(submission);
    payload
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaking_instructions_pin_the_reply_shape() {
        let sys = speaking_instructions();
        assert!(sys.contains("score_20_75"));
        assert!(sys.contains("per_question"));
        assert!(sys.contains("relevance"));
        assert!(sys.contains("feedback_uz"));
        assert!(sys.contains("corrected_best"));
        assert!(sys.contains("ONLY one JSON object"));
    }

    #[test]
    fn writing_instructions_pin_the_reply_shape() {
        let sys = writing_instructions();
        assert!(sys.contains("score_20_75"));
        assert!(sys.contains("off_topic"));
        assert!(sys.contains("feedback_uz"));
        assert!(sys.contains("corrected_english"));
    }

    #[test]
    fn speaking_payload_numbers_pairs_in_order() {
        let pairs = vec![
            ("What is your hobby?".to_string(), "I like football".to_string()),
            ("Describe your city.".to_string(), "Tashkent is big".to_string()),
        ];
        let payload = speaking_payload(&pairs);

        assert!(payload.contains("Question 1: What is your hobby?"));
        assert!(payload.contains("Answer 1: I like football"));
        assert!(payload.contains("Question 2: Describe your city."));
        let q1 = payload.find("Question 1").unwrap();
        let q2 = payload.find("Question 2").unwrap();
        assert!(q1 < q2);
    }

    #[test]
    fn writing_payload_carries_tasks_and_submission() {
        let prompts = vec!["Write a letter".to_string(), "Write an essay".to_string()];
        let payload = writing_payload(&prompts, "1) Dear Alex ...");

        assert!(payload.contains("Task 1: Write a letter"));
        assert!(payload.contains("Task 2: Write an essay"));
        assert!(payload.contains("Learner submission:\n1) Dear Alex ..."));
    }
}
