//! Per-user exam session state.
//!
//! [`Session`] is the only stateful value in the core.  The state machine
//! transitions are:
//!
//! ```text
//! Idle ──start speaking──▶ AwaitingSpeakingAnswer
//!      ──start writing───▶ AwaitingWritingSubmission
//!
//! AwaitingSpeakingAnswer ──3rd accepted answer──▶ (assessment) ──▶ Idle
//! AwaitingWritingSubmission ──any text──────────▶ (assessment) ──▶ Idle
//! any non-Idle ──"back" / gating failure────────▶ Idle
//! ```
//!
//! Exactly one session exists per user.  Entering a mode re-samples the
//! prompts and discards whatever the previous session had accumulated.

// ---------------------------------------------------------------------------
// SessionMode
// ---------------------------------------------------------------------------

/// Conversation states of one user's exam session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// No exam in progress; plain text gets the word-helper treatment.
    #[default]
    Idle,

    /// A speaking exam is running; only voice input advances it.
    AwaitingSpeakingAnswer,

    /// A writing exam is running; only text input completes it.
    AwaitingWritingSubmission,
}

impl SessionMode {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            SessionMode::Idle => "idle",
            SessionMode::AwaitingSpeakingAnswer => "speaking",
            SessionMode::AwaitingWritingSubmission => "writing",
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One user's exam conversation state.
///
/// The answer index is always `answers.len()` by construction, which keeps
/// the `answer_index == len(collected_answers)` invariant impossible to
/// break from outside.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub mode: SessionMode,
    /// The prompts fixed at mode entry: 3 questions (speaking) or 3 writing
    /// tasks.  Immutable for the life of the session.
    prompts: Vec<String>,
    /// Accepted answers so far, in question order.  Append-only; speaking
    /// mode only (writing collects everything in one submission).
    answers: Vec<String>,
}

impl Session {
    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Enter speaking mode with freshly sampled questions, discarding any
    /// prior progress.
    pub fn start_speaking(&mut self, questions: Vec<String>) {
        self.mode = SessionMode::AwaitingSpeakingAnswer;
        self.prompts = questions;
        self.answers.clear();
    }

    /// Enter writing mode with freshly sampled task prompts.
    pub fn start_writing(&mut self, prompts: Vec<String>) {
        self.mode = SessionMode::AwaitingWritingSubmission;
        self.prompts = prompts;
        self.answers.clear();
    }

    /// Return to `Idle`, dropping prompts and answers.
    pub fn reset(&mut self) {
        *self = Session::default();
    }

    /// Record an accepted speaking answer.
    pub fn push_answer(&mut self, answer: String) {
        debug_assert!(self.answers.len() < self.prompts.len());
        self.answers.push(answer);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Number of answers collected so far (0..=3).
    pub fn answer_index(&self) -> usize {
        self.answers.len()
    }

    /// The question awaiting an answer, if the session still expects one.
    pub fn current_prompt(&self) -> Option<&str> {
        self.prompts.get(self.answers.len()).map(String::as_str)
    }

    /// All prompts fixed at session start.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// `true` once every prompt has an accepted answer.
    pub fn is_complete(&self) -> bool {
        !self.prompts.is_empty() && self.answers.len() == self.prompts.len()
    }

    /// The collected (question, answer) pairs, in order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.prompts
            .iter()
            .cloned()
            .zip(self.answers.iter().cloned())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<String> {
        vec!["q1".into(), "q2".into(), "q3".into()]
    }

    #[test]
    fn default_session_is_idle_and_empty() {
        let session = Session::default();
        assert_eq!(session.mode, SessionMode::Idle);
        assert_eq!(session.answer_index(), 0);
        assert!(session.prompts().is_empty());
        assert!(session.current_prompt().is_none());
        assert!(!session.is_complete());
    }

    #[test]
    fn answer_index_tracks_collected_answers() {
        let mut session = Session::default();
        session.start_speaking(questions());

        assert_eq!(session.answer_index(), 0);
        assert_eq!(session.current_prompt(), Some("q1"));

        session.push_answer("a1".into());
        assert_eq!(session.answer_index(), 1);
        assert_eq!(session.current_prompt(), Some("q2"));

        session.push_answer("a2".into());
        session.push_answer("a3".into());
        assert_eq!(session.answer_index(), 3);
        assert!(session.current_prompt().is_none());
        assert!(session.is_complete());
    }

    #[test]
    fn pairs_keep_question_order() {
        let mut session = Session::default();
        session.start_speaking(questions());
        session.push_answer("a1".into());
        session.push_answer("a2".into());
        session.push_answer("a3".into());

        let pairs = session.pairs();
        assert_eq!(pairs[0], ("q1".to_string(), "a1".to_string()));
        assert_eq!(pairs[2], ("q3".to_string(), "a3".to_string()));
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session::default();
        session.start_speaking(questions());
        session.push_answer("a1".into());

        session.reset();
        assert_eq!(session.mode, SessionMode::Idle);
        assert_eq!(session.answer_index(), 0);
        assert!(session.prompts().is_empty());
    }

    #[test]
    fn entering_a_mode_discards_previous_progress() {
        let mut session = Session::default();
        session.start_speaking(questions());
        session.push_answer("a1".into());
        session.push_answer("a2".into());

        session.start_writing(vec!["t1".into(), "t2".into(), "t3".into()]);
        assert_eq!(session.mode, SessionMode::AwaitingWritingSubmission);
        assert_eq!(session.answer_index(), 0);
        assert_eq!(session.prompts().len(), 3);
        assert_eq!(session.prompts()[0], "t1");
    }

    #[test]
    fn writing_session_is_not_complete_without_answers() {
        let mut session = Session::default();
        session.start_writing(vec!["t1".into(), "t2".into(), "t3".into()]);
        assert!(!session.is_complete());
    }
}
