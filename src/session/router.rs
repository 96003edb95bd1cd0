//! Turn router — drives one user's exam session through the pipeline.
//!
//! One [`ExamRouter`] serves every user.  Turns for different users run
//! concurrently; turns for the same user are serialized behind a per-user
//! async mutex, so a second message cannot race an in-flight transcription
//! or grading call.
//!
//! The entitlement gate runs on *every* turn, before anything else.  A user
//! who loses entitlement mid-exam has their session force-cleared on their
//! next message.  Any error that escapes a turn is logged and answered with
//! a generic apology; the session map stays usable for the next turn.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::assess::{AssessmentEngine, AssessmentRecord, WritingAssessment, WRITING_MIN_WORDS};
use crate::gate::Entitlement;
use crate::lookup::WordHelper;
use crate::session::bank;
use crate::session::state::{Session, SessionMode};
use crate::stats::{UsageStats, METRIC_SPEAKING, METRIC_WRITING};
use crate::stt::VoiceTranscriber;
use crate::transport::{Inbound, InboundKind, Outbound};

// ---------------------------------------------------------------------------
// User-facing messages (Uzbek)
// ---------------------------------------------------------------------------

pub(crate) const MSG_SUBSCRIBE: &str =
    "Botdan foydalanish uchun avval kanalga a'zo bo'ling. A'zo bo'lgach, qayta urinib ko'ring.";

pub(crate) const MSG_APOLOGY: &str = "Kechirasiz, xatolik yuz berdi. Qayta urinib ko'ring.";

pub(crate) const MSG_BACK_DONE: &str = "Bosh menyuga qaytdingiz.";

pub(crate) const MSG_IDLE_HINT: &str =
    "Imtihon boshlash uchun /speaking yoki /writing buyrug'ini tanlang. \
     Inglizcha so'z yuborsangiz, tarjima va izoh beraman.";

pub(crate) const MSG_SPEAKING_INTRO: &str =
    "🎤 Speaking imtihoni boshlandi! Sizga 3 ta savol beriladi, har biriga \
     ovozli xabar bilan javob bering. Bekor qilish: /back";

pub(crate) const MSG_NEED_VOICE: &str =
    "Iltimos, javobingizni ovozli xabar qilib yuboring.";

pub(crate) const MSG_NOT_UNDERSTOOD: &str =
    "Ovozingizni tushunib bo'lmadi. Iltimos, aniqroq qilib qayta yuboring.";

pub(crate) const MSG_TRANSCODE_DOWN: &str =
    "Ovozli xabarni qayta ishlab bo'lmadi — serverda audio vositasi \
     ishlamayapti. Birozdan so'ng qayta urinib ko'ring.";

pub(crate) const MSG_NEED_TEXT: &str =
    "Writing imtihonida javob matn ko'rinishida bo'lishi kerak. Iltimos, \
     yozma javob yuboring.";

// ---------------------------------------------------------------------------
// ExamRouter
// ---------------------------------------------------------------------------

/// Routes inbound turns through the session state machine and the
/// assessment pipeline.
pub struct ExamRouter {
    sessions: Mutex<HashMap<u64, Arc<tokio::sync::Mutex<Session>>>>,
    gate: Arc<dyn Entitlement>,
    transcriber: Arc<VoiceTranscriber>,
    engine: Arc<AssessmentEngine>,
    stats: Arc<UsageStats>,
    helper: Arc<WordHelper>,
    outbound: Arc<dyn Outbound>,
}

impl ExamRouter {
    pub fn new(
        gate: Arc<dyn Entitlement>,
        transcriber: Arc<VoiceTranscriber>,
        engine: Arc<AssessmentEngine>,
        stats: Arc<UsageStats>,
        helper: Arc<WordHelper>,
        outbound: Arc<dyn Outbound>,
    ) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            gate,
            transcriber,
            engine,
            stats,
            helper,
            outbound,
        }
    }

    /// Handle one inbound turn.  This is the outermost boundary: whatever
    /// goes wrong inside is logged and answered with an apology, never
    /// propagated.
    pub async fn handle(&self, event: Inbound) {
        let user_id = event.user_id;
        let session = self.session_handle(user_id);
        // Serializes turns per user, including across the network calls.
        let mut session = session.lock().await;

        if let Err(e) = self.process(user_id, &mut session, event.kind).await {
            log::error!("turn for user {user_id} failed: {e:#}");
            self.send(user_id, MSG_APOLOGY).await;
        }
    }

    fn session_handle(&self, user_id: u64) -> Arc<tokio::sync::Mutex<Session>> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.entry(user_id).or_default().clone()
    }

    async fn send(&self, user_id: u64, text: &str) {
        self.outbound.send_text(user_id, text).await;
    }

    // -----------------------------------------------------------------------
    // Turn processing
    // -----------------------------------------------------------------------

    async fn process(
        &self,
        user_id: u64,
        session: &mut Session,
        kind: InboundKind,
    ) -> Result<()> {
        // Gate check on every turn, not only at session start.
        if !self.gate.is_entitled(user_id).await {
            if session.mode != SessionMode::Idle {
                log::info!("user {user_id} lost entitlement mid-{}", session.mode.label());
                session.reset();
            }
            self.send(user_id, MSG_SUBSCRIBE).await;
            return Ok(());
        }

        match kind {
            InboundKind::Back => {
                if session.mode == SessionMode::Idle {
                    self.send(user_id, MSG_IDLE_HINT).await;
                } else {
                    session.reset();
                    self.send(user_id, MSG_BACK_DONE).await;
                }
            }

            InboundKind::StartSpeaking => {
                session.start_speaking(bank::sample_speaking_questions());
                self.send(user_id, MSG_SPEAKING_INTRO).await;
                if let Some(question) = session.current_prompt() {
                    self.send(user_id, &format_question(1, question)).await;
                }
            }

            InboundKind::StartWriting => {
                session.start_writing(bank::sample_writing_prompts());
                self.send(user_id, &writing_intro(session.prompts())).await;
            }

            InboundKind::Text(text) => match session.mode {
                SessionMode::Idle => {
                    let card = self.helper.card(&text).await;
                    self.send(user_id, &card).await;
                }
                SessionMode::AwaitingSpeakingAnswer => {
                    self.send(user_id, MSG_NEED_VOICE).await;
                    self.reprompt(user_id, session).await;
                }
                SessionMode::AwaitingWritingSubmission => {
                    let prompts = session.prompts().to_vec();
                    let result = self.engine.assess_writing(&prompts, &text).await;
                    self.send(user_id, &format_writing_result(&result)).await;
                    self.stats.increment(METRIC_WRITING, user_id);
                    session.reset();
                }
            },

            InboundKind::Voice(clip) => match session.mode {
                SessionMode::Idle => {
                    self.send(user_id, MSG_IDLE_HINT).await;
                }
                SessionMode::AwaitingWritingSubmission => {
                    self.send(user_id, MSG_NEED_TEXT).await;
                }
                SessionMode::AwaitingSpeakingAnswer => {
                    self.speaking_turn(user_id, session, &clip).await;
                }
            },
        }

        Ok(())
    }

    /// One voice turn of a speaking exam: transcribe, accumulate, and on the
    /// third accepted answer run the assessment.
    async fn speaking_turn(&self, user_id: u64, session: &mut Session, clip: &[u8]) {
        let transcript = match self.transcriber.transcribe_clip(clip).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("voice clip for user {user_id} not transcodable: {e}");
                self.send(user_id, MSG_TRANSCODE_DOWN).await;
                self.reprompt(user_id, session).await;
                return;
            }
        };

        if transcript.is_empty() {
            self.send(user_id, MSG_NOT_UNDERSTOOD).await;
            self.reprompt(user_id, session).await;
            return;
        }

        session.push_answer(transcript);

        if session.is_complete() {
            let pairs = session.pairs();
            let record = self.engine.assess_speaking(&pairs).await;
            self.send(user_id, &format_record(&record)).await;
            self.stats.increment(METRIC_SPEAKING, user_id);
            session.reset();
        } else if let Some(question) = session.current_prompt() {
            let number = session.answer_index() + 1;
            self.send(user_id, &format_question(number, question)).await;
        }
    }

    /// Repeat the question the session is still waiting on.
    async fn reprompt(&self, user_id: u64, session: &Session) {
        if let Some(question) = session.current_prompt() {
            let number = session.answer_index() + 1;
            self.send(user_id, &format_question(number, question)).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Message formatting
// ---------------------------------------------------------------------------

fn format_question(number: usize, question: &str) -> String {
    format!("🎤 {number}-savol: {question}")
}

fn writing_intro(prompts: &[String]) -> String {
    let mut intro = String::with_capacity(1024);
    intro.push_str(
        "✍️ Writing imtihoni boshlandi! Quyidagi 3 ta vazifani bitta xabarda \
         bajaring. Har bir javobni yangi qatordan 1), 2), 3) belgilari bilan \
         boshlang. Bekor qilish: /back\n",
    );
    for (i, prompt) in prompts.iter().enumerate() {
        intro.push_str(&format!(
            "\n{}-vazifa (kamida {} so'z):\n{prompt}\n",
            i + 1,
            WRITING_MIN_WORDS.get(i).copied().unwrap_or(0),
        ));
    }
    intro
}

fn format_record(record: &AssessmentRecord) -> String {
    format!(
        "🎓 Imtihon yakunlandi!\n\
         📊 Ball: {}/75\n\
         🏅 Daraja: {} (IELTS ≈ {})\n\n\
         💬 Izoh: {}\n\n\
         ✍️ Tuzatilgan matn:\n{}",
        record.score,
        record.band.label(),
        record.ielts(),
        record.feedback,
        record.corrected,
    )
}

fn format_writing_result(result: &WritingAssessment) -> String {
    let [w1, w2, w3] = result.word_counts;
    format!(
        "🎓 Imtihon yakunlandi!\n\
         📊 Ball: {}/75\n\
         🏅 Daraja: {} (IELTS ≈ {})\n\
         📝 So'zlar soni: 1-vazifa {w1}, 2-vazifa {w2}, 3-vazifa {w3}\n\
         ✅ Talabga javob bergan vazifalar: {}/3\n\n\
         💬 Izoh: {}\n\n\
         ✍️ Tuzatilgan matn:\n{}",
        result.record.score,
        result.record.band.label(),
        result.record.ielts(),
        result.coverage,
        result.record.feedback,
        result.record.corrected,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
