//! Word helper — dictionary and translation lookups for idle-mode messages.
//!
//! Outside an exam the service behaves like the original vocabulary bot: a
//! plain English word or sentence gets a card with its Uzbek translation and
//! an English dictionary definition.  Both services are opaque single-call
//! collaborators where "not found" is a normal result; the card renders "—"
//! for anything missing and never fails.

pub mod client;

use std::sync::Arc;

use async_trait::async_trait;

pub use client::{HttpDictionary, HttpTranslator};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// One dictionary entry for a word.
#[derive(Debug, Clone)]
pub struct DictEntry {
    pub part_of_speech: String,
    pub definition: String,
}

/// Dictionary lookup; `None` means "not found" (a valid result).
#[async_trait]
pub trait Dictionary: Send + Sync {
    async fn define(&self, word: &str) -> Option<DictEntry>;
}

/// Translation lookup; `None` means the service had no answer.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, src: &str, dst: &str) -> Option<String>;
}

// ---------------------------------------------------------------------------
// WordHelper
// ---------------------------------------------------------------------------

/// Placeholder for any missing card field.
const PLACEHOLDER: &str = "—";

/// Builds the vocabulary card shown for idle-mode text messages.
pub struct WordHelper {
    dictionary: Arc<dyn Dictionary>,
    translator: Arc<dyn Translator>,
}

impl WordHelper {
    pub fn new(dictionary: Arc<dyn Dictionary>, translator: Arc<dyn Translator>) -> Self {
        Self {
            dictionary,
            translator,
        }
    }

    /// Render the card for `text`.
    ///
    /// For multi-word input the longest word is the one defined — the same
    /// shortcut the original bot used to pick the "main" word of a phrase.
    pub async fn card(&self, text: &str) -> String {
        let text = text.trim();
        let headword = text
            .split_whitespace()
            .max_by_key(|w| w.len())
            .unwrap_or(text);

        let translation = self.translator.translate(text, "en", "uz").await;
        let entry = self.dictionary.define(headword).await;

        let definition = match &entry {
            Some(e) if !e.definition.is_empty() => {
                format!("{}: {}", capitalize(&e.part_of_speech), e.definition)
            }
            _ => PLACEHOLDER.to_string(),
        };

        format!(
            "🇬🇧 Matn: {text}\n🇺🇿 Tarjimasi: {}\n📖 Izoh: {definition}",
            translation
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDictionary(Option<DictEntry>);

    #[async_trait]
    impl Dictionary for FixedDictionary {
        async fn define(&self, _word: &str) -> Option<DictEntry> {
            self.0.clone()
        }
    }

    struct FixedTranslator(Option<String>);

    #[async_trait]
    impl Translator for FixedTranslator {
        async fn translate(&self, _text: &str, _src: &str, _dst: &str) -> Option<String> {
            self.0.clone()
        }
    }

    /// Dictionary double that records which word was asked for.
    struct RecordingDictionary(std::sync::Mutex<Vec<String>>);

    #[async_trait]
    impl Dictionary for RecordingDictionary {
        async fn define(&self, word: &str) -> Option<DictEntry> {
            self.0.lock().unwrap().push(word.to_string());
            None
        }
    }

    fn helper(dictionary: impl Dictionary + 'static, translator: FixedTranslator) -> WordHelper {
        WordHelper::new(Arc::new(dictionary), Arc::new(translator))
    }

    #[tokio::test]
    async fn full_card_shows_translation_and_definition() {
        let h = helper(
            FixedDictionary(Some(DictEntry {
                part_of_speech: "noun".into(),
                definition: "a domesticated feline".into(),
            })),
            FixedTranslator(Some("mushuk".into())),
        );

        let card = h.card("cat").await;
        assert!(card.contains("Matn: cat"));
        assert!(card.contains("Tarjimasi: mushuk"));
        assert!(card.contains("Noun: a domesticated feline"));
    }

    #[tokio::test]
    async fn missing_services_render_placeholders_and_never_fail() {
        let h = helper(FixedDictionary(None), FixedTranslator(None));
        let card = h.card("serendipity").await;
        assert!(card.contains("Tarjimasi: —"));
        assert!(card.contains("Izoh: —"));
    }

    #[tokio::test]
    async fn longest_word_of_a_phrase_is_defined() {
        let dictionary = Arc::new(RecordingDictionary(std::sync::Mutex::new(Vec::new())));
        let h = WordHelper::new(dictionary.clone(), Arc::new(FixedTranslator(None)));

        let _ = h.card("a remarkable day").await;
        assert_eq!(*dictionary.0.lock().unwrap(), vec!["remarkable"]);
    }
}
