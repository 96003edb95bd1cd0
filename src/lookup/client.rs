//! HTTP implementations of the dictionary and translation collaborators.
//!
//! Both clients treat every failure — transport, status, parse, empty — as
//! "not found" and answer `None`.  They are convenience lookups, not part of
//! the assessment pipeline, and must never surface an error to a turn.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::LookupConfig;
use crate::lookup::{DictEntry, Dictionary, Translator};

// ---------------------------------------------------------------------------
// HttpDictionary
// ---------------------------------------------------------------------------

/// dictionaryapi.dev-style client: `GET /api/v2/entries/en/{word}` returns an
/// array of entries with nested meanings.
pub struct HttpDictionary {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDictionary {
    pub fn from_config(config: &LookupConfig) -> Self {
        Self {
            client: lookup_client(config),
            base_url: config.dictionary_url.clone(),
        }
    }
}

#[async_trait]
impl Dictionary for HttpDictionary {
    async fn define(&self, word: &str) -> Option<DictEntry> {
        let url = format!("{}/api/v2/entries/en/{}", self.base_url, word);

        let response = match self.client.get(&url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                log::debug!("dictionary lookup for {word:?}: status {}", r.status());
                return None;
            }
            Err(e) => {
                log::debug!("dictionary lookup for {word:?} failed: {e}");
                return None;
            }
        };

        let json: Value = response.json().await.ok()?;
        let meaning = &json[0]["meanings"][0];
        let part_of_speech = meaning["partOfSpeech"].as_str()?;
        let definition = meaning["definitions"][0]["definition"].as_str()?;

        Some(DictEntry {
            part_of_speech: part_of_speech.to_string(),
            definition: definition.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// HttpTranslator
// ---------------------------------------------------------------------------

/// Public translate endpoint client (`/translate_a/single?client=gtx&…`).
/// The reply is a nested array whose `[0][n][0]` cells carry the translated
/// segments.
pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranslator {
    pub fn from_config(config: &LookupConfig) -> Self {
        Self {
            client: lookup_client(config),
            base_url: config.translate_url.clone(),
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, src: &str, dst: &str) -> Option<String> {
        let url = format!("{}/translate_a/single", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", src),
                ("tl", dst),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
        {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                log::debug!("translate request: status {}", r.status());
                return None;
            }
            Err(e) => {
                log::debug!("translate request failed: {e}");
                return None;
            }
        };

        let json: Value = response.json().await.ok()?;
        let segments = json[0].as_array()?;
        let translated: String = segments
            .iter()
            .filter_map(|seg| seg[0].as_str())
            .collect();

        if translated.is_empty() {
            None
        } else {
            Some(translated)
        }
    }
}

fn lookup_client(config: &LookupConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clients_build_from_default_config() {
        let config = LookupConfig::default();
        let _: Box<dyn Dictionary> = Box::new(HttpDictionary::from_config(&config));
        let _: Box<dyn Translator> = Box::new(HttpTranslator::from_config(&config));
    }
}
