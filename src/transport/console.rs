//! Line-oriented console transport for local runs.
//!
//! Maps terminal input onto the same inbound events a chat platform would
//! deliver:
//!
//! | Input            | Event                         |
//! |------------------|-------------------------------|
//! | `/speaking`      | speaking mode selection       |
//! | `/writing`       | writing mode selection        |
//! | `/back`          | back signal                   |
//! | `voice <path>`   | voice clip (file contents)    |
//! | anything else    | text message                  |
//!
//! Replies print straight to stdout.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::session::ExamRouter;
use crate::transport::{Inbound, InboundKind, Outbound};

// ---------------------------------------------------------------------------
// ConsoleTransport
// ---------------------------------------------------------------------------

/// Reads turns from stdin and prints replies, impersonating one user.
pub struct ConsoleTransport {
    user_id: u64,
}

impl ConsoleTransport {
    pub fn new(user_id: u64) -> Self {
        Self { user_id }
    }

    /// Pump stdin lines into the router until EOF.
    pub async fn run(&self, router: &ExamRouter) -> anyhow::Result<()> {
        println!(
            "Speaking Zone console — /speaking, /writing, /back, \
             `voice <file>` for a clip, anything else is text.\n"
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let Some(kind) = self.parse(&line).await else {
                continue;
            };
            router
                .handle(Inbound {
                    user_id: self.user_id,
                    kind,
                })
                .await;
        }
        Ok(())
    }

    /// Map one input line onto an inbound event kind.
    async fn parse(&self, line: &str) -> Option<InboundKind> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        Some(match line {
            "/back" => InboundKind::Back,
            "/speaking" => InboundKind::StartSpeaking,
            "/writing" => InboundKind::StartWriting,
            _ => {
                if let Some(path) = line.strip_prefix("voice ") {
                    match tokio::fs::read(path.trim()).await {
                        Ok(bytes) => InboundKind::Voice(bytes),
                        Err(e) => {
                            eprintln!("could not read {path}: {e}");
                            return None;
                        }
                    }
                } else {
                    InboundKind::Text(line.to_string())
                }
            }
        })
    }
}

#[async_trait]
impl Outbound for ConsoleTransport {
    async fn send_text(&self, _user_id: u64, text: &str) {
        println!("{text}\n");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commands_map_to_signals() {
        let transport = ConsoleTransport::new(1);

        assert!(matches!(
            transport.parse("/back").await,
            Some(InboundKind::Back)
        ));
        assert!(matches!(
            transport.parse("/speaking").await,
            Some(InboundKind::StartSpeaking)
        ));
        assert!(matches!(
            transport.parse("  /writing  ").await,
            Some(InboundKind::StartWriting)
        ));
    }

    #[tokio::test]
    async fn plain_lines_become_text_events() {
        let transport = ConsoleTransport::new(1);
        match transport.parse("hello there").await {
            Some(InboundKind::Text(body)) => assert_eq!(body, "hello there"),
            other => panic!("expected text event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let transport = ConsoleTransport::new(1);
        assert!(transport.parse("   ").await.is_none());
    }

    #[tokio::test]
    async fn voice_line_reads_the_clip_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("clip.oga");
        tokio::fs::write(&path, b"fake clip").await.expect("write");

        let transport = ConsoleTransport::new(1);
        match transport.parse(&format!("voice {}", path.display())).await {
            Some(InboundKind::Voice(bytes)) => assert_eq!(bytes, b"fake clip"),
            other => panic!("expected voice event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_voice_file_is_skipped() {
        let transport = ConsoleTransport::new(1);
        assert!(transport.parse("voice /no/such/file.oga").await.is_none());
    }
}
