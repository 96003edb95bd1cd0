//! Transport seam — inbound events in, outbound messages out.
//!
//! The core is chat-platform agnostic: whatever delivers user turns maps
//! them into [`Inbound`] values and implements [`Outbound`] for replies.
//! The crate ships one concrete transport, the line-oriented
//! [`ConsoleTransport`] used by the binary to drive the pipeline end-to-end
//! from a terminal.

pub mod console;

use async_trait::async_trait;

pub use console::ConsoleTransport;

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// One user turn, as delivered by the transport.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub user_id: u64,
    pub kind: InboundKind,
}

/// The payload of a user turn.
#[derive(Debug, Clone)]
pub enum InboundKind {
    /// A plain text message.
    Text(String),
    /// A captured voice clip (compressed container bytes).
    Voice(Vec<u8>),
    /// The "back to menu" signal.
    Back,
    /// The speaking-exam mode-selection signal.
    StartSpeaking,
    /// The writing-exam mode-selection signal.
    StartWriting,
}

// ---------------------------------------------------------------------------
// Outbound trait
// ---------------------------------------------------------------------------

/// Delivery of core output back to the user.
///
/// Delivery is fire-and-forget from the core's perspective; the core never
/// fails a turn because a message could not be sent.
#[async_trait]
pub trait Outbound: Send + Sync {
    async fn send_text(&self, user_id: u64, text: &str);
}
