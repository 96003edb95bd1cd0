//! Usage counter module.
//!
//! [`UsageStats`] is the durable (metric, user id) → count store.  It loads
//! once at startup, rewrites its JSON document on every increment, and is
//! deliberately best-effort — counting must never block or fail an exam.

pub mod store;

pub use store::UsageStats;

/// Metric recorded when a speaking exam completes.
pub const METRIC_SPEAKING: &str = "speaking_exams";

/// Metric recorded when a writing exam completes.
pub const METRIC_WRITING: &str = "writing_exams";
