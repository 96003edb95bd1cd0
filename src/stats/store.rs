//! Durable usage counters keyed by (metric, user id).
//!
//! The whole document loads once at startup and is rewritten in full after
//! every increment — counters change a few times per exam, so a full rewrite
//! is fine at this scale.  Counting is best-effort: a missing or corrupt
//! file starts the store empty, and a failed write is logged and swallowed,
//! never blocking the user-facing flow.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// UsageStats
// ---------------------------------------------------------------------------

/// Counter document: metric name → user id → count.
type Counts = HashMap<String, HashMap<String, u64>>;

/// Thread-safe usage counter store.
///
/// All reads and writes go through one internal mutex, so concurrent
/// increments from different user sessions cannot corrupt the backing file.
pub struct UsageStats {
    inner: Mutex<Inner>,
}

struct Inner {
    counts: Counts,
    path: PathBuf,
}

impl UsageStats {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Load counters from `path`, or start empty when the file is missing or
    /// unreadable.  Never fails.
    pub fn load_from(path: PathBuf) -> Self {
        let counts = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                log::warn!("usage stats file is corrupt, starting empty: {e}");
                Counts::default()
            }),
            Err(_) => Counts::default(),
        };

        Self {
            inner: Mutex::new(Inner { counts, path }),
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Add one to `(metric, user_id)` and persist the document before
    /// returning.  The read-modify-write happens under the store mutex.
    pub fn increment(&self, metric: &str, user_id: u64) {
        let mut inner = self.inner.lock().unwrap();
        let count = inner
            .counts
            .entry(metric.to_string())
            .or_default()
            .entry(user_id.to_string())
            .or_insert(0);
        *count += 1;
        inner.save();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Current count for `(metric, user_id)`; 0 when never incremented.
    pub fn count(&self, metric: &str, user_id: u64) -> u64 {
        let inner = self.inner.lock().unwrap();
        inner
            .counts
            .get(metric)
            .and_then(|users| users.get(&user_id.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Total across all users for `metric`.
    pub fn total(&self, metric: &str) -> u64 {
        let inner = self.inner.lock().unwrap();
        inner
            .counts
            .get(metric)
            .map(|users| users.values().sum())
            .unwrap_or(0)
    }

    /// A full copy of the counter document (admin/stats view).
    pub fn snapshot(&self) -> HashMap<String, HashMap<String, u64>> {
        self.inner.lock().unwrap().counts.clone()
    }
}

impl Inner {
    /// Best-effort full rewrite of the backing document.
    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&self.counts) {
            Ok(data) => {
                if let Err(e) = std::fs::write(&self.path, data) {
                    log::warn!("could not persist usage stats: {e}");
                }
            }
            Err(e) => log::warn!("could not serialise usage stats: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn stats_in_temp() -> (UsageStats, tempfile::TempDir) {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("usage-stats.json");
        (UsageStats::load_from(path), dir)
    }

    #[test]
    fn starts_empty() {
        let (stats, _dir) = stats_in_temp();
        assert_eq!(stats.count("speaking_exams", 1), 0);
        assert_eq!(stats.total("speaking_exams"), 0);
        assert!(stats.snapshot().is_empty());
    }

    #[test]
    fn increment_is_visible_immediately() {
        let (stats, _dir) = stats_in_temp();
        stats.increment("speaking_exams", 7);
        stats.increment("speaking_exams", 7);
        stats.increment("writing_exams", 7);

        assert_eq!(stats.count("speaking_exams", 7), 2);
        assert_eq!(stats.count("writing_exams", 7), 1);
        assert_eq!(stats.count("writing_exams", 8), 0);
    }

    #[test]
    fn total_sums_across_users() {
        let (stats, _dir) = stats_in_temp();
        stats.increment("speaking_exams", 1);
        stats.increment("speaking_exams", 2);
        stats.increment("speaking_exams", 2);
        assert_eq!(stats.total("speaking_exams"), 3);
    }

    #[test]
    fn persists_and_reloads() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("usage-stats.json");

        {
            let stats = UsageStats::load_from(path.clone());
            stats.increment("writing_exams", 42);
            stats.increment("writing_exams", 42);
        }

        let reloaded = UsageStats::load_from(path);
        assert_eq!(reloaded.count("writing_exams", 42), 2);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("usage-stats.json");
        std::fs::write(&path, "{ not json !!").expect("write");

        let stats = UsageStats::load_from(path);
        assert_eq!(stats.total("speaking_exams"), 0);
        // And the store still works after the bad load.
        stats.increment("speaking_exams", 1);
        assert_eq!(stats.count("speaking_exams", 1), 1);
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        // Counting is best-effort: a bogus path must not break increments.
        let stats = UsageStats::load_from(PathBuf::from(
            "/nonexistent-root-dir/for-sure/usage-stats.json",
        ));
        stats.increment("speaking_exams", 1);
        assert_eq!(stats.count("speaking_exams", 1), 1);
    }

    #[test]
    fn concurrent_increments_do_not_lose_updates() {
        let (stats, _dir) = stats_in_temp();
        let stats = Arc::new(stats);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        stats.increment("speaking_exams", i % 2);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.total("speaking_exams"), 200);
    }
}
