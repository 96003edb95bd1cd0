//! Entitlement gate — the per-user authorization predicate.
//!
//! The real check lives with the transport (channel membership, paid plan,
//! whatever the deployment uses); the core only sees a boolean.  The check
//! runs on *every* turn, so a user who loses entitlement mid-exam is halted
//! immediately.  Implementations must fail closed: when the check itself
//! errors, answer `false`.

use async_trait::async_trait;

/// Per-user authorization predicate.
#[async_trait]
pub trait Entitlement: Send + Sync {
    async fn is_entitled(&self, user_id: u64) -> bool;
}

/// Lets everyone through — for local/console use and tests.
pub struct AllowAll;

#[async_trait]
impl Entitlement for AllowAll {
    async fn is_entitled(&self, _user_id: u64) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allow_all_lets_everyone_through() {
        assert!(AllowAll.is_entitled(1).await);
        assert!(AllowAll.is_entitled(u64::MAX).await);
    }
}
