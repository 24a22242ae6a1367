//! Sender allow-list.

use std::collections::HashSet;

use tokio::sync::RwLock;
use tracing::{info, warn};

/// How the allow-list is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessMode {
    /// Start empty and enroll the first sender ever seen.
    AutoEnroll,
    /// Fixed set of sender ids; never mutated.
    Static(HashSet<String>),
}

/// Authorizes senders against an allow-list.
///
/// In [`AccessMode::AutoEnroll`] the first sender to call
/// [`authorize`](Self::authorize) is enrolled and every later sender is
/// checked against that single entry. The check-then-insert runs under the
/// write lock, so concurrent first messages enroll exactly one sender.
/// Which of them wins depends on arrival order, which is accepted.
///
/// Membership lives in memory only and resets on restart.
pub struct AccessGate {
    is_static: bool,
    allowed: RwLock<HashSet<String>>,
}

impl AccessGate {
    /// Create a gate for the given mode.
    ///
    /// A static mode with an empty set behaves as auto-enroll.
    pub fn new(mode: AccessMode) -> Self {
        match mode {
            AccessMode::Static(ids) if !ids.is_empty() => {
                info!("AccessGate using static allow-list with {} sender(s)", ids.len());
                Self {
                    is_static: true,
                    allowed: RwLock::new(ids),
                }
            }
            AccessMode::Static(_) => {
                warn!("Static allow-list is empty, falling back to auto-enroll");
                Self::auto_enroll()
            }
            AccessMode::AutoEnroll => Self::auto_enroll(),
        }
    }

    /// Create a gate that enrolls the first sender.
    pub fn auto_enroll() -> Self {
        Self {
            is_static: false,
            allowed: RwLock::new(HashSet::new()),
        }
    }

    /// Create a gate with a fixed allow-list.
    pub fn with_static<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(AccessMode::Static(ids.into_iter().map(Into::into).collect()))
    }

    /// Whether the allow-list was fixed at startup.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Check whether `sender_id` may receive AI replies.
    pub async fn authorize(&self, sender_id: &str) -> bool {
        {
            let allowed = self.allowed.read().await;
            if self.is_static || !allowed.is_empty() {
                return allowed.contains(sender_id);
            }
        }

        let mut allowed = self.allowed.write().await;
        if allowed.is_empty() {
            allowed.insert(sender_id.to_string());
            info!("Enrolled first sender {}", sender_id);
            return true;
        }
        allowed.contains(sender_id)
    }

    /// Current members, sorted.
    pub async fn members(&self) -> Vec<String> {
        let mut members: Vec<String> = self.allowed.read().await.iter().cloned().collect();
        members.sort();
        members
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::auto_enroll()
    }
}
