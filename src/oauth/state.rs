//! Pending OAuth sign-ins, keyed by their CSRF `state` parameter.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::Provider;
use crate::constants::{MAX_PENDING_OAUTH_STATES, OAUTH_STATE_EXPIRY_SECS};
use crate::utils::generate_key;

#[derive(Debug)]
struct PendingState {
    provider: Provider,
    expires_at: DateTime<Utc>,
}

/// In-memory store of issued `state` values. Each value is single use.
///
/// At most `capacity` states are pending; issuing past that evicts the one closest to expiry.
#[derive(Debug)]
pub struct OAuthStates {
    pending: Mutex<HashMap<String, PendingState>>,
    capacity: usize,
}

impl Default for OAuthStates {
    fn default() -> Self {
        Self::with_capacity(MAX_PENDING_OAUTH_STATES)
    }
}

impl OAuthStates {
    pub fn with_capacity(capacity: usize) -> Self {
        OAuthStates {
            pending: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Issue a fresh state for a sign-in with `provider`.
    pub async fn issue(&self, provider: Provider) -> String {
        self.issue_with_ttl(provider, Duration::seconds(OAUTH_STATE_EXPIRY_SECS))
            .await
    }

    pub(crate) async fn issue_with_ttl(&self, provider: Provider, ttl: Duration) -> String {
        let key = generate_key();
        let now = Utc::now();
        let mut pending = self.pending.lock().await;
        pending.retain(|_, state| state.expires_at > now);
        while pending.len() >= self.capacity {
            let oldest = pending
                .iter()
                .min_by_key(|(_, state)| state.expires_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(oldest) => {
                    pending.remove(&oldest);
                }
                None => break,
            }
        }
        pending.insert(
            key.clone(),
            PendingState {
                provider,
                expires_at: now + ttl,
            },
        );
        key
    }

    /// Remove `key` and report whether it was a live state issued for `provider`.
    pub async fn consume(&self, key: &str, provider: Provider) -> bool {
        match self.pending.lock().await.remove(key) {
            Some(state) => state.provider == provider && state.expires_at > Utc::now(),
            None => false,
        }
    }
}
