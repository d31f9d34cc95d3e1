// Session lifecycle
// Decision: replay-latest broadcast via tokio::sync::watch - a new
// subscriber sees the current value immediately, and dropping the receiver
// unsubscribes without affecting other observers.
// Decision: decode failure and explicit logout share one eviction
// transition, so an invalid credential always lands in the same terminal
// state as a logout, forced navigation included.

use std::io;

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::claims::{decode_claims, TokenClaims};
use crate::routes::NavTarget;
use crate::token_store::TokenStore;

/// In-memory projection of the authenticated identity.
///
/// Derived from the stored credential, never persisted on its own: it is
/// non-null exactly while a decodable credential is present.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl UserProfile {
    fn from_claims(claims: TokenClaims) -> Self {
        Self {
            name: claims.nombre,
            email: claims.sub,
            roles: claims.authorities,
        }
    }

    /// True when this profile holds at least one of `required`.
    pub fn has_any_role(&self, required: &[&str]) -> bool {
        self.roles
            .iter()
            .any(|held| required.iter().any(|req| held == req))
    }
}

/// Why a session was evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictReason {
    /// The credential failed to decode (malformed or expired).
    ExpiredOrInvalid,
    /// Explicit logout.
    UserRequested,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid credential: {0}")]
    InvalidCredential(#[from] jsonwebtoken::errors::Error),

    #[error("credential storage failed: {0}")]
    Storage(#[from] io::Error),
}

/// Owner of the current-user state.
///
/// Constructed once and passed to whoever needs it - there is no ambient
/// instance. Construction runs the initialize step: if the store already
/// holds a credential it is processed exactly as a fresh login would be,
/// so a stale or tampered token is evicted before anyone can observe it.
pub struct SessionManager {
    store: Box<dyn TokenStore>,
    current: watch::Sender<Option<UserProfile>>,
    redirects: mpsc::UnboundedSender<NavTarget>,
}

impl SessionManager {
    /// Build a manager together with the receiving end of its redirect
    /// channel. Eviction pushes one [`NavTarget::Login`] per occurrence;
    /// the caller decides what "navigating" means.
    pub fn new(store: Box<dyn TokenStore>) -> (Self, mpsc::UnboundedReceiver<NavTarget>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::with_redirects(store, tx), rx)
    }

    /// Like [`SessionManager::new`] with a caller-owned redirect sender.
    pub fn with_redirects(
        store: Box<dyn TokenStore>,
        redirects: mpsc::UnboundedSender<NavTarget>,
    ) -> Self {
        let (current, _) = watch::channel(None);
        let manager = Self {
            store,
            current,
            redirects,
        };
        manager.initialize();
        manager
    }

    /// One-time start-up step: resume the session from a stored credential,
    /// if any. A credential that no longer decodes is evicted here.
    fn initialize(&self) {
        if let Some(token) = self.store.read() {
            if let Err(err) = self.establish(&token) {
                tracing::warn!("stored credential rejected at startup: {err}");
            }
        }
    }

    /// Process a credential: persist it, decode it into a profile, and
    /// broadcast the new state. On decode failure the session is evicted -
    /// storage cleared, state nulled, login redirect signalled - and the
    /// decode error is returned to the caller.
    pub fn establish(&self, token: &str) -> Result<UserProfile, SessionError> {
        self.store.save(token)?;
        match decode_claims(token) {
            Ok(claims) => {
                let profile = UserProfile::from_claims(claims);
                self.current.send_replace(Some(profile.clone()));
                tracing::debug!(email = %profile.email, "session established");
                Ok(profile)
            }
            Err(err) => {
                self.evict(EvictReason::ExpiredOrInvalid);
                Err(err.into())
            }
        }
    }

    /// Explicit logout. Idempotent.
    pub fn logout(&self) {
        self.evict(EvictReason::UserRequested);
    }

    /// The shared eviction transition: clear storage, null the state,
    /// broadcast, and signal navigation to the login page.
    ///
    /// Never fails: a storage error here is logged and the in-memory state
    /// still transitions, keeping fail-closed semantics.
    pub fn evict(&self, reason: EvictReason) {
        if let Err(err) = self.store.clear() {
            tracing::warn!("failed to clear stored credential: {err}");
        }
        self.current.send_replace(None);
        tracing::debug!(?reason, "session evicted");
        let _ = self.redirects.send(NavTarget::Login);
    }

    /// Synchronous snapshot of the current profile.
    pub fn current_value(&self) -> Option<UserProfile> {
        self.current.borrow().clone()
    }

    /// Subscribe to session changes. The receiver immediately holds the
    /// latest value and is notified on every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.current.subscribe()
    }

    /// Whether a credential is present. Presence, not validity: a token
    /// that would fail to decode still counts until something decodes it.
    pub fn is_authenticated(&self) -> bool {
        self.store.read().is_some()
    }

    /// The stored credential, for the request authorizer.
    pub fn token(&self) -> Option<String> {
        self.store.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::test_tokens::{future_exp, mint};
    use crate::token_store::MemoryTokenStore;

    fn manager() -> (SessionManager, mpsc::UnboundedReceiver<NavTarget>) {
        SessionManager::new(Box::new(MemoryTokenStore::new()))
    }

    #[test]
    fn test_establish_valid_credential() {
        let (session, mut redirects) = manager();
        let token = mint("a@b.com", "Ana", &["ROLE_ADMIN"], future_exp());

        let profile = session.establish(&token).unwrap();
        assert_eq!(profile.email, "a@b.com");
        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.roles, vec!["ROLE_ADMIN".to_string()]);

        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some(token.as_str()));
        assert_eq!(session.current_value(), Some(profile));
        assert!(redirects.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_replays_latest_to_new_subscribers() {
        let (session, _redirects) = manager();
        let token = mint("a@b.com", "Ana", &["ROLE_CLIENT"], future_exp());
        session.establish(&token).unwrap();

        // Subscribing after the change still observes it
        let rx = session.subscribe();
        let profile = rx.borrow().clone().unwrap();
        assert_eq!(profile.roles, vec!["ROLE_CLIENT".to_string()]);

        session.logout();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn test_malformed_credential_equals_logout() {
        let (session, mut redirects) = manager();

        let err = session.establish("two.segments").unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredential(_)));

        // Net effect of a decode failure is exactly a logout
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.current_value(), None);

        // The login redirect fires exactly once
        assert_eq!(redirects.try_recv().unwrap(), NavTarget::Login);
        assert!(redirects.try_recv().is_err());
    }

    #[test]
    fn test_expired_credential_is_evicted() {
        let (session, mut redirects) = manager();
        let token = mint("a@b.com", "Ana", &[], chrono::Utc::now().timestamp() - 120);

        assert!(session.establish(&token).is_err());
        assert!(!session.is_authenticated());
        assert_eq!(redirects.try_recv().unwrap(), NavTarget::Login);
    }

    #[test]
    fn test_initialize_resumes_stored_session() {
        let store = MemoryTokenStore::new();
        store
            .save(&mint("a@b.com", "Ana", &["ROLE_WORKER"], future_exp()))
            .unwrap();

        let (session, _redirects) = SessionManager::new(Box::new(store));
        let profile = session.current_value().unwrap();
        assert_eq!(profile.email, "a@b.com");
        assert_eq!(profile.roles, vec!["ROLE_WORKER".to_string()]);
    }

    #[test]
    fn test_initialize_evicts_stale_credential() {
        let store = MemoryTokenStore::new();
        store.save("not-a-jwt").unwrap();

        let (session, mut redirects) = SessionManager::new(Box::new(store));
        assert!(!session.is_authenticated());
        assert_eq!(session.current_value(), None);
        assert_eq!(redirects.try_recv().unwrap(), NavTarget::Login);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (session, _redirects) = manager();
        session
            .establish(&mint("a@b.com", "Ana", &[], future_exp()))
            .unwrap();

        session.logout();
        session.logout();

        assert_eq!(session.current_value(), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_has_any_role() {
        let profile = UserProfile {
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            roles: vec!["ROLE_ADMIN".to_string(), "ROLE_CLIENT".to_string()],
        };
        assert!(profile.has_any_role(&["ROLE_ADMIN"]));
        assert!(profile.has_any_role(&["ROLE_ADMIN", "ROLE_WORKER"]));
        assert!(!profile.has_any_role(&["ROLE_WORKER"]));
        assert!(!profile.has_any_role(&[]));
    }
}
