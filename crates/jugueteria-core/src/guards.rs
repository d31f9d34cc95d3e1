// Navigation guards
// Pure decision functions over the latest committed session snapshot. They
// never await an in-flight authentication: a login still in flight is
// observed as unauthenticated.

use crate::routes::NavTarget;
use crate::session::SessionManager;

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(NavTarget),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Allow iff a credential is present. Roles are never consulted here.
pub fn authentication_guard(session: &SessionManager) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(NavTarget::Login)
    }
}

/// Allow iff the current session holds at least one of `required`.
///
/// Unauthenticated callers are sent to login. Authenticated callers whose
/// roles do not intersect the requirement are sent home - re-authenticating
/// would not help them.
pub fn role_guard(session: &SessionManager, required: &[&str]) -> GuardDecision {
    if !session.is_authenticated() {
        return GuardDecision::Redirect(NavTarget::Login);
    }
    match session.current_value() {
        Some(profile) if profile.has_any_role(required) => GuardDecision::Allow,
        Some(_) => GuardDecision::Redirect(NavTarget::Home),
        // Token present but no decoded profile: same as unauthenticated
        None => GuardDecision::Redirect(NavTarget::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::test_tokens::{future_exp, mint};
    use crate::token_store::MemoryTokenStore;

    fn session_with_roles(roles: &[&str]) -> SessionManager {
        let (session, _redirects) = SessionManager::new(Box::new(MemoryTokenStore::new()));
        session
            .establish(&mint("a@b.com", "Ana", roles, future_exp()))
            .unwrap();
        session
    }

    fn anonymous_session() -> SessionManager {
        let (session, _redirects) = SessionManager::new(Box::new(MemoryTokenStore::new()));
        session
    }

    #[test]
    fn test_authentication_guard_allows_with_token() {
        let session = session_with_roles(&[]);
        assert_eq!(authentication_guard(&session), GuardDecision::Allow);
    }

    #[test]
    fn test_authentication_guard_redirects_to_login() {
        let session = anonymous_session();
        assert_eq!(
            authentication_guard(&session),
            GuardDecision::Redirect(NavTarget::Login)
        );
    }

    #[test]
    fn test_authentication_guard_ignores_roles() {
        // A session with no roles at all still passes the auth guard
        let session = session_with_roles(&[]);
        assert!(authentication_guard(&session).is_allowed());
    }

    #[test]
    fn test_role_guard_denies_wrong_role() {
        let session = session_with_roles(&["B"]);
        assert_eq!(
            role_guard(&session, &["A"]),
            GuardDecision::Redirect(NavTarget::Home)
        );
    }

    #[test]
    fn test_role_guard_allows_on_intersection() {
        let session = session_with_roles(&["A", "B"]);
        assert_eq!(role_guard(&session, &["A"]), GuardDecision::Allow);
    }

    #[test]
    fn test_role_guard_unauthenticated_goes_to_login() {
        let session = anonymous_session();
        // Login, not home: there is no identity to judge roles for
        assert_eq!(
            role_guard(&session, &["A"]),
            GuardDecision::Redirect(NavTarget::Login)
        );
    }

    #[test]
    fn test_role_guard_empty_roles_denied() {
        let session = session_with_roles(&[]);
        assert_eq!(
            role_guard(&session, &["A"]),
            GuardDecision::Redirect(NavTarget::Home)
        );
    }
}
