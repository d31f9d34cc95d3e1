// Route surface and navigation
// Routes are static metadata: a path pattern plus the access level required
// to enter it. Matching ignores query strings and treats `:name` segments
// as single-segment wildcards. Anything unmatched falls through to home.

use std::sync::Arc;

use crate::guards::{authentication_guard, role_guard, GuardDecision};
use crate::session::SessionManager;

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_WORKER: &str = "ROLE_WORKER";
pub const ROLE_CLIENT: &str = "ROLE_CLIENT";

const ADMIN_ONLY: &[&str] = &[ROLE_ADMIN];
const STAFF: &[&str] = &[ROLE_ADMIN, ROLE_WORKER];

/// Fixed targets used by forced redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Login,
    Home,
}

impl NavTarget {
    pub fn path(&self) -> &'static str {
        match self {
            NavTarget::Login => "/login",
            NavTarget::Home => "/",
        }
    }
}

/// Access requirement attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Requires only a present credential.
    Authenticated,
    /// Requires at least one of the listed roles.
    AnyRole(&'static [&'static str]),
}

/// Static per-route metadata.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub access: RouteAccess,
    /// Forwarding target for subtree entry points, evaluated after the guard.
    pub redirect_to: Option<&'static str>,
}

const fn route(pattern: &'static str, access: RouteAccess) -> RouteDef {
    RouteDef {
        pattern,
        access,
        redirect_to: None,
    }
}

/// The complete route surface of the client.
pub const ROUTES: &[RouteDef] = &[
    // Auth pages
    route("/login", RouteAccess::Public),
    route("/register", RouteAccess::Public),
    route("/password-recovery", RouteAccess::Public),
    route("/reset-password", RouteAccess::Public),
    // Storefront
    route("/", RouteAccess::Public),
    route("/products", RouteAccess::Public),
    route("/product/:id", RouteAccess::Public),
    route("/profile", RouteAccess::Authenticated),
    route("/my-orders", RouteAccess::Authenticated),
    route("/cart", RouteAccess::Authenticated),
    route("/checkout-summary", RouteAccess::Authenticated),
    route("/payment-success", RouteAccess::Authenticated),
    route("/payment-failure", RouteAccess::Authenticated),
    // Back office: admin subtree
    route("/admin", RouteAccess::AnyRole(ADMIN_ONLY)),
    route("/admin/users", RouteAccess::AnyRole(ADMIN_ONLY)),
    route("/admin/inventory", RouteAccess::AnyRole(ADMIN_ONLY)),
    route("/admin/orders", RouteAccess::AnyRole(ADMIN_ONLY)),
    route("/admin/reports", RouteAccess::AnyRole(ADMIN_ONLY)),
    // Back office: worker subtree, also open to admins
    RouteDef {
        pattern: "/worker",
        access: RouteAccess::AnyRole(STAFF),
        redirect_to: Some("/worker/orders"),
    },
    route("/worker/orders", RouteAccess::AnyRole(STAFF)),
    route("/worker/pos", RouteAccess::AnyRole(STAFF)),
    route("/worker/returns", RouteAccess::AnyRole(STAFF)),
];

/// Result of attempting a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Navigation committed to the matched route.
    Allowed { route: &'static str },
    /// Navigation denied or rewritten; the caller lands here instead.
    Redirected { to: &'static str },
}

impl Navigation {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Navigation::Allowed { .. })
    }
}

/// Evaluates navigations against the route table and the session snapshot.
pub struct Router {
    session: Arc<SessionManager>,
    routes: &'static [RouteDef],
}

impl Router {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            session,
            routes: ROUTES,
        }
    }

    /// Resolve `path` and run the matched route's guard synchronously.
    pub fn navigate(&self, path: &str) -> Navigation {
        // Query strings (e.g. reset-password?token=...) do not take part in
        // matching
        let path = path.split('?').next().unwrap_or(path);

        let Some(matched) = self.routes.iter().find(|r| matches(r.pattern, path)) else {
            // Wildcard: anything unknown lands on home
            return Navigation::Redirected {
                to: NavTarget::Home.path(),
            };
        };

        let decision = match matched.access {
            RouteAccess::Public => GuardDecision::Allow,
            RouteAccess::Authenticated => authentication_guard(&self.session),
            RouteAccess::AnyRole(required) => role_guard(&self.session, required),
        };

        match decision {
            GuardDecision::Allow => match matched.redirect_to {
                Some(target) => self.navigate(target),
                None => Navigation::Allowed {
                    route: matched.pattern,
                },
            },
            GuardDecision::Redirect(target) => Navigation::Redirected { to: target.path() },
        }
    }
}

fn matches(pattern: &str, path: &str) -> bool {
    let pattern_segments = segments(pattern);
    let path_segments = segments(path);
    pattern_segments.len() == path_segments.len()
        && pattern_segments
            .iter()
            .zip(&path_segments)
            .all(|(p, s)| p.starts_with(':') || p == s)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::test_tokens::{future_exp, mint};
    use crate::token_store::MemoryTokenStore;

    fn router_with_roles(roles: &[&str]) -> Router {
        let (session, _redirects) = SessionManager::new(Box::new(MemoryTokenStore::new()));
        session
            .establish(&mint("a@b.com", "Ana", roles, future_exp()))
            .unwrap();
        Router::new(Arc::new(session))
    }

    fn anonymous_router() -> Router {
        let (session, _redirects) = SessionManager::new(Box::new(MemoryTokenStore::new()));
        Router::new(Arc::new(session))
    }

    #[test]
    fn test_pattern_matching() {
        assert!(matches("/product/:id", "/product/42"));
        assert!(matches("/", "/"));
        assert!(!matches("/product/:id", "/product"));
        assert!(!matches("/product/:id", "/product/42/reviews"));
        assert!(!matches("/products", "/product"));
    }

    #[test]
    fn test_public_routes_open_to_anyone() {
        let router = anonymous_router();
        assert!(router.navigate("/").is_allowed());
        assert!(router.navigate("/products").is_allowed());
        assert!(router.navigate("/product/42").is_allowed());
        assert!(router.navigate("/login").is_allowed());
    }

    #[test]
    fn test_query_string_is_ignored() {
        let router = anonymous_router();
        assert_eq!(
            router.navigate("/reset-password?token=abc123"),
            Navigation::Allowed {
                route: "/reset-password"
            }
        );
    }

    #[test]
    fn test_authenticated_routes_redirect_anonymous_to_login() {
        let router = anonymous_router();
        for path in ["/cart", "/my-orders", "/profile", "/checkout-summary"] {
            assert_eq!(
                router.navigate(path),
                Navigation::Redirected { to: "/login" },
                "route {path}"
            );
        }
    }

    #[test]
    fn test_admin_subtree_requires_admin_role() {
        let admin = router_with_roles(&[ROLE_ADMIN]);
        assert!(admin.navigate("/admin").is_allowed());
        assert!(admin.navigate("/admin/reports").is_allowed());

        let client = router_with_roles(&[ROLE_CLIENT]);
        assert_eq!(
            client.navigate("/admin/users"),
            Navigation::Redirected { to: "/" }
        );

        let anonymous = anonymous_router();
        assert_eq!(
            anonymous.navigate("/admin"),
            Navigation::Redirected { to: "/login" }
        );
    }

    #[test]
    fn test_worker_subtree_open_to_admin_and_worker() {
        // ROLE_ADMIN is in the required set for /worker, so admins pass
        let admin = router_with_roles(&[ROLE_ADMIN]);
        assert!(admin.navigate("/worker/orders").is_allowed());

        let worker = router_with_roles(&[ROLE_WORKER]);
        assert!(worker.navigate("/worker/pos").is_allowed());

        let client = router_with_roles(&[ROLE_CLIENT]);
        assert_eq!(
            client.navigate("/worker/returns"),
            Navigation::Redirected { to: "/" }
        );
    }

    #[test]
    fn test_worker_root_forwards_to_orders() {
        let worker = router_with_roles(&[ROLE_WORKER]);
        assert_eq!(
            worker.navigate("/worker"),
            Navigation::Allowed {
                route: "/worker/orders"
            }
        );
    }

    #[test]
    fn test_unknown_path_falls_through_to_home() {
        let router = anonymous_router();
        assert_eq!(
            router.navigate("/no-such-page"),
            Navigation::Redirected { to: "/" }
        );
        assert_eq!(
            router.navigate("/admin/no-such-page"),
            Navigation::Redirected { to: "/" }
        );
    }

    #[test]
    fn test_admin_navigates_both_back_office_subtrees() {
        // Full scenario: an admin session can enter /admin and /worker alike
        let router = router_with_roles(&[ROLE_ADMIN]);
        assert!(router.navigate("/admin").is_allowed());
        assert!(router.navigate("/worker").is_allowed());
    }
}
