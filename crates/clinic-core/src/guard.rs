//! Route access decisions
//!
//! A pure decision over session state plus the requested path; no
//! network calls. A denied protected path is recorded so login can
//! resume there afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use crate::session::SessionStore;

/// What a route declares about who may visit it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable by anyone
    Public,
    /// Authenticated users only
    RequiresAuth,
    /// Login/signup: authenticated users are bounced to the app
    GuestOnly,
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

/// Pure decision function over access requirement and session state
pub fn evaluate(access: RouteAccess, authenticated: bool) -> RouteDecision {
    match (access, authenticated) {
        (RouteAccess::RequiresAuth, false) => RouteDecision::RedirectToLogin,
        (RouteAccess::GuestOnly, true) => RouteDecision::RedirectToDashboard,
        _ => RouteDecision::Allow,
    }
}

/// Guard bound to the session store, tracking the resume target
pub struct RouteGuard {
    session: Rc<SessionStore>,
    resume_target: RefCell<Option<String>>,
}

impl RouteGuard {
    pub fn new(session: Rc<SessionStore>) -> Self {
        Self {
            session,
            resume_target: RefCell::new(None),
        }
    }

    /// Decide whether `path` is reachable right now
    pub fn check(&self, access: RouteAccess, path: &str) -> RouteDecision {
        let decision = evaluate(access, self.session.is_authenticated());
        if decision == RouteDecision::RedirectToLogin {
            tracing::debug!("Blocking {} until login", path);
            *self.resume_target.borrow_mut() = Some(path.to_string());
        }
        decision
    }

    /// The path the user originally asked for, cleared on read
    pub fn take_resume_target(&self) -> Option<String> {
        self.resume_target.borrow_mut().take()
    }
}
