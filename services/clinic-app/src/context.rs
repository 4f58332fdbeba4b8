//! Application-wide state wiring
//!
//! One [`AppContext`] is built at mount and provided through Leptos
//! context. The core clients are `Rc`-based and single-threaded, which
//! matches the browser; `SendWrapper` satisfies the context store's
//! `Send + Sync` bound without pretending otherwise.

use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use send_wrapper::SendWrapper;

use clinic_core::api::ApiClient;
use clinic_core::appointments::AppointmentsClient;
use clinic_core::auth::AuthClient;
use clinic_core::guard::RouteGuard;
use clinic_core::http::HttpTransport;
use clinic_core::session::{Session, SessionStorage, SessionStore, SessionUser};

use crate::storage::LocalStorage;
use crate::transport::FetchTransport;

/// API origin baked in at build time; same-origin `/api` by default
pub fn api_base() -> &'static str {
    option_env!("CLINIC_API_URL").unwrap_or("/api")
}

const TOAST_DISMISS: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: usize,
    pub kind: ToastKind,
    pub message: String,
}

/// Shared clients plus the reactive mirrors the UI renders from
#[derive(Clone)]
pub struct AppContext {
    pub session: Rc<SessionStore>,
    pub api: Rc<ApiClient>,
    pub auth: Rc<AuthClient>,
    pub appointments: Rc<AppointmentsClient>,
    pub guard: Rc<RouteGuard>,
    /// Reactive view of the session identity; the store itself is not
    /// reactive, so login/logout keep this in sync
    pub user: RwSignal<Option<SessionUser>>,
    pub toasts: RwSignal<Vec<Toast>>,
}

impl AppContext {
    pub fn new() -> Self {
        let session = Rc::new(SessionStore::new(
            Rc::new(LocalStorage) as Rc<dyn SessionStorage>
        ));
        session.restore();

        let api = Rc::new(ApiClient::new(
            api_base(),
            Rc::new(FetchTransport) as Rc<dyn HttpTransport>,
            Rc::clone(&session),
        ));
        let auth = Rc::new(AuthClient::new(Rc::clone(&api), Rc::clone(&session)));
        let appointments = Rc::new(AppointmentsClient::new(Rc::clone(&api)));
        let guard = Rc::new(RouteGuard::new(Rc::clone(&session)));
        let user = RwSignal::new(session.user());

        Self {
            session,
            api,
            auth,
            appointments,
            guard,
            user,
            toasts: RwSignal::new(Vec::new()),
        }
    }

    pub fn provide(self) {
        provide_context(SendWrapper::new(self));
    }

    /// Mirror a freshly established session into the reactive state
    pub fn apply_session(&self, session: &Session) {
        self.user.set(Some(session.user.clone()));
    }

    pub fn logout(&self) {
        self.session.logout();
        self.user.set(None);
    }

    /// Called from the 401 hook after the client tore the session down
    pub fn clear_user(&self) {
        self.user.set(None);
    }

    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let toasts = self.toasts;
        let id = toasts.with_untracked(|list| list.last().map_or(0, |t| t.id + 1));
        toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                message: message.into(),
            });
        });
        set_timeout(
            move || toasts.update(|list| list.retain(|t| t.id != id)),
            TOAST_DISMISS,
        );
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message);
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notify(ToastKind::Error, message);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Grab the [`AppContext`] provided at the root. Kept inside its
/// `SendWrapper` so view closures and event handlers can capture it
/// despite the `Send` bounds on rendered closures; the browser is
/// single-threaded, so the wrapper never trips.
pub fn use_app() -> SendWrapper<AppContext> {
    expect_context::<SendWrapper<AppContext>>()
}
