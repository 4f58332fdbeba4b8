//! Route access wrapper

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use clinic_core::guard::{RouteAccess, RouteDecision};

use crate::context::use_app;

/// Wraps a routed page with an access check. When the check denies
/// access, navigation is scheduled for the next frame and a short
/// placeholder renders in the meantime.
#[component]
pub fn Guarded(access: RouteAccess, children: Children) -> impl IntoView {
    let ctx = use_app();
    let navigate = use_navigate();
    let path = use_location().pathname.get_untracked();

    match ctx.guard.check(access, &path) {
        RouteDecision::Allow => children(),
        RouteDecision::RedirectToLogin => {
            request_animation_frame(move || navigate("/login", NavigateOptions::default()));
            view! { <p class="muted">"Redirecting to login..."</p> }.into_any()
        }
        RouteDecision::RedirectToDashboard => {
            request_animation_frame(move || navigate("/dashboard", NavigateOptions::default()));
            view! { <p class="muted">"Redirecting..."</p> }.into_any()
        }
    }
}
