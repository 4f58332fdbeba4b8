//! Top navigation bar

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use send_wrapper::SendWrapper;

use crate::context::use_app;

/// Site header; the nav switches between guest links and the
/// authenticated menu as the session changes.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app();
    let user = ctx.user;
    let navigate = SendWrapper::new(use_navigate());

    let on_logout = {
        let ctx = ctx.clone();
        move |_| {
            ctx.logout();
            ctx.notify_success("You have been logged out.");
            navigate("/", Default::default());
        }
    };

    view! {
        <header class="site-header">
            <a href="/" class="brand">"Maralit Dental Clinic"</a>
            <nav>
                {move || match user.get() {
                    Some(identity) => view! {
                        <a href="/dashboard">"Dashboard"</a>
                        <a href="/appointments">"My Appointments"</a>
                        <span class="muted">{identity.name}</span>
                        <button class="btn-link" on:click=on_logout.clone()>"Logout"</button>
                    }
                    .into_any(),
                    None => view! {
                        <a href="/login">"Login"</a>
                        <a class="btn" href="/signup">"Sign up"</a>
                    }
                    .into_any(),
                }}
            </nav>
        </header>
    }
}
