//! Root component and routing

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use send_wrapper::SendWrapper;

use clinic_core::guard::RouteAccess;

use crate::components::appointments_page::AppointmentsPage;
use crate::components::dashboard_page::DashboardPage;
use crate::components::guard::Guarded;
use crate::components::header::Header;
use crate::components::landing_page::LandingPage;
use crate::components::login_page::LoginPage;
use crate::components::signup_page::SignupPage;
use crate::components::toast_host::ToastHost;
use crate::context::{use_app, AppContext};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    AppContext::new().provide();

    view! {
        <Router>
            <Shell />
        </Router>
    }
}

/// Everything that needs the router context: the 401 hook navigates,
/// so it can only be wired from in here.
#[component]
fn Shell() -> impl IntoView {
    let ctx = use_app();
    let navigate = SendWrapper::new(leptos_router::hooks::use_navigate());

    {
        let user = ctx.user;
        let navigate = navigate.clone();
        ctx.api.set_unauthorized_hook(move || {
            user.set(None);
            let navigate = navigate.clone();
            request_animation_frame(move || navigate("/login", Default::default()));
        });
    }

    view! {
        <Header />
        <main class="page">
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=LandingPage />
                <Route
                    path=path!("/login")
                    view=|| view! {
                        <Guarded access=RouteAccess::GuestOnly>
                            <LoginPage />
                        </Guarded>
                    }
                />
                <Route
                    path=path!("/signup")
                    view=|| view! {
                        <Guarded access=RouteAccess::GuestOnly>
                            <SignupPage />
                        </Guarded>
                    }
                />
                <Route
                    path=path!("/dashboard")
                    view=|| view! {
                        <Guarded access=RouteAccess::RequiresAuth>
                            <DashboardPage />
                        </Guarded>
                    }
                />
                <Route
                    path=path!("/appointments")
                    view=|| view! {
                        <Guarded access=RouteAccess::RequiresAuth>
                            <AppointmentsPage />
                        </Guarded>
                    }
                />
            </Routes>
        </main>
        <ToastHost />
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <section class="card">
            <h2>"Page not found"</h2>
            <p>
                "The page you are looking for does not exist. "
                <a href="/">"Back to the home page"</a>
            </p>
        </section>
    }
}
