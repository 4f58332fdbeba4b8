//! Login form

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use send_wrapper::SendWrapper;

use clinic_core::error::FormError;
use clinic_core::validation::{FieldErrors, LoginForm};

use crate::context::use_app;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = SendWrapper::new(use_navigate());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let field_errors = RwSignal::new(FieldErrors::default());
    let form_error = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        form_error.set(None);
        field_errors.set(FieldErrors::default());
        submitting.set(true);

        let ctx = ctx.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match ctx.auth.login(&form).await {
                Ok(session) => {
                    ctx.apply_session(&session);
                    ctx.notify_success(format!("Welcome back, {}!", session.user.name));
                    let target = ctx
                        .guard
                        .take_resume_target()
                        .unwrap_or_else(|| "/dashboard".to_string());
                    navigate(&target, Default::default());
                }
                Err(FormError::Invalid(errors)) => field_errors.set(errors),
                Err(FormError::Api(error)) => {
                    form_error.set(Some(error.auth_message().to_string()));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="card form-card">
            <h2>"Login"</h2>
            {move || form_error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            <form on:submit=on_submit>
                <div class="form-field">
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        prop:value=email
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldError errors=field_errors field="email" />
                </div>
                <div class="form-field">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type=move || if show_password.get() { "text" } else { "password" }
                        prop:value=password
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        type="button"
                        class="btn-link"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || if show_password.get() { "Hide password" } else { "Show password" }}
                    </button>
                    <FieldError errors=field_errors field="password" />
                </div>
                <button class="btn" type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
            <p class="muted">
                "No account yet? " <a href="/signup">"Sign up"</a>
            </p>
        </section>
    }
}

/// Inline validation message for one form field
#[component]
pub fn FieldError(errors: RwSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors
            .with(|e| e.get(field).map(str::to_string))
            .map(|msg| view! { <div class="field-error">{msg}</div> })
    }
}
