//! Registration form

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use send_wrapper::SendWrapper;

use clinic_core::error::FormError;
use clinic_core::validation::{FieldErrors, SignupForm};

use crate::components::login_page::FieldError;
use crate::context::use_app;

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_app();
    let navigate = SendWrapper::new(use_navigate());

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let mobile = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let field_errors = RwSignal::new(FieldErrors::default());
    let form_error = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let form = SignupForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            mobile: mobile.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        form_error.set(None);
        field_errors.set(FieldErrors::default());
        submitting.set(true);

        let ctx = ctx.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match ctx.auth.signup(&form).await {
                Ok(session) => {
                    ctx.apply_session(&session);
                    ctx.notify_success("Your account has been created.");
                    navigate("/dashboard", Default::default());
                }
                Err(FormError::Invalid(errors)) => field_errors.set(errors),
                Err(FormError::Api(error)) => {
                    form_error.set(Some(error.user_message(
                        "Could not create your account. Please try again.",
                    )));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="card form-card">
            <h2>"Create an account"</h2>
            {move || form_error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            <form on:submit=on_submit>
                <div class="form-field">
                    <label for="name">"Full name"</label>
                    <input
                        id="name"
                        type="text"
                        prop:value=name
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <FieldError errors=field_errors field="name" />
                </div>
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
                    <label for="mobile">"Mobile number"</label>
                    <input
                        id="mobile"
                        type="tel"
                        prop:value=mobile
                        on:input=move |ev| mobile.set(event_target_value(&ev))
                    />
                    <FieldError errors=field_errors field="mobile" />
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
                <div class="form-field">
                    <label for="confirm-password">"Confirm password"</label>
                    <input
                        id="confirm-password"
                        type="password"
                        prop:value=confirm_password
                        on:input=move |ev| confirm_password.set(event_target_value(&ev))
                    />
                    <FieldError errors=field_errors field="confirm_password" />
                </div>
                <button class="btn" type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating account..." } else { "Sign up" }}
                </button>
            </form>
            <p class="muted">
                "Already registered? " <a href="/login">"Login"</a>
            </p>
        </section>
    }
}
