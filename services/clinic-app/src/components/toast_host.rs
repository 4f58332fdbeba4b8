//! Toast notifications

use leptos::prelude::*;

use crate::context::{use_app, ToastKind};

/// Renders the toast queue in a fixed corner; entries expire on their
/// own via the context's dismiss timer.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_app().toasts;

    view! {
        <div class="toast-host">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=|toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    };
                    view! { <div class=class>{toast.message}</div> }
                }
            />
        </div>
    }
}
