//! Modal confirmation dialog

use leptos::prelude::*;

/// Blocking yes/no dialog. Destructive actions (appointment
/// cancellation) must pass through here before any request goes out.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] message: String,
    #[prop(into)] confirm_label: String,
    on_confirm: Callback<()>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_dismiss.run(())>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <p>{message}</p>
                <div class="dialog-actions">
                    <button class="btn btn-secondary" on:click=move |_| on_dismiss.run(())>
                        "Keep it"
                    </button>
                    <button class="btn btn-danger" on:click=move |_| on_confirm.run(())>
                        {confirm_label}
                    </button>
                </div>
            </div>
        </div>
    }
}
