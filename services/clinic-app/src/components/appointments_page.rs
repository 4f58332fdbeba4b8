//! Appointment list, stats, and lifecycle actions

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

use clinic_core::appointments::{self, Appointment, AppointmentStats};

use crate::components::appointment_form::AppointmentForm;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::status_badge::StatusBadge;
use crate::context::use_app;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormState {
    Hidden,
    New,
    Edit(Appointment),
}

#[component]
pub fn AppointmentsPage() -> impl IntoView {
    let ctx = use_app();

    let list = RwSignal::new(Vec::<Appointment>::new());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(Option::<String>::None);
    let form_state = RwSignal::new(FormState::Hidden);
    let pending_cancel = RwSignal::new(Option::<String>::None);
    let details = RwSignal::new(Option::<Appointment>::None);

    let stats = move || AppointmentStats::compute(&list.get(), Local::now().date_naive());

    let reload = {
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            loading.set(true);
            load_error.set(None);
            spawn_local(async move {
                match ctx.appointments.list().await {
                    Ok(items) => list.set(items),
                    Err(error) => {
                        load_error.set(Some(error.user_message(
                            "Could not load your appointments. Please try again.",
                        )));
                    }
                }
                loading.set(false);
            });
        }
    };
    reload();

    let on_saved = {
        let reload = reload.clone();
        Callback::new(move |saved: Appointment| {
            if saved.id.is_empty() {
                // The server response did not carry the record; refetch
                reload();
                return;
            }
            let was_edit =
                form_state.with_untracked(|state| matches!(state, FormState::Edit(_)));
            list.update(|items| {
                if was_edit {
                    appointments::merge_updated(items, &saved.id, &saved);
                } else {
                    items.push(saved);
                }
            });
        })
    };
    let on_close = Callback::new(move |()| form_state.set(FormState::Hidden));

    let on_confirm_cancel = {
        let ctx = ctx.clone();
        Callback::new(move |()| {
            let Some(id) = pending_cancel.get_untracked() else {
                return;
            };
            pending_cancel.set(None);
            let ctx = ctx.clone();
            spawn_local(async move {
                match ctx.appointments.cancel(&id).await {
                    Ok(()) => {
                        list.update(|items| {
                            appointments::remove_by_id(items, &id);
                        });
                        ctx.notify_success("Your appointment has been cancelled.");
                    }
                    Err(error) => {
                        ctx.notify_error(error.user_message(
                            "Could not cancel the appointment. Please try again.",
                        ));
                    }
                }
            });
        })
    };
    let on_dismiss_cancel = Callback::new(move |()| pending_cancel.set(None));

    view! {
        <section>
            <h2>"My Appointments"</h2>
            <div class="stats-grid">
                <StatCard label="Total" value=Signal::derive(move || stats().total) />
                <StatCard label="Pending" value=Signal::derive(move || stats().pending) />
                <StatCard label="Confirmed" value=Signal::derive(move || stats().confirmed) />
                <StatCard label="Completed" value=Signal::derive(move || stats().completed) />
                <StatCard label="This month" value=Signal::derive(move || stats().this_month) />
            </div>
            <p>
                <button class="btn" on:click=move |_| form_state.set(FormState::New)>
                    "Book new appointment"
                </button>
            </p>
            {move || match form_state.get() {
                FormState::Hidden => ().into_any(),
                FormState::New => view! {
                    <AppointmentForm editing=None on_saved=on_saved on_close=on_close />
                }
                .into_any(),
                FormState::Edit(appointment) => view! {
                    <AppointmentForm
                        editing=Some(appointment)
                        on_saved=on_saved
                        on_close=on_close
                    />
                }
                .into_any(),
            }}
            {move || load_error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            {move || {
                if loading.get() {
                    view! { <p class="muted">"Loading appointments..."</p> }.into_any()
                } else if list.with(Vec::is_empty) {
                    view! { <p class="muted">"You have no appointments yet."</p> }.into_any()
                } else {
                    view! {
                        <table class="appointment-table">
                            <thead>
                                <tr>
                                    <th>"Service"</th>
                                    <th>"Date"</th>
                                    <th>"Time"</th>
                                    <th>"Doctor"</th>
                                    <th>"Location"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || list.get()
                                    key=|appointment| appointment.id.clone()
                                    children=move |appointment| {
                                        view! {
                                            <AppointmentRow
                                                appointment=appointment
                                                form_state=form_state
                                                pending_cancel=pending_cancel
                                                details=details
                                            />
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    }
                    .into_any()
                }
            }}
            {move || details.get().map(|appointment| view! { <DetailsPanel appointment=appointment details=details /> })}
            {move || {
                pending_cancel.get().map(|_| view! {
                    <ConfirmDialog
                        message="Cancel this appointment? This cannot be undone."
                        confirm_label="Cancel appointment"
                        on_confirm=on_confirm_cancel
                        on_dismiss=on_dismiss_cancel
                    />
                })
            }}
        </section>
    }
}

/// One table row; edit and cancel are only offered while the
/// appointment is still pending.
#[component]
fn AppointmentRow(
    appointment: Appointment,
    form_state: RwSignal<FormState>,
    pending_cancel: RwSignal<Option<String>>,
    details: RwSignal<Option<Appointment>>,
) -> impl IntoView {
    let pending_actions = appointment.is_pending().then(|| {
        let for_edit = appointment.clone();
        let id = appointment.id.clone();
        view! {
            " "
            <button
                class="btn-link"
                on:click=move |_| form_state.set(FormState::Edit(for_edit.clone()))
            >
                "Edit"
            </button>
            " "
            <button class="btn-link" on:click=move |_| pending_cancel.set(Some(id.clone()))>
                "Cancel"
            </button>
        }
    });
    let for_details = appointment.clone();

    view! {
        <tr>
            <td>{appointment.service_name.clone()}</td>
            <td>{appointment.date.chars().take(10).collect::<String>()}</td>
            <td>{appointment.time.clone()}</td>
            <td>{appointment.doctor.clone()}</td>
            <td>{appointment.location.clone()}</td>
            <td><StatusBadge status=appointment.status /></td>
            <td>
                <button
                    class="btn-link"
                    on:click=move |_| details.set(Some(for_details.clone()))
                >
                    "Details"
                </button>
                {pending_actions}
            </td>
        </tr>
    }
}

/// Read-only panel with the full record, notes included
#[component]
fn DetailsPanel(appointment: Appointment, details: RwSignal<Option<Appointment>>) -> impl IntoView {
    let notes = if appointment.description.is_empty() {
        "No notes".to_string()
    } else {
        appointment.description.clone()
    };

    view! {
        <div class="card">
            <h3>"Appointment details"</h3>
            <p><strong>"Service: "</strong>{appointment.service_name.clone()}</p>
            <p>
                <strong>"When: "</strong>
                {format!(
                    "{} at {}",
                    appointment.date.chars().take(10).collect::<String>(),
                    appointment.time,
                )}
            </p>
            <p><strong>"Doctor: "</strong>{appointment.doctor.clone()}</p>
            <p><strong>"Location: "</strong>{appointment.location.clone()}</p>
            <p><strong>"Status: "</strong><StatusBadge status=appointment.status /></p>
            <p><strong>"Notes: "</strong>{notes}</p>
            <button class="btn btn-secondary" on:click=move |_| details.set(None)>
                "Close"
            </button>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="value">{move || value.get()}</div>
            <div class="label">{label}</div>
        </div>
    }
}
