//! Booking and edit form
//!
//! One form serves both flows: a `New` state books, an `Edit` state
//! updates the still-pending appointment it was opened with.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

use clinic_core::appointments::Appointment;
use clinic_core::catalog;
use clinic_core::error::FormError;
use clinic_core::validation::{min_booking_date, BookingForm, FieldErrors};

use crate::components::login_page::FieldError;
use crate::context::use_app;

#[component]
pub fn AppointmentForm(
    /// `Some` with the appointment being edited, `None` for a new booking
    editing: Option<Appointment>,
    on_saved: Callback<Appointment>,
    on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app();

    let editing_id = editing.as_ref().map(|a| a.id.clone());
    let initial = editing.as_ref();

    let service = RwSignal::new(
        initial
            .and_then(|a| catalog::find_service_by_name(&a.service_name))
            .map(|s| s.id.to_string())
            .unwrap_or_default(),
    );
    let date = RwSignal::new(
        initial
            .map(|a| a.date.chars().take(10).collect::<String>())
            .unwrap_or_default(),
    );
    let time = RwSignal::new(initial.map(|a| a.time.clone()).unwrap_or_default());
    let doctor = RwSignal::new(initial.map(|a| a.doctor.clone()).unwrap_or_default());
    let location = RwSignal::new(initial.map(|a| a.location.clone()).unwrap_or_default());
    let description = RwSignal::new(initial.map(|a| a.description.clone()).unwrap_or_default());

    let field_errors = RwSignal::new(FieldErrors::default());
    let form_error = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);

    let min_date = min_booking_date(Local::now().date_naive()).to_string();
    let heading = if editing_id.is_some() {
        "Edit appointment"
    } else {
        "Book an appointment"
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let form = BookingForm {
            service: service.get_untracked(),
            date: date.get_untracked(),
            time: time.get_untracked(),
            doctor: doctor.get_untracked(),
            location: location.get_untracked(),
            description: description.get_untracked(),
        };
        form_error.set(None);
        field_errors.set(FieldErrors::default());
        submitting.set(true);

        let ctx = ctx.clone();
        let editing_id = editing_id.clone();
        spawn_local(async move {
            let today = Local::now().date_naive();
            let outcome = match &editing_id {
                Some(id) => ctx.appointments.update(id, &form, today).await,
                None => ctx.appointments.book(&form, today).await,
            };
            match outcome {
                Ok(appointment) => {
                    if editing_id.is_some() {
                        ctx.notify_success("Your appointment has been updated.");
                    } else {
                        ctx.notify_success("Your appointment has been booked.");
                    }
                    on_saved.run(appointment);
                    on_close.run(());
                }
                Err(FormError::Invalid(errors)) => field_errors.set(errors),
                Err(FormError::Api(error)) => {
                    form_error.set(Some(error.user_message(
                        "Could not save the appointment. Please try again.",
                    )));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <section class="card">
            <h3>{heading}</h3>
            {move || form_error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            <form on:submit=on_submit>
                <div class="form-field">
                    <label for="service">"Service"</label>
                    <select
                        id="service"
                        prop:value=service
                        on:change=move |ev| service.set(event_target_value(&ev))
                    >
                        <option value="">"Select a service"</option>
                        {catalog::SERVICES
                            .iter()
                            .map(|entry| {
                                view! {
                                    <option value=entry.id>
                                        {format!("{} ({})", entry.name, entry.price)}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </select>
                    <FieldError errors=field_errors field="service" />
                </div>
                <div class="form-field">
                    <label for="date">"Date"</label>
                    <input
                        id="date"
                        type="date"
                        min=min_date
                        prop:value=date
                        on:input=move |ev| date.set(event_target_value(&ev))
                    />
                    <FieldError errors=field_errors field="date" />
                </div>
                <div class="form-field">
                    <label for="time">"Time"</label>
                    <select
                        id="time"
                        prop:value=time
                        on:change=move |ev| time.set(event_target_value(&ev))
                    >
                        <option value="">"Select a time"</option>
                        {catalog::TIME_SLOTS
                            .iter()
                            .map(|slot| view! { <option value=*slot>{*slot}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                    <FieldError errors=field_errors field="time" />
                </div>
                <div class="form-field">
                    <label for="doctor">"Doctor"</label>
                    <select
                        id="doctor"
                        prop:value=doctor
                        on:change=move |ev| doctor.set(event_target_value(&ev))
                    >
                        <option value="">"Select a doctor"</option>
                        {catalog::DOCTORS
                            .iter()
                            .map(|name| view! { <option value=*name>{*name}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                    <FieldError errors=field_errors field="doctor" />
                </div>
                <div class="form-field">
                    <label for="location">"Location"</label>
                    <select
                        id="location"
                        prop:value=location
                        on:change=move |ev| location.set(event_target_value(&ev))
                    >
                        <option value="">"Select a location"</option>
                        {catalog::LOCATIONS
                            .iter()
                            .map(|name| view! { <option value=*name>{*name}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                    <FieldError errors=field_errors field="location" />
                </div>
                <div class="form-field">
                    <label for="description">"Notes (optional)"</label>
                    <textarea
                        id="description"
                        prop:value=description
                        on:input=move |ev| description.set(event_target_value(&ev))
                    />
                </div>
                <button class="btn" type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Saving..." } else { "Save appointment" }}
                </button>
                " "
                <button class="btn btn-secondary" type="button" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
            </form>
        </section>
    }
}
