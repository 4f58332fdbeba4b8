//! Dashboard: greeting and upcoming appointments

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

use clinic_core::appointments::{Appointment, AppointmentStatus};

use crate::components::status_badge::StatusBadge;
use crate::context::use_app;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app();
    let user = ctx.user;

    let list = RwSignal::new(Vec::<Appointment>::new());
    let loading = RwSignal::new(true);
    let load_error = RwSignal::new(Option::<String>::None);

    {
        let ctx = ctx.clone();
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

    // Soonest upcoming appointments, skipping cancelled ones
    let upcoming = move || {
        let today = Local::now().date_naive();
        let mut items: Vec<Appointment> = list
            .get()
            .into_iter()
            .filter(|a| {
                a.status != AppointmentStatus::Cancelled
                    && a.date_naive().is_some_and(|d| d >= today)
            })
            .collect();
        items.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
        items.truncate(3);
        items
    };

    view! {
        <section>
            <h2>
                {move || match user.get() {
                    Some(identity) => format!("Welcome back, {}!", identity.name),
                    None => "Welcome!".to_string(),
                }}
            </h2>
            {move || load_error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            <div class="card">
                <h3>"Upcoming appointments"</h3>
                {move || {
                    if loading.get() {
                        view! { <p class="muted">"Loading..."</p> }.into_any()
                    } else {
                        let items = upcoming();
                        if items.is_empty() {
                            view! {
                                <p class="muted">
                                    "Nothing scheduled. "
                                    <a href="/appointments">"Book an appointment"</a>
                                </p>
                            }
                            .into_any()
                        } else {
                            view! {
                                <ul>
                                    {items
                                        .into_iter()
                                        .map(|a| {
                                            view! {
                                                <li>
                                                    {format!(
                                                        "{} on {} at {} with {} ",
                                                        a.service_name,
                                                        a.date.chars().take(10).collect::<String>(),
                                                        a.time,
                                                        a.doctor,
                                                    )}
                                                    <StatusBadge status=a.status />
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </ul>
                            }
                            .into_any()
                        }
                    }
                }}
            </div>
            <p>
                <a class="btn" href="/appointments">"Manage appointments"</a>
                " "
                <a class="btn btn-secondary" href="/">"Browse services"</a>
            </p>
        </section>
    }
}
