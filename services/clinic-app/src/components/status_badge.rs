//! Appointment status badge

use leptos::prelude::*;

use clinic_core::appointments::AppointmentStatus;

/// Colored badge for an appointment status
#[component]
pub fn StatusBadge(status: AppointmentStatus) -> impl IntoView {
    let (color, bg) = match status {
        AppointmentStatus::Pending => ("#856404", "#fff3cd"),
        AppointmentStatus::Confirmed => ("#155724", "#d4edda"),
        AppointmentStatus::Completed => ("#004085", "#cce5ff"),
        AppointmentStatus::Cancelled => ("#721c24", "#f8d7da"),
        AppointmentStatus::Unknown => ("#383d41", "#e2e3e5"),
    };

    let style = format!("color: {}; background-color: {};", color, bg);

    view! {
        <span class="badge" style=style>{status.label()}</span>
    }
}
