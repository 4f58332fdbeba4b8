//! Public landing page

use leptos::prelude::*;

use clinic_core::catalog;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"Maralit Dental Clinic"</h1>
            <p class="muted">
                "Quality dental care for the whole family. Book your next visit online."
            </p>
            <a class="btn" href="/signup">"Book an appointment"</a>
        </section>
        <section>
            <h2>"Our Services"</h2>
            <div class="services-grid">
                {catalog::SERVICES
                    .iter()
                    .map(|service| {
                        view! {
                            <div class="service-card">
                                <h3>{service.name}</h3>
                                <p class="muted">{service.duration}</p>
                                <p class="price">{service.price}</p>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}
