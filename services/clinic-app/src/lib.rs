//! Maralit Dental Clinic - Leptos browser client
//!
//! Client-side rendered booking portal. All domain logic lives in
//! `clinic-core`; this crate contributes the browser bindings (fetch,
//! localStorage) and the reactive UI.

pub mod app;
pub mod components;
pub mod context;
pub mod storage;
pub mod transport;

pub use app::App;
