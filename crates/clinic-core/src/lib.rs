//! Clinic booking client core
//!
//! Session handling, API access, form validation, and the appointment
//! lifecycle for the Maralit Dental Clinic front end. Everything here
//! is framework-free and natively testable; the Leptos app in
//! `services/clinic-app` wires these pieces to the browser.

pub mod api;
pub mod appointments;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod guard;
pub mod http;
pub mod session;
pub mod validation;

pub use error::{ApiError, Result};
