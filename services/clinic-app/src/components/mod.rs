//! UI components

pub mod appointment_form;
pub mod appointments_page;
pub mod confirm_dialog;
pub mod dashboard_page;
pub mod guard;
pub mod header;
pub mod landing_page;
pub mod login_page;
pub mod signup_page;
pub mod status_badge;
pub mod toast_host;
