//! Appointment model, lifecycle, and list operations
//!
//! The client only ever originates two transitions: booking (a new
//! `pending` appointment) and cancellation (`pending` removed after a
//! confirmed delete). Everything else - confirmation, completion -
//! arrives from the server on fetch.

use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::ApiClient;
use crate::catalog;
use crate::error::{ApiError, FormError};
use crate::validation::BookingForm;

/// Appointment lifecycle state. Unrecognized server values map to
/// [`AppointmentStatus::Unknown`] instead of failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[default]
    Unknown,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Unknown => "unknown",
        }
    }

    /// Capitalized form for display
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Unknown => "Unknown",
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => AppointmentStatus::Pending,
            "confirmed" => AppointmentStatus::Confirmed,
            "cancelled" => AppointmentStatus::Cancelled,
            "completed" => AppointmentStatus::Completed,
            _ => AppointmentStatus::Unknown,
        }
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single appointment as held by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Backend id; tolerates `_id` and numeric ids
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub doctor: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn is_pending(&self) -> bool {
        self.status == AppointmentStatus::Pending
    }

    /// The calendar date, when the date string parses
    pub fn date_naive(&self) -> Option<NaiveDate> {
        crate::validation::parse_date(&self.date)
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "appointment id must be a string or number, got {}",
            other
        ))),
    }
}

/// Normalize any of the known response envelopes to a plain list.
/// Unrecognized shapes become an empty list; malformed entries are
/// skipped, never failing the whole view.
pub fn normalize_appointments(body: &Value) -> Vec<Appointment> {
    let Some(items) = collection(body) else {
        tracing::debug!("Unrecognized appointments envelope");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(appointment) => Some(appointment),
            Err(error) => {
                tracing::debug!("Skipping malformed appointment: {}", error);
                None
            }
        })
        .collect()
}

fn collection(body: &Value) -> Option<&Vec<Value>> {
    if let Some(items) = body
        .get("data")
        .and_then(|d| d.get("appointments"))
        .and_then(Value::as_array)
    {
        return Some(items);
    }
    if let Some(items) = body.get("data").and_then(Value::as_array) {
        return Some(items);
    }
    if let Some(items) = body.as_array() {
        return Some(items);
    }
    body.get("appointments").and_then(Value::as_array)
}

/// Merge a server-updated appointment into the entry with the same id,
/// in place. Position is preserved and only fields the server actually
/// returned overwrite the local copy. Returns false when no entry
/// matches.
pub fn merge_updated(list: &mut [Appointment], id: &str, updated: &Appointment) -> bool {
    let Some(slot) = list.iter_mut().find(|a| a.id == id) else {
        return false;
    };
    let overlay = |dst: &mut String, src: &str| {
        if !src.is_empty() {
            *dst = src.to_string();
        }
    };
    overlay(&mut slot.date, &updated.date);
    overlay(&mut slot.time, &updated.time);
    overlay(&mut slot.service_name, &updated.service_name);
    overlay(&mut slot.doctor, &updated.doctor);
    overlay(&mut slot.location, &updated.location);
    slot.description = updated.description.clone();
    if updated.status != AppointmentStatus::Unknown {
        slot.status = updated.status;
    }
    true
}

/// Remove the appointment with the given id. Returns true when exactly
/// one entry was removed.
pub fn remove_by_id(list: &mut Vec<Appointment>, id: &str) -> bool {
    match list.iter().position(|a| a.id == id) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

/// Live counts over the current list; never persisted separately
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub this_month: usize,
}

impl AppointmentStats {
    pub fn compute(list: &[Appointment], today: NaiveDate) -> Self {
        let mut stats = Self {
            total: list.len(),
            ..Self::default()
        };
        for appointment in list {
            match appointment.status {
                AppointmentStatus::Pending => stats.pending += 1,
                AppointmentStatus::Confirmed => stats.confirmed += 1,
                AppointmentStatus::Completed => stats.completed += 1,
                _ => {}
            }
            if let Some(date) = appointment.date_naive() {
                if date.month() == today.month() && date.year() == today.year() {
                    stats.this_month += 1;
                }
            }
        }
        stats
    }
}

/// API operations on the authenticated user's appointments
pub struct AppointmentsClient {
    api: Rc<ApiClient>,
}

impl AppointmentsClient {
    pub fn new(api: Rc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch the user's appointments. A missing session token
    /// short-circuits with an authentication error instead of issuing
    /// the request.
    pub async fn list(&self) -> Result<Vec<Appointment>, ApiError> {
        if !self.api.has_session_token() {
            tracing::warn!("Appointment fetch without a session token");
            return Err(ApiError::Unauthorized);
        }
        let body = self.api.get("/appointments").await?;
        Ok(normalize_appointments(&body))
    }

    /// Book a new appointment. The selected service id is mapped to
    /// its display name before submission; new bookings always go out
    /// as `pending`.
    pub async fn book(&self, form: &BookingForm, today: NaiveDate) -> Result<Appointment, FormError> {
        form.validate(today).map_err(FormError::Invalid)?;
        // validate() guarantees the id resolves
        let Some(service) = catalog::find_service(&form.service) else {
            return Err(FormError::Invalid(Default::default()));
        };

        let payload = serde_json::json!({
            "date": form.date,
            "time": form.time,
            "serviceName": service.name,
            "description": form.description,
            "doctor": form.doctor,
            "location": form.location,
            "status": "pending",
        });
        let body = self.api.post("/appointments", payload).await?;
        Ok(parse_appointment(&body)
            .unwrap_or_else(|| appointment_from_form(form, String::new(), service.name)))
    }

    /// Update a still-pending appointment. The caller merges the
    /// result into its local list via [`merge_updated`].
    pub async fn update(
        &self,
        id: &str,
        form: &BookingForm,
        today: NaiveDate,
    ) -> Result<Appointment, FormError> {
        form.validate(today).map_err(FormError::Invalid)?;
        let Some(service) = catalog::find_service(&form.service) else {
            return Err(FormError::Invalid(Default::default()));
        };

        let payload = serde_json::json!({
            "date": form.date,
            "time": form.time,
            "serviceName": service.name,
            "description": form.description,
            "doctor": form.doctor,
            "location": form.location,
        });
        let body = self
            .api
            .put(&format!("/appointments/{}", id), payload)
            .await?;
        Ok(parse_appointment(&body)
            .unwrap_or_else(|| appointment_from_form(form, id.to_string(), service.name)))
    }

    /// Cancel (delete) an appointment. Callers must have taken the
    /// user through an explicit confirmation step first.
    pub async fn cancel(&self, id: &str) -> Result<(), ApiError> {
        self.api
            .delete(&format!("/appointments/{}", id))
            .await
            .map(|_| ())
    }
}

/// Parse a single appointment, with or without a `data` envelope
fn parse_appointment(body: &Value) -> Option<Appointment> {
    let payload = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => body,
    };
    serde_json::from_value(payload.clone()).ok()
}

/// Fallback when the server's response is not a parseable appointment:
/// reconstruct from what was submitted.
fn appointment_from_form(form: &BookingForm, id: String, service_name: &str) -> Appointment {
    Appointment {
        id,
        date: form.date.clone(),
        time: form.time.clone(),
        service_name: service_name.to_string(),
        description: form.description.clone(),
        doctor: form.doctor.clone(),
        location: form.location.clone(),
        status: AppointmentStatus::Pending,
    }
}
