//! Client-side form validation
//!
//! Field-scoped checks that run before any network call. A failing
//! field blocks submission entirely.

use chrono::{Days, NaiveDate};

use crate::catalog;

/// Minimum password length, shared by login and signup
pub const PASSWORD_MIN_LEN: usize = 8;

/// Field-level validation errors, in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.entries.push((field.to_string(), message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, message)| (name.as_str(), message.as_str()))
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Basic `local@domain` shape check
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let well_formed = |part: &str| !part.is_empty() && !part.contains(char::is_whitespace);
    well_formed(local) && well_formed(domain) && domain.contains('.') && !domain.ends_with('.')
}

/// 10-15 digits after stripping whitespace
pub fn is_valid_mobile(mobile: &str) -> bool {
    let digits: String = mobile.chars().filter(|c| !c.is_whitespace()).collect();
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.len() < PASSWORD_MIN_LEN {
        errors.add("password", "Password must be at least 8 characters");
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email.trim()) {
        errors.add("email", "Email is invalid");
    }
}

/// Login credentials as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        errors.into_result()
    }
}

/// Registration details as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }
        check_email(&mut errors, &self.email);
        if self.mobile.trim().is_empty() {
            errors.add("mobile", "Mobile number is required");
        } else if !is_valid_mobile(&self.mobile) {
            errors.add("mobile", "Invalid mobile number");
        }
        check_password(&mut errors, &self.password);
        if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }
        errors.into_result()
    }
}

/// Booking/edit details as selected in the appointment form.
/// `service` holds a catalog id; `date` is `YYYY-MM-DD` from the date
/// input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub service: String,
    pub date: String,
    pub time: String,
    pub doctor: String,
    pub location: String,
    pub description: String,
}

impl BookingForm {
    pub fn validate(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if catalog::find_service(&self.service).is_none() {
            errors.add("service", "Please select a service");
        }
        if self.doctor.trim().is_empty() {
            errors.add("doctor", "Please select a doctor");
        }
        if self.location.trim().is_empty() {
            errors.add("location", "Please select a location");
        }
        if self.date.trim().is_empty() {
            errors.add("date", "Please select a date");
        } else {
            match parse_date(&self.date) {
                Some(date) if date < min_booking_date(today) => {
                    errors.add("date", "Appointments must be booked at least one day ahead");
                }
                Some(_) => {}
                None => errors.add("date", "Please enter a valid date"),
            }
        }
        if self.time.trim().is_empty() {
            errors.add("time", "Please select a time");
        }
        errors.into_result()
    }
}

/// Earliest bookable date: no same-day appointments
pub fn min_booking_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

/// Parse the `YYYY-MM-DD` prefix of a date string (server dates may
/// carry a trailing `T…` timestamp)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn valid_booking() -> BookingForm {
        BookingForm {
            service: "cleaning".to_string(),
            date: "2026-09-15".to_string(),
            time: "09:30".to_string(),
            doctor: "Dr. Sarah Johnson".to_string(),
            location: "Main Clinic - Downtown".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@clinic.example.org"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@no-local.com"));
        assert!(!is_valid_email("no-domain@"));
        assert!(!is_valid_email("no-dot@domain"));
        assert!(!is_valid_email("sp ace@domain.com"));
        assert!(!is_valid_email("trailing@dot.com."));
    }

    #[test]
    fn mobile_numbers() {
        assert!(is_valid_mobile("09171234567"));
        assert!(is_valid_mobile("0917 123 4567"));
        assert!(is_valid_mobile("123456789012345"));
        assert!(!is_valid_mobile("123456789")); // 9 digits
        assert!(!is_valid_mobile("1234567890123456")); // 16 digits
        assert!(!is_valid_mobile("0917-123-4567")); // non-digit
        assert!(!is_valid_mobile(""));
    }

    #[test]
    fn login_requires_strong_password() {
        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "short".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(errors.get("email"), None);
    }

    #[test]
    fn login_accepts_valid_credentials() {
        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn signup_collects_all_field_errors() {
        let form = SignupForm::default();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("mobile"), Some("Mobile number is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn signup_checks_confirmation() {
        let form = SignupForm {
            name: "Ana Cruz".to_string(),
            email: "ana@example.com".to_string(),
            mobile: "09171234567".to_string(),
            password: "longenough".to_string(),
            confirm_password: "different".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
        assert_eq!(errors.get("password"), None);
    }

    #[test]
    fn booking_valid_form_passes() {
        assert!(valid_booking().validate(today()).is_ok());
    }

    #[test]
    fn booking_rejects_same_day() {
        let mut form = valid_booking();
        form.date = "2026-08-30".to_string();
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(
            errors.get("date"),
            Some("Appointments must be booked at least one day ahead")
        );
    }

    #[test]
    fn booking_accepts_tomorrow() {
        let mut form = valid_booking();
        form.date = "2026-08-31".to_string();
        assert!(form.validate(today()).is_ok());
    }

    #[test]
    fn booking_requires_every_selection() {
        let form = BookingForm::default();
        let errors = form.validate(today()).unwrap_err();
        for field in ["service", "doctor", "location", "date", "time"] {
            assert!(errors.get(field).is_some(), "missing error for {}", field);
        }
    }

    #[test]
    fn booking_rejects_unknown_service_id() {
        let mut form = valid_booking();
        form.service = "massage".to_string();
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.get("service"), Some("Please select a service"));
    }

    #[test]
    fn booking_rejects_garbage_date() {
        let mut form = valid_booking();
        form.date = "next tuesday".to_string();
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.get("date"), Some("Please enter a valid date"));
    }

    #[test]
    fn parse_date_strips_timestamp() {
        assert_eq!(
            parse_date("2026-09-15T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(2026, 9, 15)
        );
        assert_eq!(parse_date("2026-09-15"), NaiveDate::from_ymd_opt(2026, 9, 15));
        assert_eq!(parse_date("garbage"), None);
    }

    #[test]
    fn min_booking_date_is_tomorrow() {
        assert_eq!(
            min_booking_date(today()),
            NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
        );
    }
}
