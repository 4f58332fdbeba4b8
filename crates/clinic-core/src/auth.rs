//! Login and signup flows
//!
//! Both flows validate first (no request leaves on a validation
//! failure), call the unauthenticated auth endpoints, normalize the
//! returned user, and establish the session.

use std::rc::Rc;

use serde_json::Value;

use crate::api::ApiClient;
use crate::error::FormError;
use crate::session::{Session, SessionStore, SessionUser};
use crate::validation::{LoginForm, SignupForm};
use crate::ApiError;

pub struct AuthClient {
    api: Rc<ApiClient>,
    session: Rc<SessionStore>,
}

impl AuthClient {
    pub fn new(api: Rc<ApiClient>, session: Rc<SessionStore>) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Session, FormError> {
        form.validate().map_err(FormError::Invalid)?;

        let email = form.email.trim();
        let payload = serde_json::json!({
            "email": email,
            "password": form.password,
        });
        let body = self.api.post_unauthenticated("/auth/login", payload).await?;
        let session = session_from_response(&body, "", email)?;
        self.session
            .login(session.user.clone(), session.token.clone());
        tracing::info!("Logged in as {}", session.user.email);
        Ok(session)
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<Session, FormError> {
        form.validate().map_err(FormError::Invalid)?;

        let name = form.name.trim();
        let email = form.email.trim();
        let payload = serde_json::json!({
            "name": name,
            "email": email,
            "mobile": form.mobile.trim(),
            "password": form.password,
        });
        let body = self
            .api
            .post_unauthenticated("/auth/signup", payload)
            .await?;
        let session = session_from_response(&body, name, email)?;
        self.session
            .login(session.user.clone(), session.token.clone());
        tracing::info!("Registered {}", session.user.email);
        Ok(session)
    }
}

/// Read `{user, token}` from the response, with or without a `data`
/// envelope. Server-provided user fields fall back to the submitted
/// values; a missing token is a malformed response.
fn session_from_response(
    body: &Value,
    fallback_name: &str,
    fallback_email: &str,
) -> Result<Session, FormError> {
    let payload = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => body,
    };

    let token = payload
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            tracing::error!("Auth response carried no token");
            FormError::Api(ApiError::Unknown {
                status: 200,
                message: Some("Malformed authentication response".to_string()),
            })
        })?;

    let user = payload.get("user").cloned().unwrap_or(Value::Null);
    let text = |field: &str| {
        user.get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let id = match user.get("id").or_else(|| user.get("_id")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    Ok(Session {
        user: SessionUser {
            id,
            name: text("name").unwrap_or_else(|| fallback_name.to_string()),
            email: text("email").unwrap_or_else(|| fallback_email.to_string()),
        },
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, Method, MockHttpTransport};
    use crate::session::{MemoryStorage, SessionStorage};
    use crate::validation::FieldErrors;

    fn harness(mock: MockHttpTransport) -> (Rc<SessionStore>, AuthClient) {
        let session = Rc::new(SessionStore::new(
            Rc::new(MemoryStorage::default()) as Rc<dyn SessionStorage>
        ));
        let api = Rc::new(ApiClient::new(
            "https://clinic.test/api",
            Rc::new(mock),
            Rc::clone(&session),
        ));
        let auth = AuthClient::new(api, Rc::clone(&session));
        (session, auth)
    }

    fn login_form() -> LoginForm {
        LoginForm {
            email: "ana@example.com".to_string(),
            password: "longenough".to_string(),
        }
    }

    fn signup_form() -> SignupForm {
        SignupForm {
            name: "Ana Cruz".to_string(),
            email: "ana@example.com".to_string(),
            mobile: "09171234567".to_string(),
            password: "longenough".to_string(),
            confirm_password: "longenough".to_string(),
        }
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn login_establishes_session() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.method == Method::Post
                    && req.url.ends_with("/auth/login")
                    && req.bearer.is_none()
            })
            .returning(|_| {
                Box::pin(async {
                    Ok(ok(
                        r#"{"token": "tok-1", "user": {"id": "u1", "name": "Ana Cruz", "email": "ana@example.com"}}"#,
                    ))
                })
            });

        let (session, auth) = harness(mock);
        let result = auth.login(&login_form()).await.unwrap();
        assert_eq!(result.token, "tok-1");
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().name, "Ana Cruz");
    }

    #[tokio::test]
    async fn login_accepts_data_envelope() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send().returning(|_| {
            Box::pin(async {
                Ok(ok(
                    r#"{"data": {"token": "tok-2", "user": {"id": 42, "name": "Ana"}}}"#,
                ))
            })
        });

        let (_, auth) = harness(mock);
        let result = auth.login(&login_form()).await.unwrap();
        assert_eq!(result.token, "tok-2");
        assert_eq!(result.user.id, "42");
    }

    #[tokio::test]
    async fn missing_user_fields_fall_back_to_submitted_values() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send()
            .returning(|_| Box::pin(async { Ok(ok(r#"{"token": "tok-3"}"#)) }));

        let (_, auth) = harness(mock);
        let result = auth.login(&login_form()).await.unwrap();
        assert_eq!(result.user.email, "ana@example.com");
        assert_eq!(result.user.name, "");
        assert_eq!(result.user.id, "");
    }

    #[tokio::test]
    async fn missing_token_is_a_malformed_response() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send()
            .returning(|_| Box::pin(async { Ok(ok(r#"{"user": {"id": "u1"}}"#)) }));

        let (session, auth) = harness(mock);
        let err = auth.login(&login_form()).await.unwrap_err();
        assert!(matches!(err, FormError::Api(ApiError::Unknown { .. })));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn invalid_login_never_reaches_the_network() {
        // No expectation configured: any send would panic the mock
        let mock = MockHttpTransport::new();
        let (_, auth) = harness(mock);

        let form = LoginForm {
            email: "a@b.com".to_string(),
            password: "short".to_string(),
        };
        let err = auth.login(&form).await.unwrap_err();
        let FormError::Invalid(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters")
        );
    }

    #[tokio::test]
    async fn invalid_signup_reports_all_fields() {
        let mock = MockHttpTransport::new();
        let (_, auth) = harness(mock);

        let err = auth.signup(&SignupForm::default()).await.unwrap_err();
        let FormError::Invalid(errors) = err else {
            panic!("expected validation failure");
        };
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"mobile"));
    }

    #[tokio::test]
    async fn signup_establishes_session_with_fallback_name() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send()
            .withf(|req| req.url.ends_with("/auth/signup"))
            .returning(|_| Box::pin(async { Ok(ok(r#"{"token": "tok-4", "user": {}}"#)) }));

        let (session, auth) = harness(mock);
        let result = auth.signup(&signup_form()).await.unwrap();
        assert_eq!(result.user.name, "Ana Cruz");
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_maps_to_auth_message() {
        let mut mock = MockHttpTransport::new();
        mock.expect_send().returning(|_| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 401,
                    body: String::new(),
                })
            })
        });

        let (session, auth) = harness(mock);
        let err = auth.login(&login_form()).await.unwrap_err();
        let FormError::Api(api_err) = err else {
            panic!("expected api failure");
        };
        assert_eq!(api_err.auth_message(), "Invalid email or password");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn field_errors_preserve_declaration_order() {
        let mut errors = FieldErrors::default();
        errors.add("email", "Email is required");
        errors.add("password", "Password is required");
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }
}
