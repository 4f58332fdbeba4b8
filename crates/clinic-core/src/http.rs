//! HTTP transport abstraction for testability

use async_trait::async_trait;
use serde_json::Value;

/// An outgoing request, fully described so transports stay dumb
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        write!(f, "{}", name)
    }
}

/// Abstraction over the browser fetch layer for dependency injection.
/// `?Send` because WASM futures are not `Send`; the native test
/// runtime is single-threaded anyway.
#[async_trait(?Send)]
#[cfg_attr(test, mockall::automock)]
pub trait HttpTransport {
    /// Issue the request and return the raw status and body
    async fn send(&self, request: HttpRequest) -> crate::Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn success_covers_2xx_only() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        assert!(ok.is_success());

        let redirect = HttpResponse {
            status: 301,
            body: String::new(),
        };
        assert!(!redirect.is_success());

        let client_err = HttpResponse {
            status: 400,
            body: String::new(),
        };
        assert!(!client_err.is_success());
    }
}
