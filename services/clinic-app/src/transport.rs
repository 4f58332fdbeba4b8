//! Browser fetch transport
//!
//! Implements [`HttpTransport`] over gloo-net. Outside the browser the
//! transport compiles but refuses to send, which keeps the crate
//! buildable for native tooling.

use async_trait::async_trait;
use clinic_core::http::{HttpRequest, HttpResponse, HttpTransport};
use clinic_core::Result;

#[derive(Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        #[cfg(target_arch = "wasm32")]
        {
            fetch(request).await
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = request;
            Err(clinic_core::ApiError::Network(
                "fetch transport is only available in the browser".to_string(),
            ))
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch(request: HttpRequest) -> Result<HttpResponse> {
    use clinic_core::http::Method;
    use clinic_core::ApiError;

    let builder = match request.method {
        Method::Get => gloo_net::http::Request::get(&request.url),
        Method::Post => gloo_net::http::Request::post(&request.url),
        Method::Put => gloo_net::http::Request::put(&request.url),
        Method::Delete => gloo_net::http::Request::delete(&request.url),
    };

    let builder = match &request.bearer {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    };

    let prepared = match &request.body {
        Some(body) => {
            let raw = serde_json::to_string(body)
                .map_err(|error| ApiError::Network(error.to_string()))?;
            builder
                .header("Content-Type", "application/json")
                .body(raw)
                .map_err(|error| ApiError::Network(error.to_string()))?
        }
        None => builder
            .build()
            .map_err(|error| ApiError::Network(error.to_string()))?,
    };

    let response = prepared
        .send()
        .await
        .map_err(|error| ApiError::Network(error.to_string()))?;

    let status = response.status();
    // An unreadable body is treated as empty; status carries the outcome
    let body = response.text().await.unwrap_or_default();
    Ok(HttpResponse { status, body })
}
