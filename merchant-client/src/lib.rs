//! # Merchant Client SDK
//!
//! A typed Rust client for the Merchant Overview API.

use merchant_types::{
    CODE_OK, MerchantOverview, OverviewResponse, PayType, PayTypesResponse, ResolvedRate,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Merchant API client.
pub struct MerchantClient {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl MerchantClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            http: Client::new(),
        }
    }

    /// Sets the merchant API key for authentication.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Fetches the dashboard overview for the configured merchant.
    pub async fn overview(&self) -> Result<MerchantOverview, ClientError> {
        let envelope: OverviewResponse = self.get("/api/merchant/overview").await?;
        check_code(envelope.code)?;
        Ok(envelope.data)
    }

    /// Fetches only the effective fee rates.
    pub async fn rates(&self) -> Result<Vec<ResolvedRate>, ClientError> {
        Ok(self.overview().await?.rates)
    }

    /// Lists active payment methods, optionally for one device class.
    pub async fn pay_types(&self, device: Option<&str>) -> Result<Vec<PayType>, ClientError> {
        let envelope: PayTypesResponse = self.send(self.pay_types_request(device)).await?;
        check_code(envelope.code)?;
        Ok(envelope.data)
    }

    fn pay_types_request(&self, device: Option<&str>) -> RequestBuilder {
        let req = self.request("/api/pay-types");
        match device {
            Some(device) => req.query(&[("device", device)]),
            None => req,
        }
    }

    /// GET request for `path` with the API key attached.
    fn request(&self, path: &str) -> RequestBuilder {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            req = req.header("X-API-Key", key);
        }
        req
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(path)).await
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(body),
            })
        }
    }
}

/// Rejects a 2xx envelope that still carries a failure code.
fn check_code(code: i32) -> Result<(), ClientError> {
    if code == CODE_OK {
        Ok(())
    } else {
        Err(ClientError::Api {
            status: 200,
            message: format!("server returned code {}", code),
        })
    }
}

/// Pulls the human-readable message out of an error body.
///
/// Middleware errors carry `error`, envelope failures carry `msg`; anything
/// else is returned verbatim.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("msg"))
                .and_then(|e| e.as_str())
                .map(String::from)
        })
        .unwrap_or(body)
}
