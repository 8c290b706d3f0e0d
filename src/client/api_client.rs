use crate::profile::{BusinessProfile, HeadlineUpdate};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with status {status}")]
    Status { status: StatusCode },
}

/// The two calls the dashboard makes
pub trait BusinessApi {
    fn fetch_profile(
        &self,
        name: &str,
        location: &str,
    ) -> impl Future<Output = Result<BusinessProfile, ClientError>> + Send;

    fn regenerate_headline(
        &self,
        name: &str,
        location: &str,
    ) -> impl Future<Output = Result<HeadlineUpdate, ClientError>> + Send;
}

#[derive(Serialize)]
struct BusinessInput<'a> {
    name: &'a str,
    location: &'a str,
}

/// HTTP client for the business data API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl BusinessApi for ApiClient {
    async fn fetch_profile(
        &self,
        name: &str,
        location: &str,
    ) -> Result<BusinessProfile, ClientError> {
        let response = self
            .http
            .post(self.url("/business-data"))
            .json(&BusinessInput { name, location })
            .send()
            .await?;

        Ok(ensure_success(response)?.json().await?)
    }

    async fn regenerate_headline(
        &self,
        name: &str,
        location: &str,
    ) -> Result<HeadlineUpdate, ClientError> {
        let response = self
            .http
            .get(self.url("/regenerate-headline"))
            .query(&BusinessInput { name, location })
            .send()
            .await?;

        Ok(ensure_success(response)?.json().await?)
    }
}

// Checked before decoding, so plain-text error bodies never reach the JSON parser
fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status { status })
    }
}
