//! Congress.gov API client for bill data.
//!
//! The trait abstraction lets the bill service run against a mock in unit
//! tests and against `wiremock` in integration tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::types::{BillMetadata, BillResponse, BillsResponse, TextResponse, TextVersion};

/// Errors that can occur when calling the Congress API.
#[derive(Debug, Error)]
pub enum CongressApiError {
    /// HTTP request failed or the body could not be decoded
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned a non-2xx response
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// No text version with usable content
    #[error("No usable text published for {0}")]
    TextUnavailable(String),
}

/// Bill operations against the legislative data source.
#[async_trait]
pub trait CongressApiClient: Send + Sync {
    /// Most recent bills, one page of at most `limit` items.
    async fn list_bills(&self, limit: u32) -> Result<Vec<Value>, CongressApiError>;

    async fn get_bill(
        &self,
        congress: u32,
        bill_type: &str,
        number: u32,
    ) -> Result<BillMetadata, CongressApiError>;

    /// Published text versions, most recent first as returned by the API.
    async fn get_bill_text(
        &self,
        congress: u32,
        bill_type: &str,
        number: u32,
    ) -> Result<Vec<TextVersion>, CongressApiError>;

    /// Raw body of a text document linked from a text version.
    async fn get_text_document(&self, url: &str) -> Result<String, CongressApiError>;
}

/// HTTP implementation of `CongressApiClient`.
pub struct HttpCongressClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpCongressClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn bill_url(&self, congress: u32, bill_type: &str, number: u32) -> String {
        format!(
            "{}/bill/{}/{}/{}",
            self.base_url,
            congress,
            bill_type.to_ascii_lowercase(),
            number
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        extra: &[(&str, String)],
        not_found: impl FnOnce() -> String,
    ) -> Result<T, CongressApiError> {
        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("format", "json")])
            .query(extra)
            .send()
            .await?;

        let response = check_status(response, not_found).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(
    response: reqwest::Response,
    not_found: impl FnOnce() -> String,
) -> Result<reqwest::Response, CongressApiError> {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(CongressApiError::NotFound(not_found()));
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(CongressApiError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response)
}

#[async_trait]
impl CongressApiClient for HttpCongressClient {
    async fn list_bills(&self, limit: u32) -> Result<Vec<Value>, CongressApiError> {
        let url = format!("{}/bill", self.base_url);
        let body: BillsResponse = self
            .get_json(&url, &[("limit", limit.to_string())], || "bill list".to_string())
            .await?;
        Ok(body.bills)
    }

    async fn get_bill(
        &self,
        congress: u32,
        bill_type: &str,
        number: u32,
    ) -> Result<BillMetadata, CongressApiError> {
        let url = self.bill_url(congress, bill_type, number);
        let body: BillResponse = self
            .get_json(&url, &[], || format!("{bill_type}{number}-{congress}"))
            .await?;
        Ok(body.bill)
    }

    async fn get_bill_text(
        &self,
        congress: u32,
        bill_type: &str,
        number: u32,
    ) -> Result<Vec<TextVersion>, CongressApiError> {
        let url = format!("{}/text", self.bill_url(congress, bill_type, number));
        let body: TextResponse = self
            .get_json(&url, &[], || format!("text for {bill_type}{number}-{congress}"))
            .await?;
        Ok(body.text_versions)
    }

    async fn get_text_document(&self, url: &str) -> Result<String, CongressApiError> {
        let response = self.client.get(url).send().await?;
        let response = check_status(response, || url.to_string()).await?;
        Ok(response.text().await?)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::unwrap_used)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{BillMetadata, CongressApiClient, CongressApiError, TextVersion, Value};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock `CongressApiClient`. Results are sticky: every call returns a
    /// fresh copy of the configured result until it is replaced.
    #[derive(Default)]
    pub struct MockCongressClient {
        list_bills_result: Mutex<Option<Result<Vec<Value>, String>>>,
        get_bill_result: Mutex<Option<Result<BillMetadata, String>>>,
        get_bill_text_result: Mutex<Option<Result<Vec<TextVersion>, String>>>,
        documents: Mutex<HashMap<String, String>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockCongressClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_list_bills_result(&self, result: Result<Vec<Value>, String>) {
            *self.list_bills_result.lock().unwrap() = Some(result);
        }

        pub fn set_get_bill_result(&self, result: Result<BillMetadata, String>) {
            *self.get_bill_result.lock().unwrap() = Some(result);
        }

        pub fn set_get_bill_text_result(&self, result: Result<Vec<TextVersion>, String>) {
            *self.get_bill_text_result.lock().unwrap() = Some(result);
        }

        pub fn set_text_document(&self, url: &str, body: &str) {
            self.documents
                .lock()
                .unwrap()
                .insert(url.to_string(), body.to_string());
        }

        /// Every call made, e.g. `"list_bills(5)"` or `"get_bill(118, hr, 1)"`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn replay<T: Clone>(slot: &Mutex<Option<Result<T, String>>>, missing: &str) -> Result<T, CongressApiError> {
        match slot.lock().unwrap().as_ref() {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(CongressApiError::ApiError {
                status: 500,
                message: message.clone(),
            }),
            None => Err(CongressApiError::NotFound(missing.to_string())),
        }
    }

    #[async_trait]
    impl CongressApiClient for MockCongressClient {
        async fn list_bills(&self, limit: u32) -> Result<Vec<Value>, CongressApiError> {
            self.record(format!("list_bills({limit})"));
            replay(&self.list_bills_result, "bill list")
        }

        async fn get_bill(
            &self,
            congress: u32,
            bill_type: &str,
            number: u32,
        ) -> Result<BillMetadata, CongressApiError> {
            self.record(format!("get_bill({congress}, {bill_type}, {number})"));
            replay(&self.get_bill_result, "bill")
        }

        async fn get_bill_text(
            &self,
            congress: u32,
            bill_type: &str,
            number: u32,
        ) -> Result<Vec<TextVersion>, CongressApiError> {
            self.record(format!("get_bill_text({congress}, {bill_type}, {number})"));
            replay(&self.get_bill_text_result, "bill text")
        }

        async fn get_text_document(&self, url: &str) -> Result<String, CongressApiError> {
            self.record(format!("get_text_document({url})"));
            self.documents
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| CongressApiError::NotFound(url.to_string()))
        }
    }
}
