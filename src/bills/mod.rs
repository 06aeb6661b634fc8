//! Bill list and bill detail fetchers.
//!
//! Both consult the document store first and fall through to Congress.gov
//! on a miss. The list cache expires on the time-of-day schedule in
//! [`crate::cache`]; the detail cache is served on presence alone and never
//! re-validated.

mod details;
mod latest;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::Clock;
use crate::congress::CongressApiClient;
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::store::{DocumentStore, StoreError};

pub use details::{TEXT_UNAVAILABLE, bill_id};

pub const DEFAULT_LATEST_LIMIT: u32 = 5;

/// Where a response was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Api,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestBills {
    pub source: Source,
    pub count: usize,
    pub bills: Vec<Value>,
}

/// Enriched bill record, stored flat in the detail collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDetailRecord {
    pub bill_id: String,
    pub title: Option<String>,
    pub sponsor_name: String,
    pub introduced_date: Option<String>,
    pub latest_action: Value,
    pub cosponsor_count: u64,
    pub full_text: String,
    pub summary: String,
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDetails {
    pub source: Source,
    #[serde(flatten)]
    pub record: BillDetailRecord,
}

/// Shape of a document in the list collection.
#[derive(Debug, Serialize, Deserialize)]
struct ListCacheDocument {
    timestamp: Option<String>,
    #[serde(default)]
    data: Vec<Value>,
}

/// Cache-backed bill fetchers. Cheap to clone; all collaborators are shared.
#[derive(Clone)]
pub struct BillService {
    store: Arc<dyn DocumentStore>,
    congress: Arc<dyn CongressApiClient>,
    llm: Arc<dyn LanguageModel>,
    clock: Arc<dyn Clock>,
}

impl BillService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        congress: Arc<dyn CongressApiClient>,
        llm: Arc<dyn LanguageModel>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            congress,
            llm,
            clock,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn llm(&self) -> &Arc<dyn LanguageModel> {
        &self.llm
    }

    /// Reads a cached document. Undecodable documents count as misses.
    async fn read_cached(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        match self.store.get(collection, key).await {
            Ok(doc) => Ok(doc),
            Err(StoreError::Serialization(e)) => {
                tracing::warn!(collection, key, error = %e, "malformed cache document, treating as miss");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
