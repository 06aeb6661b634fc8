use serde_json::Value;

use super::{BillService, LatestBills, ListCacheDocument, Source};
use crate::cache;
use crate::error::{AppError, Result};
use crate::store::{BILL_LIST_COLLECTION, StoreError};

fn cache_key(limit: u32) -> String {
    format!("latest_{limit}")
}

impl BillService {
    /// Most recent `limit` bills, from cache while the entry is inside its
    /// refresh window, otherwise from Congress.gov.
    ///
    /// A fresh result is always written back, empty lists included.
    pub async fn get_latest_bills(&self, limit: u32) -> Result<LatestBills> {
        if limit == 0 {
            return Err(AppError::BadRequest("limit must be positive".to_string()));
        }

        let key = cache_key(limit);

        if let Some(doc) = self.read_cached(BILL_LIST_COLLECTION, &key).await? {
            match serde_json::from_value::<ListCacheDocument>(doc) {
                Ok(cached) if cache::is_valid(cached.timestamp.as_deref(), &self.clock.now()) => {
                    tracing::debug!(key = %key, count = cached.data.len(), "bill list cache hit");
                    return Ok(LatestBills {
                        source: Source::Cache,
                        count: cached.data.len(),
                        bills: cached.data,
                    });
                }
                Ok(cached) => {
                    tracing::debug!(key = %key, timestamp = ?cached.timestamp, "bill list cache stale");
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "malformed bill list cache entry, refreshing");
                }
            }
        } else {
            tracing::debug!(key = %key, "bill list cache miss");
        }

        let bills: Vec<Value> = self.congress.list_bills(limit).await?;
        tracing::info!(key = %key, count = bills.len(), "fetched latest bills from Congress.gov");

        let document = ListCacheDocument {
            timestamp: Some(self.clock.now().to_rfc3339()),
            data: bills,
        };
        let value = serde_json::to_value(&document).map_err(StoreError::from)?;
        self.store.set(BILL_LIST_COLLECTION, &key, value).await?;

        Ok(LatestBills {
            source: Source::Api,
            count: document.data.len(),
            bills: document.data,
        })
    }
}
