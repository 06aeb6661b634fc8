use serde_json::Value;

use super::{BillDetailRecord, BillDetails, BillService, Source};
use crate::congress::CongressApiError;
use crate::error::Result;
use crate::store::{BILL_DETAIL_COLLECTION, StoreError};
use crate::text::normalize_bill_text;

/// Stored in place of bill text when the text stage fails.
pub const TEXT_UNAVAILABLE: &str = "Text unavailable";

/// `{bill_type}{number}-{congress}`, with `bill_type` in the caller's case.
pub fn bill_id(bill_type: &str, number: u32, congress: u32) -> String {
    format!("{bill_type}{number}-{congress}")
}

impl BillService {
    /// Full record for one bill, enriched with its text and a summary.
    ///
    /// A cached record is returned whenever one exists, however old. On a
    /// miss only the metadata call can fail the request; text and summary
    /// failures are recorded as fallback strings and persisted like real data.
    pub async fn get_bill_details(
        &self,
        congress: u32,
        bill_type: &str,
        number: u32,
    ) -> Result<BillDetails> {
        let bill_id = bill_id(bill_type, number, congress);

        if let Some(doc) = self.read_cached(BILL_DETAIL_COLLECTION, &bill_id).await? {
            match serde_json::from_value::<BillDetailRecord>(doc) {
                Ok(record) => {
                    tracing::debug!(bill_id = %bill_id, "bill detail cache hit");
                    return Ok(BillDetails {
                        source: Source::Cache,
                        record,
                    });
                }
                Err(e) => {
                    tracing::warn!(bill_id = %bill_id, error = %e, "malformed bill detail cache entry, rebuilding");
                }
            }
        }

        let metadata = self.congress.get_bill(congress, bill_type, number).await?;
        let full_text = self.full_text_or_fallback(congress, bill_type, number, &bill_id).await;
        let summary = self.summary_or_fallback(&full_text, &bill_id).await;

        let record = BillDetailRecord {
            bill_id: bill_id.clone(),
            sponsor_name: metadata.sponsor_name(),
            cosponsor_count: metadata.cosponsor_count(),
            title: metadata.title,
            introduced_date: metadata.introduced_date,
            latest_action: metadata
                .latest_action
                .unwrap_or_else(|| Value::Object(Default::default())),
            full_text,
            summary,
            timestamp: self.clock.now(),
        };

        let value = serde_json::to_value(&record).map_err(StoreError::from)?;
        self.store.set(BILL_DETAIL_COLLECTION, &bill_id, value).await?;
        tracing::info!(bill_id = %bill_id, "cached enriched bill record");

        Ok(BillDetails {
            source: Source::Api,
            record,
        })
    }

    async fn full_text_or_fallback(
        &self,
        congress: u32,
        bill_type: &str,
        number: u32,
        bill_id: &str,
    ) -> String {
        match self.fetch_full_text(congress, bill_type, number, bill_id).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(bill_id, error = %e, "bill text unavailable, using fallback");
                TEXT_UNAVAILABLE.to_string()
            }
        }
    }

    async fn fetch_full_text(
        &self,
        congress: u32,
        bill_type: &str,
        number: u32,
        bill_id: &str,
    ) -> std::result::Result<String, CongressApiError> {
        let unavailable = || CongressApiError::TextUnavailable(bill_id.to_string());

        let versions = self.congress.get_bill_text(congress, bill_type, number).await?;
        let version = versions.first().ok_or_else(unavailable)?;

        let raw = match (version.inline_content(), version.formatted_text_url()) {
            (Some(content), _) => content.to_string(),
            (None, Some(url)) => self.congress.get_text_document(url).await?,
            (None, None) => return Err(unavailable()),
        };

        let text = normalize_bill_text(&raw);
        if text.trim().is_empty() {
            return Err(unavailable());
        }
        Ok(text)
    }

    // The fallback text is summarized too; the model call happens either way.
    async fn summary_or_fallback(&self, text: &str, bill_id: &str) -> String {
        match self.llm.summarize(text).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(bill_id, error = %e, "summary unavailable, using fallback");
                format!("Summary unavailable ({e})")
            }
        }
    }
}
