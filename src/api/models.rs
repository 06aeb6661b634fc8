use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct LatestBillsQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BillPath {
    pub congress: u32,
    pub bill_type: String,
    pub number: u32,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
}

#[derive(Debug, Deserialize)]
pub struct SenatorChatRequest {
    pub prompt: String,
    pub senator_name: String,
    pub party: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SenatorChatResponse {
    pub senator_name: String,
    pub reply: String,
}
