use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::models::{
    BillPath, HealthResponse, LatestBillsQuery, RootResponse, SenatorChatRequest,
    SenatorChatResponse,
};
use crate::api::response;
use crate::bills::DEFAULT_LATEST_LIMIT;
use crate::error::{AppError, Result};

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/bills/latest", get(latest_bills_handler))
        .route(
            "/bills/details/:congress/:bill_type/:number",
            get(bill_details_handler),
        )
        .route("/chat/senator", post(senator_chat_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn root_handler() -> impl IntoResponse {
    response::success(RootResponse {
        message: "CivicLens API is running!",
    })
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let health = match state.bills.store().ping().await {
        Ok(()) => HealthResponse {
            status: "ok".to_string(),
            store: "connected".to_string(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "document store health check failed");
            HealthResponse {
                status: "error".to_string(),
                store: format!("connection failed: {e}"),
            }
        }
    };
    response::success(health)
}

async fn latest_bills_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LatestBillsQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LATEST_LIMIT);
    let start_time = std::time::Instant::now();

    let latest = state.bills.get_latest_bills(limit).await?;

    tracing::info!(
        limit,
        source = ?latest.source,
        count = latest.count,
        elapsed = ?start_time.elapsed(),
        "served latest bills"
    );
    Ok(response::success(latest))
}

async fn bill_details_handler(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BillPath>,
) -> Result<impl IntoResponse> {
    let start_time = std::time::Instant::now();

    let details = state
        .bills
        .get_bill_details(path.congress, &path.bill_type, path.number)
        .await?;

    tracing::info!(
        bill_id = %details.record.bill_id,
        source = ?details.source,
        elapsed = ?start_time.elapsed(),
        "served bill details"
    );
    Ok(response::success(details))
}

async fn senator_chat_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SenatorChatRequest>,
) -> Result<impl IntoResponse> {
    if req.prompt.trim().is_empty() || req.senator_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "prompt and senator_name are required".to_string(),
        ));
    }

    let reply = state
        .bills
        .llm()
        .senator_chat(&req.prompt, &req.senator_name, &req.party)
        .await?;

    Ok(response::success(SenatorChatResponse {
        senator_name: req.senator_name,
        reply,
    }))
}
