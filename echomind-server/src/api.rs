use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use echomind::{most_recent_first, Emotion, RecallFilter, Reflection};

use crate::models::{
    CaptureRequest, CaptureResponse, EmotionResponse, MemoryResponse, RecallRequest,
    ReflectionResponse,
};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/emotions", get(list_emotions))
        .route("/v1/thoughts", post(capture_thought).get(recall_thoughts))
        .route("/v1/reflection", get(weekly_reflection))
        .with_state(state)
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub async fn list_emotions() -> Json<Vec<EmotionResponse>> {
    Json(Emotion::ALL.iter().copied().map(Into::into).collect())
}

pub async fn capture_thought(
    State(state): State<AppState>,
    Json(payload): Json<CaptureRequest>,
) -> Result<(StatusCode, Json<CaptureResponse>), StatusCode> {
    let mut journal = state.journal.write().await;

    match journal.capture_labeled(&payload.text, &payload.emotion, &payload.tags) {
        Ok(Some(memory)) => Ok((
            StatusCode::CREATED,
            Json(CaptureResponse {
                captured: true,
                memory: Some(memory.into()),
            }),
        )),
        Ok(None) => Ok((
            StatusCode::OK,
            Json(CaptureResponse {
                captured: false,
                memory: None,
            }),
        )),
        Err(e) => {
            tracing::warn!("Rejected capture: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

pub async fn recall_thoughts(
    State(state): State<AppState>,
    Query(params): Query<RecallRequest>,
) -> Result<Json<Vec<MemoryResponse>>, StatusCode> {
    let mut filter = RecallFilter::new();

    // "all" mirrors the picker's pass-through option
    if let Some(raw) = params.emotion.as_deref().map(str::trim) {
        if !raw.is_empty() && !raw.eq_ignore_ascii_case("all") {
            let emotion: Emotion = raw.parse().map_err(|e| {
                tracing::warn!("Rejected recall: {}", e);
                StatusCode::BAD_REQUEST
            })?;
            filter = filter.with_emotion(emotion);
        }
    }
    if let Some(tag) = params.tag {
        filter = filter.with_tag(tag);
    }

    let journal = state.journal.read().await;
    let found = most_recent_first(journal.recall(&filter));

    Ok(Json(found.into_iter().map(Into::into).collect()))
}

pub async fn weekly_reflection(State(state): State<AppState>) -> Json<ReflectionResponse> {
    let journal = state.journal.read().await;

    match journal.reflect(chrono::Utc::now()) {
        Reflection::NoData => Json(ReflectionResponse::no_data()),
        Reflection::Summary(summary) => Json((&summary).into()),
    }
}
