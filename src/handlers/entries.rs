use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::dto::{
    ApiResponse, CreateMoodEntryRequest, ListQuery, MoodEntryResponse, StatsQuery,
    UpdateMoodEntryRequest,
};
use crate::error::AppResult;
use crate::services::stats::MoodStatistics;
use crate::AppState;

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateMoodEntryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MoodEntryResponse>>)> {
    let entry = state.entries.create(auth_user.id, body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(entry.into()))))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<MoodEntryResponse>>>> {
    let (entries, pagination) = state
        .entries
        .list(auth_user.id, query.limit, query.page)
        .await?;

    let data = entries.into_iter().map(MoodEntryResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, pagination)))
}

pub async fn entry_statistics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<ApiResponse<MoodStatistics>>> {
    let statistics = state.entries.statistics(auth_user.id, query.days).await?;
    Ok(Json(ApiResponse::data(statistics)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
    Json(body): Json<UpdateMoodEntryRequest>,
) -> AppResult<Json<ApiResponse<MoodEntryResponse>>> {
    let entry = state.entries.update(entry_id, auth_user.id, body).await?;
    Ok(Json(ApiResponse::data(entry.into())))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.entries.delete(entry_id, auth_user.id).await?;
    Ok(Json(ApiResponse::ok()))
}
