use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;

use super::{created, Created};
use crate::{
    api::{
        dto::{SessionDto, SessionPayload},
        errors::AppError,
    },
    bo::SessionBo,
};

/// Start a session for the referenced user.
#[utoipa::path(
    post,
    path = "/sessoes",
    request_body = SessionPayload,
    responses(
        (status = 201, description = "Session started", body = SessionDto,
            headers(("Location" = String, description = "URL of the new session"))),
        (status = 400, description = "Missing user reference"),
        (status = 404, description = "Referenced user does not exist"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sessoes"
)]
pub async fn start_session(
    State(pool): State<PgPool>,
    Json(payload): Json<SessionPayload>,
) -> Result<Created<SessionDto>, AppError> {
    let session = SessionBo::new(&pool).start(payload.user_id()).await?;
    Ok(created(format!("/sessoes/{}", session.id), session.into()))
}

/// Finalise a session; any request body is ignored.
#[utoipa::path(
    put,
    path = "/sessoes/{id}",
    params(("id" = i32, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session finalised", body = SessionDto),
        (status = 400, description = "Non-positive id"),
        (status = 404, description = "No such session"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sessoes"
)]
pub async fn finalize_session(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<SessionDto>, AppError> {
    let session = SessionBo::new(&pool).finalize(id).await?;
    Ok(Json(session.into()))
}

/// Same as `PUT /sessoes/{id}`.
#[utoipa::path(
    put,
    path = "/sessoes/{id}/finalizar",
    params(("id" = i32, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session finalised", body = SessionDto),
        (status = 400, description = "Non-positive id"),
        (status = 404, description = "No such session"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sessoes"
)]
pub async fn finalize_session_explicit(
    state: State<PgPool>,
    id: Path<i32>,
) -> Result<Json<SessionDto>, AppError> {
    finalize_session(state, id).await
}

#[utoipa::path(
    delete,
    path = "/sessoes/{id}",
    params(("id" = i32, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session deleted"),
        (status = 400, description = "Non-positive id"),
        (status = 404, description = "No such session"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sessoes"
)]
pub async fn delete_session(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    SessionBo::new(&pool).delete(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/sessoes",
    responses(
        (status = 200, description = "All sessions", body = Vec<SessionDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sessoes"
)]
pub async fn list_sessions(State(pool): State<PgPool>) -> Result<Json<Vec<SessionDto>>, AppError> {
    let sessions = SessionBo::new(&pool).list_all().await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/sessoes/{id}",
    params(("id" = i32, Path, description = "Session id")),
    responses(
        (status = 200, description = "The session, or null when absent", body = Option<SessionDto>),
        (status = 400, description = "Non-positive id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sessoes"
)]
pub async fn get_session(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<Option<SessionDto>>, AppError> {
    let session = SessionBo::new(&pool).find_by_id(id).await?;
    Ok(Json(session.map(Into::into)))
}
