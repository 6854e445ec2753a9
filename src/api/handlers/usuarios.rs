use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;

use super::{created, Created};
use crate::{
    api::{
        dto::{LoginRequest, UserDto, UserPayload},
        errors::AppError,
    },
    bo::UserBo,
};

/// Register a user.
#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserDto,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Empty field or malformed email"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "usuarios"
)]
pub async fn create_user(
    State(pool): State<PgPool>,
    Json(payload): Json<UserPayload>,
) -> Result<Created<UserDto>, AppError> {
    let user = UserBo::new(&pool).insert(payload.into()).await?;
    Ok(created(format!("/usuarios/{}", user.id), user.into()))
}

/// Replace a user's fields. The path id wins over any id in the body.
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No such user"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "usuarios"
)]
pub async fn update_user(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<UserDto>, AppError> {
    let user = UserBo::new(&pool).update(id, payload.into()).await?;
    Ok(Json(user.into()))
}

/// Delete a user. Sessions that reference it are left in place.
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Non-positive id"),
        (status = 404, description = "No such user"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "usuarios"
)]
pub async fn delete_user(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    UserBo::new(&pool).delete(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/usuarios",
    responses(
        (status = 200, description = "All users", body = Vec<UserDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "usuarios"
)]
pub async fn list_users(State(pool): State<PgPool>) -> Result<Json<Vec<UserDto>>, AppError> {
    let users = UserBo::new(&pool).list_all().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user, or null when absent", body = Option<UserDto>),
        (status = 400, description = "Non-positive id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "usuarios"
)]
pub async fn get_user(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<Option<UserDto>>, AppError> {
    let user = UserBo::new(&pool).find_by_id(id).await?;
    Ok(Json(user.map(Into::into)))
}

/// Plain lookup by email; no credential check.
#[utoipa::path(
    get,
    path = "/usuarios/email/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "The user, or null when absent", body = Option<UserDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "usuarios"
)]
pub async fn get_user_by_email(
    State(pool): State<PgPool>,
    Path(email): Path<String>,
) -> Result<Json<Option<UserDto>>, AppError> {
    let user = UserBo::new(&pool).find_by_email(&email).await?;
    Ok(Json(user.map(Into::into)))
}

/// Check an email/password pair.
#[utoipa::path(
    post,
    path = "/usuarios/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = UserDto),
        (status = 401, description = "Unknown email or wrong password"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "usuarios"
)]
pub async fn login(
    State(pool): State<PgPool>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserDto>, AppError> {
    let user = UserBo::new(&pool).login(&req.email, &req.senha).await?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use serde_json::{json, Value};
    use sqlx::PgPool;

    use crate::api::handlers::test_support::{create_user, test_server};

    #[sqlx::test(migrations = "./migrations")]
    async fn create_returns_location_and_hides_password(pool: PgPool) {
        let server = test_server(pool);
        let resp = server
            .post("/usuarios")
            .json(&json!({ "nome": "Ana", "email": "ana@example.com", "senha": "s3cret" }))
            .await;
        resp.assert_status(StatusCode::CREATED);

        let body: Value = resp.json();
        let id = body["id_usuario"].as_i64().unwrap();
        assert_eq!(resp.header(header::LOCATION), format!("/usuarios/{id}"));
        assert_eq!(body["email"], "ana@example.com");
        assert!(body.get("senha").is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn create_with_malformed_email_is_400(pool: PgPool) {
        let server = test_server(pool);
        let resp = server
            .post("/usuarios")
            .json(&json!({ "nome": "Ana", "email": "not-an-email", "senha": "s3cret" }))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = resp.json();
        assert_eq!(body["error"], "validation_error");

        let list: Vec<Value> = server.get("/usuarios").await.json();
        assert!(list.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn duplicate_email_is_409(pool: PgPool) {
        let server = test_server(pool);
        create_user(&server, "ana@example.com", "pw").await;
        let resp = server
            .post("/usuarios")
            .json(&json!({ "nome": "Outra", "email": "ana@example.com", "senha": "pw" }))
            .await;
        resp.assert_status(StatusCode::CONFLICT);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_uses_path_id(pool: PgPool) {
        let server = test_server(pool);
        let id = create_user(&server, "ana@example.com", "pw").await;

        let resp = server
            .put(&format!("/usuarios/{id}"))
            .json(&json!({ "id_usuario": 999, "nome": "Ana Maria", "email": "ana@example.com", "senha": "pw2" }))
            .await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert_eq!(body["id_usuario"], id);
        assert_eq!(body["nome"], "Ana Maria");

        server
            .put("/usuarios/999")
            .json(&json!({ "nome": "X", "email": "x@example.com", "senha": "pw" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn get_returns_null_when_absent(pool: PgPool) {
        let server = test_server(pool);
        let resp = server.get("/usuarios/41").await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert!(body.is_null());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn lookup_by_email_is_a_plain_lookup(pool: PgPool) {
        let server = test_server(pool);
        let id = create_user(&server, "ana@example.com", "s3cret").await;

        let body: Value = server.get("/usuarios/email/ana@example.com").await.json();
        assert_eq!(body["id_usuario"], id);

        let missing: Value = server.get("/usuarios/email/bob@example.com").await.json();
        assert!(missing.is_null());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn login_accepts_only_matching_password(pool: PgPool) {
        let server = test_server(pool);
        let id = create_user(&server, "ana@example.com", "s3cret").await;

        let ok = server
            .post("/usuarios/login")
            .json(&json!({ "email": "ana@example.com", "senha": "s3cret" }))
            .await;
        ok.assert_status_ok();
        assert_eq!(ok.json::<Value>()["id_usuario"], id);

        for (email, senha) in [("ana@example.com", "wrong"), ("bob@example.com", "s3cret")] {
            let resp = server
                .post("/usuarios/login")
                .json(&json!({ "email": email, "senha": senha }))
                .await;
            resp.assert_status(StatusCode::UNAUTHORIZED);
            assert_eq!(resp.json::<Value>()["error"], "invalid_credentials");
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn delete_then_delete_again(pool: PgPool) {
        let server = test_server(pool);
        let id = create_user(&server, "ana@example.com", "pw").await;

        server.delete(&format!("/usuarios/{id}")).await.assert_status_ok();
        server
            .delete(&format!("/usuarios/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server.delete("/usuarios/0").await.assert_status(StatusCode::BAD_REQUEST);
    }
}
