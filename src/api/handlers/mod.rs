pub mod dados_consumo;
pub mod dispositivos;
pub mod sessoes;
pub mod usuarios;

use axum::{
    http::{header, HeaderName, StatusCode},
    Json,
};
use utoipa::OpenApi;

use super::dto::{
    ConsumptionDto, ConsumptionPayload, DeviceDto, DevicePayload, LoginRequest, SessionDto,
    SessionPayload, UserDto, UserPayload, UserRef,
};
use crate::db::models::DeviceStatus;

/// `201 Created` with a `Location` header pointing at the new resource.
pub type Created<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

pub(crate) fn created<T>(location: String, body: T) -> Created<T> {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        usuarios::create_user,
        usuarios::update_user,
        usuarios::delete_user,
        usuarios::list_users,
        usuarios::get_user,
        usuarios::get_user_by_email,
        usuarios::login,
        dispositivos::create_device,
        dispositivos::update_device,
        dispositivos::delete_device,
        dispositivos::list_devices,
        dispositivos::get_device,
        dispositivos::activate_device,
        dispositivos::deactivate_device,
        sessoes::start_session,
        sessoes::finalize_session,
        sessoes::finalize_session_explicit,
        sessoes::delete_session,
        sessoes::list_sessions,
        sessoes::get_session,
        dados_consumo::create_reading,
        dados_consumo::update_reading,
        dados_consumo::delete_reading,
        dados_consumo::list_readings,
        dados_consumo::get_reading,
        health,
    ),
    components(schemas(
        UserDto,
        UserPayload,
        LoginRequest,
        DeviceDto,
        DevicePayload,
        DeviceStatus,
        SessionDto,
        SessionPayload,
        UserRef,
        ConsumptionDto,
        ConsumptionPayload,
    )),
    tags(
        (name = "usuarios",     description = "User registration and login"),
        (name = "dispositivos", description = "Monitored devices"),
        (name = "sessoes",      description = "User sessions"),
        (name = "dadosConsumo", description = "Energy consumption readings"),
        (name = "system",       description = "System endpoints"),
    ),
    info(
        title = "Energia Backend API",
        version = "0.1.0",
        description = "REST API for users, devices, sessions and energy consumption readings"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_support {
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::PgPool;

    use crate::api::router;

    pub fn test_server(pool: PgPool) -> TestServer {
        TestServer::new(router(pool)).unwrap()
    }

    /// Registers a user over HTTP and returns its id.
    pub async fn create_user(server: &TestServer, email: &str, senha: &str) -> i64 {
        let resp = server
            .post("/usuarios")
            .json(&json!({ "nome": "Ana Souza", "email": email, "senha": senha }))
            .await;
        resp.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = resp.json();
        body["id_usuario"].as_i64().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use sqlx::PgPool;

    use super::test_support::test_server;

    #[sqlx::test(migrations = "./migrations")]
    async fn health_returns_ok(pool: PgPool) {
        let server = test_server(pool);
        let resp = server.get("/health").await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert_eq!(body["status"], "ok");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn openapi_spec_is_served(pool: PgPool) {
        let server = test_server(pool);
        let resp = server.get("/api-docs/openapi.json").await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert_eq!(body["info"]["title"], "Energia Backend API");
        assert!(body["paths"]["/dispositivos/{id}/ativar"].is_object());
        assert!(body["paths"]["/sessoes/{id}/finalizar"]["put"].is_object());
        assert!(body["paths"]["/sessoes/{id}"]["put"].is_object());
    }
}
