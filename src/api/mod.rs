pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use handlers::{dados_consumo, dispositivos, sessoes, usuarios, ApiDoc};

pub fn router(pool: PgPool) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route(
            "/usuarios",
            get(usuarios::list_users).post(usuarios::create_user),
        )
        .route("/usuarios/login", post(usuarios::login))
        .route("/usuarios/email/{email}", get(usuarios::get_user_by_email))
        .route(
            "/usuarios/{id}",
            get(usuarios::get_user)
                .put(usuarios::update_user)
                .delete(usuarios::delete_user),
        )
        .route(
            "/dispositivos",
            get(dispositivos::list_devices).post(dispositivos::create_device),
        )
        .route(
            "/dispositivos/{id}",
            get(dispositivos::get_device)
                .put(dispositivos::update_device)
                .delete(dispositivos::delete_device),
        )
        .route(
            "/dispositivos/{id}/ativar",
            put(dispositivos::activate_device),
        )
        .route(
            "/dispositivos/{id}/desativar",
            put(dispositivos::deactivate_device),
        )
        .route(
            "/sessoes",
            get(sessoes::list_sessions).post(sessoes::start_session),
        )
        .route(
            "/sessoes/{id}",
            get(sessoes::get_session)
                .put(sessoes::finalize_session)
                .delete(sessoes::delete_session),
        )
        .route(
            "/sessoes/{id}/finalizar",
            put(sessoes::finalize_session_explicit),
        )
        .route(
            "/dadosConsumo",
            get(dados_consumo::list_readings).post(dados_consumo::create_reading),
        )
        .route(
            "/dadosConsumo/{id}",
            get(dados_consumo::get_reading)
                .put(dados_consumo::update_reading)
                .delete(dados_consumo::delete_reading),
        )
        .with_state(pool)
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
}
