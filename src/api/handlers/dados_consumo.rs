use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;

use super::{created, Created};
use crate::{
    api::{
        dto::{ConsumptionDto, ConsumptionPayload},
        errors::AppError,
    },
    bo::ConsumptionBo,
};

/// Record an energy reading. `data_hora` defaults to now.
#[utoipa::path(
    post,
    path = "/dadosConsumo",
    request_body = ConsumptionPayload,
    responses(
        (status = 201, description = "Reading recorded", body = ConsumptionDto,
            headers(("Location" = String, description = "URL of the new reading"))),
        (status = 400, description = "Energy value not positive"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dadosConsumo"
)]
pub async fn create_reading(
    State(pool): State<PgPool>,
    Json(payload): Json<ConsumptionPayload>,
) -> Result<Created<ConsumptionDto>, AppError> {
    let reading = ConsumptionBo::new(&pool).insert(payload.into()).await?;
    Ok(created(format!("/dadosConsumo/{}", reading.id), reading.into()))
}

#[utoipa::path(
    put,
    path = "/dadosConsumo/{id}",
    params(("id" = i32, Path, description = "Reading id")),
    request_body = ConsumptionPayload,
    responses(
        (status = 200, description = "Reading updated", body = ConsumptionDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No such reading"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dadosConsumo"
)]
pub async fn update_reading(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
    Json(payload): Json<ConsumptionPayload>,
) -> Result<Json<ConsumptionDto>, AppError> {
    let reading = ConsumptionBo::new(&pool).update(id, payload.into()).await?;
    Ok(Json(reading.into()))
}

#[utoipa::path(
    delete,
    path = "/dadosConsumo/{id}",
    params(("id" = i32, Path, description = "Reading id")),
    responses(
        (status = 200, description = "Reading deleted"),
        (status = 400, description = "Non-positive id"),
        (status = 404, description = "No such reading"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dadosConsumo"
)]
pub async fn delete_reading(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    ConsumptionBo::new(&pool).delete(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/dadosConsumo",
    responses(
        (status = 200, description = "All readings", body = Vec<ConsumptionDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dadosConsumo"
)]
pub async fn list_readings(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<ConsumptionDto>>, AppError> {
    let readings = ConsumptionBo::new(&pool).list_all().await?;
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/dadosConsumo/{id}",
    params(("id" = i32, Path, description = "Reading id")),
    responses(
        (status = 200, description = "The reading, or null when absent", body = Option<ConsumptionDto>),
        (status = 400, description = "Non-positive id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dadosConsumo"
)]
pub async fn get_reading(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<Option<ConsumptionDto>>, AppError> {
    let reading = ConsumptionBo::new(&pool).find_by_id(id).await?;
    Ok(Json(reading.map(Into::into)))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use serde_json::{json, Value};
    use sqlx::PgPool;

    use crate::api::handlers::test_support::test_server;

    #[sqlx::test(migrations = "./migrations")]
    async fn create_then_get_round_trips(pool: PgPool) {
        let server = test_server(pool);
        let resp = server
            .post("/dadosConsumo")
            .json(&json!({ "consumo_energia": 3.5 }))
            .await;
        resp.assert_status(StatusCode::CREATED);
        let created: Value = resp.json();
        let id = created["id_consumo"].as_i64().unwrap();
        assert_eq!(resp.header(header::LOCATION), format!("/dadosConsumo/{id}"));

        let fetched: Value = server.get(&format!("/dadosConsumo/{id}")).await.json();
        assert_eq!(fetched, created);
        assert_eq!(fetched["consumo_energia"], 3.5);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn non_positive_energy_is_400_and_not_stored(pool: PgPool) {
        let server = test_server(pool);
        for energy in [0.0, -5.0] {
            let resp = server
                .post("/dadosConsumo")
                .json(&json!({ "consumo_energia": energy }))
                .await;
            resp.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(resp.json::<Value>()["error"], "validation_error");
        }

        let list: Vec<Value> = server.get("/dadosConsumo").await.json();
        assert!(list.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_changes_energy(pool: PgPool) {
        let server = test_server(pool);
        let created: Value = server
            .post("/dadosConsumo")
            .json(&json!({ "consumo_energia": 1.0, "data_hora": "2024-05-01T12:00:00Z" }))
            .await
            .json();
        let id = created["id_consumo"].as_i64().unwrap();

        let resp = server
            .put(&format!("/dadosConsumo/{id}"))
            .json(&json!({ "id_consumo": 77, "consumo_energia": 8.25 }))
            .await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert_eq!(body["id_consumo"], id);
        assert_eq!(body["consumo_energia"], 8.25);
        assert_eq!(body["data_hora"], created["data_hora"]);

        server
            .put(&format!("/dadosConsumo/{id}"))
            .json(&json!({ "consumo_energia": -1.0 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn delete_and_missing_lookups(pool: PgPool) {
        let server = test_server(pool);
        let created: Value = server
            .post("/dadosConsumo")
            .json(&json!({ "consumo_energia": 2.0 }))
            .await
            .json();
        let id = created["id_consumo"].as_i64().unwrap();

        server.delete(&format!("/dadosConsumo/{id}")).await.assert_status_ok();
        server
            .delete(&format!("/dadosConsumo/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server.get("/dadosConsumo/0").await.assert_status(StatusCode::BAD_REQUEST);
    }
}
