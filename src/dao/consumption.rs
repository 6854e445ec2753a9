use sqlx::PgPool;
use tracing::debug;

use crate::db::models::{ConsumptionInput, ConsumptionReading};

pub struct ConsumptionDao<'a> {
    pool: &'a PgPool,
}

impl<'a> ConsumptionDao<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: &ConsumptionInput) -> Result<ConsumptionReading, sqlx::Error> {
        debug!(energy = input.energy, "Inserting consumption reading");
        sqlx::query_as::<_, ConsumptionReading>(
            r#"
            INSERT INTO tb_dados_consumo (data_hora, consumo_energia)
            VALUES (COALESCE($1, now()), $2)
            RETURNING id_consumo, data_hora, consumo_energia
            "#,
        )
        .bind(input.recorded_at)
        .bind(input.energy)
        .fetch_one(self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: i32,
        input: &ConsumptionInput,
    ) -> Result<Option<ConsumptionReading>, sqlx::Error> {
        debug!(id, energy = input.energy, "Updating consumption reading");
        sqlx::query_as::<_, ConsumptionReading>(
            r#"
            UPDATE tb_dados_consumo
            SET data_hora = COALESCE($1, data_hora),
                consumo_energia = $2
            WHERE id_consumo = $3
            RETURNING id_consumo, data_hora, consumo_energia
            "#,
        )
        .bind(input.recorded_at)
        .bind(input.energy)
        .bind(id)
        .fetch_optional(self.pool)
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        debug!(id, "Deleting consumption reading");
        let result = sqlx::query("DELETE FROM tb_dados_consumo WHERE id_consumo = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_all(&self) -> Result<Vec<ConsumptionReading>, sqlx::Error> {
        sqlx::query_as::<_, ConsumptionReading>(
            r#"
            SELECT id_consumo, data_hora, consumo_energia
            FROM tb_dados_consumo
            ORDER BY id_consumo
            "#,
        )
        .fetch_all(self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ConsumptionReading>, sqlx::Error> {
        sqlx::query_as::<_, ConsumptionReading>(
            r#"
            SELECT id_consumo, data_hora, consumo_energia
            FROM tb_dados_consumo
            WHERE id_consumo = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
    }
}
