use sqlx::PgPool;
use tracing::debug;

use crate::db::models::{Device, DeviceInput};

pub struct DeviceDao<'a> {
    pool: &'a PgPool,
}

impl<'a> DeviceDao<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: &DeviceInput) -> Result<Device, sqlx::Error> {
        debug!(name = %input.name, kind = %input.kind, "Inserting device");
        sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO tb_dispositivo (nome_dispositivo, tipo_dispositivo, status, data_cadastro)
            VALUES ($1, $2, $3, COALESCE($4, now()))
            RETURNING id_dispositivo, nome_dispositivo, tipo_dispositivo, status, data_cadastro
            "#,
        )
        .bind(&input.name)
        .bind(&input.kind)
        .bind(input.status)
        .bind(input.registered_at)
        .fetch_one(self.pool)
        .await
    }

    /// Overwrites every writable column; `None` when no device has `id`.
    pub async fn update(&self, id: i32, input: &DeviceInput) -> Result<Option<Device>, sqlx::Error> {
        debug!(id, status = ?input.status, "Updating device");
        sqlx::query_as::<_, Device>(
            r#"
            UPDATE tb_dispositivo
            SET nome_dispositivo = $1,
                tipo_dispositivo = $2,
                status = $3,
                data_cadastro = COALESCE($4, data_cadastro)
            WHERE id_dispositivo = $5
            RETURNING id_dispositivo, nome_dispositivo, tipo_dispositivo, status, data_cadastro
            "#,
        )
        .bind(&input.name)
        .bind(&input.kind)
        .bind(input.status)
        .bind(input.registered_at)
        .bind(id)
        .fetch_optional(self.pool)
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        debug!(id, "Deleting device");
        let result = sqlx::query("DELETE FROM tb_dispositivo WHERE id_dispositivo = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_all(&self) -> Result<Vec<Device>, sqlx::Error> {
        sqlx::query_as::<_, Device>(
            r#"
            SELECT id_dispositivo, nome_dispositivo, tipo_dispositivo, status, data_cadastro
            FROM tb_dispositivo
            ORDER BY id_dispositivo
            "#,
        )
        .fetch_all(self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Device>, sqlx::Error> {
        sqlx::query_as::<_, Device>(
            r#"
            SELECT id_dispositivo, nome_dispositivo, tipo_dispositivo, status, data_cadastro
            FROM tb_dispositivo
            WHERE id_dispositivo = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::db::models::DeviceStatus;

    fn input(status: Option<DeviceStatus>) -> DeviceInput {
        DeviceInput {
            name: "Geladeira".into(),
            kind: "eletrodomestico".into(),
            status,
            registered_at: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn insert_then_find_by_id_round_trips(pool: PgPool) {
        let dao = DeviceDao::new(&pool);
        let created = dao.insert(&input(Some(DeviceStatus::Active))).await.unwrap();

        let found = dao.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.status, Some(DeviceStatus::Active));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn unset_status_maps_to_none(pool: PgPool) {
        let dao = DeviceDao::new(&pool);
        let created = dao.insert(&input(None)).await.unwrap();
        let found = dao.find_by_id(created.id).await.unwrap().unwrap();
        assert!(found.status.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn list_all_orders_by_id(pool: PgPool) {
        let dao = DeviceDao::new(&pool);
        let a = dao.insert(&input(None)).await.unwrap();
        let b = dao.insert(&input(None)).await.unwrap();

        let ids: Vec<i32> = dao.list_all().await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn delete_removes_row(pool: PgPool) {
        let dao = DeviceDao::new(&pool);
        let created = dao.insert(&input(None)).await.unwrap();

        assert!(dao.delete(created.id).await.unwrap());
        assert!(dao.find_by_id(created.id).await.unwrap().is_none());
        assert!(!dao.delete(created.id).await.unwrap());
    }
}
