use sqlx::PgPool;
use tracing::debug;

use crate::db::models::{NewSession, Session, SessionRow};

pub struct SessionDao<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionDao<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: &NewSession) -> Result<Session, sqlx::Error> {
        debug!(user_id = new.user_id, "Inserting session");
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            WITH s AS (
                INSERT INTO tb_sessao (id_usuario, inicio_sessao, fim_sessao)
                VALUES ($1, $2, NULL)
                RETURNING id_sessao, id_usuario, inicio_sessao, fim_sessao
            )
            SELECT s.id_sessao, s.id_usuario, s.inicio_sessao, s.fim_sessao,
                   u.id_usuario AS usuario_id, u.nome, u.email, u.senha, u.data_cadastro
            FROM s
            LEFT JOIN tb_usuario u ON u.id_usuario = s.id_usuario
            "#,
        )
        .bind(new.user_id)
        .bind(new.started_at)
        .fetch_one(self.pool)
        .await?;
        Ok(row.into())
    }

    /// Persists the user reference and both timestamps of `session`.
    pub async fn update(&self, session: &Session) -> Result<Option<Session>, sqlx::Error> {
        debug!(id = session.id, ended_at = ?session.ended_at, "Updating session");
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            WITH s AS (
                UPDATE tb_sessao
                SET id_usuario = $1,
                    inicio_sessao = $2,
                    fim_sessao = $3
                WHERE id_sessao = $4
                RETURNING id_sessao, id_usuario, inicio_sessao, fim_sessao
            )
            SELECT s.id_sessao, s.id_usuario, s.inicio_sessao, s.fim_sessao,
                   u.id_usuario AS usuario_id, u.nome, u.email, u.senha, u.data_cadastro
            FROM s
            LEFT JOIN tb_usuario u ON u.id_usuario = s.id_usuario
            "#,
        )
        .bind(session.user_id)
        .bind(session.started_at)
        .bind(session.ended_at)
        .bind(session.id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        debug!(id, "Deleting session");
        let result = sqlx::query("DELETE FROM tb_sessao WHERE id_sessao = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_all(&self) -> Result<Vec<Session>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT s.id_sessao, s.id_usuario, s.inicio_sessao, s.fim_sessao,
                   u.id_usuario AS usuario_id, u.nome, u.email, u.senha, u.data_cadastro
            FROM tb_sessao s
            LEFT JOIN tb_usuario u ON u.id_usuario = s.id_usuario
            ORDER BY s.id_sessao
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Session>, sqlx::Error> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT s.id_sessao, s.id_usuario, s.inicio_sessao, s.fim_sessao,
                   u.id_usuario AS usuario_id, u.nome, u.email, u.senha, u.data_cadastro
            FROM tb_sessao s
            LEFT JOIN tb_usuario u ON u.id_usuario = s.id_usuario
            WHERE s.id_sessao = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Into::into))
    }
}
