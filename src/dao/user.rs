use sqlx::PgPool;
use tracing::debug;

use crate::db::models::{User, UserInput};

pub struct UserDao<'a> {
    pool: &'a PgPool,
}

impl<'a> UserDao<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: &UserInput) -> Result<User, sqlx::Error> {
        debug!(email = %input.email, "Inserting user");
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO tb_usuario (nome, email, senha, data_cadastro)
            VALUES ($1, $2, $3, COALESCE($4, now()))
            RETURNING id_usuario, nome, email, senha, data_cadastro
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password)
        .bind(input.registered_at)
        .fetch_one(self.pool)
        .await
    }

    /// Returns `None` when no user has `id`.
    pub async fn update(&self, id: i32, input: &UserInput) -> Result<Option<User>, sqlx::Error> {
        debug!(id, "Updating user");
        sqlx::query_as::<_, User>(
            r#"
            UPDATE tb_usuario
            SET nome = $1,
                email = $2,
                senha = $3,
                data_cadastro = COALESCE($4, data_cadastro)
            WHERE id_usuario = $5
            RETURNING id_usuario, nome, email, senha, data_cadastro
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password)
        .bind(input.registered_at)
        .bind(id)
        .fetch_optional(self.pool)
        .await
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        debug!(id, "Deleting user");
        let result = sqlx::query("DELETE FROM tb_usuario WHERE id_usuario = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id_usuario, nome, email, senha, data_cadastro
            FROM tb_usuario
            ORDER BY id_usuario
            "#,
        )
        .fetch_all(self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id_usuario, nome, email, senha, data_cadastro
            FROM tb_usuario
            WHERE id_usuario = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id_usuario, nome, email, senha, data_cadastro
            FROM tb_usuario
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;

    fn input(email: &str) -> UserInput {
        UserInput {
            name: "Ana Souza".into(),
            email: email.into(),
            password: "s3cret".into(),
            registered_at: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn insert_then_find_by_id_round_trips(pool: PgPool) {
        let dao = UserDao::new(&pool);
        let created = dao.insert(&input("ana@example.com")).await.unwrap();
        assert!(created.id > 0);

        let found = dao.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn find_by_email_returns_none_for_unknown(pool: PgPool) {
        let dao = UserDao::new(&pool);
        dao.insert(&input("ana@example.com")).await.unwrap();

        assert!(dao.find_by_email("bob@example.com").await.unwrap().is_none());
        let found = dao.find_by_email("ana@example.com").await.unwrap().unwrap();
        assert_eq!(found.name, "Ana Souza");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_keeps_registration_date_when_omitted(pool: PgPool) {
        let dao = UserDao::new(&pool);
        let created = dao.insert(&input("ana@example.com")).await.unwrap();

        let mut changes = input("ana.souza@example.com");
        changes.name = "Ana S.".into();
        let updated = dao.update(created.id, &changes).await.unwrap().unwrap();

        assert_eq!(updated.name, "Ana S.");
        assert_eq!(updated.email, "ana.souza@example.com");
        assert_eq!(updated.registered_at, created.registered_at);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_and_delete_report_missing_rows(pool: PgPool) {
        let dao = UserDao::new(&pool);
        assert!(dao.update(42, &input("x@example.com")).await.unwrap().is_none());
        assert!(!dao.delete(42).await.unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn duplicate_email_is_a_database_error(pool: PgPool) {
        let dao = UserDao::new(&pool);
        dao.insert(&input("ana@example.com")).await.unwrap();
        let err = dao.insert(&input("ana@example.com")).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::Database(ref db) if db.is_unique_violation()));
    }
}
