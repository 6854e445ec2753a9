use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use super::require_positive_id;
use crate::{
    dao::{SessionDao, UserDao},
    db::models::{NewSession, Session},
    error::{ServiceError, ServiceResult},
};

/// Sessions move `uninitiated -> active -> finalized` and never back.
pub struct SessionBo<'a> {
    dao: SessionDao<'a>,
    users: UserDao<'a>,
}

impl<'a> SessionBo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            dao: SessionDao::new(pool),
            users: UserDao::new(pool),
        }
    }

    /// Opens a session for `user_id`, stamping the start time.
    pub async fn start(&self, user_id: Option<i32>) -> ServiceResult<Session> {
        let user_id = user_id.ok_or_else(|| ServiceError::validation("usuario is required"))?;
        require_positive_id("user", user_id)?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("user", user_id));
        }

        let session = self
            .dao
            .insert(&NewSession {
                user_id,
                started_at: Utc::now(),
            })
            .await?;
        info!(id = session.id, user_id, "Session started");
        Ok(session)
    }

    /// Stamps the end time. Calling it again overwrites the previous end time.
    pub async fn finalize(&self, id: i32) -> ServiceResult<Session> {
        require_positive_id("session", id)?;
        let mut session = self
            .dao
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("session", id))?;
        session.ended_at = Some(Utc::now());

        let session = self
            .dao
            .update(&session)
            .await?
            .ok_or_else(|| ServiceError::not_found("session", id))?;
        info!(id, "Session finalized");
        Ok(session)
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        require_positive_id("session", id)?;
        if !self.dao.delete(id).await? {
            return Err(ServiceError::not_found("session", id));
        }
        info!(id, "Session deleted");
        Ok(())
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<Session>> {
        Ok(self.dao.list_all().await?)
    }

    pub async fn find_by_id(&self, id: i32) -> ServiceResult<Option<Session>> {
        require_positive_id("session", id)?;
        Ok(self.dao.find_by_id(id).await?)
    }
}
