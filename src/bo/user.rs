use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::PgPool;
use tracing::{info, warn};

use super::{require_non_empty, require_positive_id};
use crate::{
    dao::UserDao,
    db::models::{User, UserInput},
    error::{ServiceError, ServiceResult},
};

/// `local@domain`; no TLD required.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").expect("invalid email regex")
});

pub struct UserBo<'a> {
    dao: UserDao<'a>,
}

impl<'a> UserBo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { dao: UserDao::new(pool) }
    }

    pub async fn insert(&self, input: UserInput) -> ServiceResult<User> {
        validate_user(&input)?;
        let user = self.dao.insert(&input).await?;
        info!(id = user.id, email = %user.email, "User registered");
        Ok(user)
    }

    pub async fn update(&self, id: i32, input: UserInput) -> ServiceResult<User> {
        require_positive_id("user", id)?;
        validate_user(&input)?;
        let user = self
            .dao
            .update(id, &input)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))?;
        info!(id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        require_positive_id("user", id)?;
        if !self.dao.delete(id).await? {
            return Err(ServiceError::not_found("user", id));
        }
        info!(id, "User deleted");
        Ok(())
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<User>> {
        Ok(self.dao.list_all().await?)
    }

    pub async fn find_by_id(&self, id: i32) -> ServiceResult<Option<User>> {
        require_positive_id("user", id)?;
        Ok(self.dao.find_by_id(id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        Ok(self.dao.find_by_email(email).await?)
    }

    /// Plaintext credential check. An unknown email and a wrong password are
    /// indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<User> {
        match self.dao.find_by_email(email).await? {
            Some(user) if user.password == password => {
                info!(id = user.id, "User logged in");
                Ok(user)
            }
            _ => {
                warn!(email = %email, "Rejected login attempt");
                Err(ServiceError::InvalidCredentials)
            }
        }
    }
}

pub fn validate_user(input: &UserInput) -> ServiceResult<()> {
    require_non_empty("nome", &input.name)?;
    require_non_empty("email", &input.email)?;
    if !EMAIL_RE.is_match(&input.email) {
        return Err(ServiceError::validation("email must be a valid address"));
    }
    require_non_empty("senha", &input.password)?;
    Ok(())
}
