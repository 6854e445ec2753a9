use sqlx::PgPool;
use tracing::info;

use super::require_positive_id;
use crate::{
    dao::ConsumptionDao,
    db::models::{ConsumptionInput, ConsumptionReading},
    error::{ServiceError, ServiceResult},
};

pub struct ConsumptionBo<'a> {
    dao: ConsumptionDao<'a>,
}

impl<'a> ConsumptionBo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { dao: ConsumptionDao::new(pool) }
    }

    pub async fn insert(&self, input: ConsumptionInput) -> ServiceResult<ConsumptionReading> {
        validate_consumption(&input)?;
        let reading = self.dao.insert(&input).await?;
        info!(id = reading.id, energy = reading.energy, "Consumption recorded");
        Ok(reading)
    }

    pub async fn update(&self, id: i32, input: ConsumptionInput) -> ServiceResult<ConsumptionReading> {
        require_positive_id("consumption reading", id)?;
        validate_consumption(&input)?;
        let reading = self
            .dao
            .update(id, &input)
            .await?
            .ok_or_else(|| ServiceError::not_found("consumption reading", id))?;
        info!(id, energy = reading.energy, "Consumption updated");
        Ok(reading)
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        require_positive_id("consumption reading", id)?;
        if !self.dao.delete(id).await? {
            return Err(ServiceError::not_found("consumption reading", id));
        }
        info!(id, "Consumption deleted");
        Ok(())
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<ConsumptionReading>> {
        Ok(self.dao.list_all().await?)
    }

    pub async fn find_by_id(&self, id: i32) -> ServiceResult<Option<ConsumptionReading>> {
        require_positive_id("consumption reading", id)?;
        Ok(self.dao.find_by_id(id).await?)
    }
}

pub fn validate_consumption(input: &ConsumptionInput) -> ServiceResult<()> {
    if !(input.energy.is_finite() && input.energy > 0.0) {
        return Err(ServiceError::validation("consumo_energia must be a positive number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;

    fn input(energy: f64) -> ConsumptionInput {
        ConsumptionInput { energy, recorded_at: None }
    }

    #[test]
    fn energy_must_be_positive() {
        assert!(validate_consumption(&input(0.01)).is_ok());
        for energy in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(validate_consumption(&input(energy)).is_err(), "{energy} accepted");
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn insert_then_find_returns_same_energy(pool: PgPool) {
        let bo = ConsumptionBo::new(&pool);
        let created = bo.insert(input(42.75)).await.unwrap();
        let found = bo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.energy, 42.75);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn rejected_insert_writes_nothing(pool: PgPool) {
        let bo = ConsumptionBo::new(&pool);
        for energy in [0.0, -5.0] {
            let err = bo.insert(input(energy)).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
        assert!(bo.list_all().await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn find_rejects_non_positive_id(pool: PgPool) {
        let bo = ConsumptionBo::new(&pool);
        assert!(matches!(bo.find_by_id(0).await.unwrap_err(), ServiceError::Validation(_)));
    }
}
