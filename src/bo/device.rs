use sqlx::PgPool;
use tracing::info;

use super::{require_non_empty, require_positive_id};
use crate::{
    dao::DeviceDao,
    db::models::{Device, DeviceInput, DeviceStatus},
    error::{ServiceError, ServiceResult},
};

pub struct DeviceBo<'a> {
    dao: DeviceDao<'a>,
}

impl<'a> DeviceBo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { dao: DeviceDao::new(pool) }
    }

    pub async fn insert(&self, input: DeviceInput) -> ServiceResult<Device> {
        validate_device(&input)?;
        let device = self.dao.insert(&input).await?;
        info!(id = device.id, name = %device.name, "Device registered");
        Ok(device)
    }

    pub async fn update(&self, id: i32, input: DeviceInput) -> ServiceResult<Device> {
        require_positive_id("device", id)?;
        validate_device(&input)?;
        let device = self
            .dao
            .update(id, &input)
            .await?
            .ok_or_else(|| ServiceError::not_found("device", id))?;
        info!(id, "Device updated");
        Ok(device)
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        require_positive_id("device", id)?;
        if !self.dao.delete(id).await? {
            return Err(ServiceError::not_found("device", id));
        }
        info!(id, "Device deleted");
        Ok(())
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<Device>> {
        Ok(self.dao.list_all().await?)
    }

    pub async fn find_by_id(&self, id: i32) -> ServiceResult<Option<Device>> {
        require_positive_id("device", id)?;
        Ok(self.dao.find_by_id(id).await?)
    }

    pub async fn activate(&self, id: i32) -> ServiceResult<Device> {
        self.set_status(id, DeviceStatus::Active).await
    }

    pub async fn deactivate(&self, id: i32) -> ServiceResult<Device> {
        self.set_status(id, DeviceStatus::Inactive).await
    }

    async fn set_status(&self, id: i32, status: DeviceStatus) -> ServiceResult<Device> {
        require_positive_id("device", id)?;
        let mut device = self
            .dao
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("device", id))?;
        device.status = Some(status);

        let device = self
            .dao
            .update(id, &DeviceInput::from(device))
            .await?
            .ok_or_else(|| ServiceError::not_found("device", id))?;
        info!(id, status = %status, "Device status changed");
        Ok(device)
    }
}

pub fn validate_device(input: &DeviceInput) -> ServiceResult<()> {
    require_non_empty("nome_dispositivo", &input.name)?;
    require_non_empty("tipo_dispositivo", &input.kind)?;
    Ok(())
}
