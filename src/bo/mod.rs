//! Business objects: validate input, then delegate to the matching DAO.

pub mod consumption;
pub mod device;
pub mod session;
pub mod user;

pub use consumption::ConsumptionBo;
pub use device::DeviceBo;
pub use session::SessionBo;
pub use user::UserBo;

use crate::error::{ServiceError, ServiceResult};

/// Rejects ids that can never name a stored row.
pub(crate) fn require_positive_id(entity: &'static str, id: i32) -> ServiceResult<()> {
    if id <= 0 {
        return Err(ServiceError::validation(format!("{entity} id must be positive, got {id}")));
    }
    Ok(())
}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> ServiceResult<()> {
    if value.is_empty() {
        return Err(ServiceError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_ids_are_rejected() {
        for id in [0, -1, i32::MIN] {
            let err = require_positive_id("device", id).unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
        assert!(require_positive_id("device", 1).is_ok());
    }

    #[test]
    fn empty_field_message_names_the_field() {
        let err = require_non_empty("nome", "").unwrap_err();
        assert_eq!(err.to_string(), "nome cannot be empty");
        assert!(require_non_empty("nome", "x").is_ok());
    }
}
