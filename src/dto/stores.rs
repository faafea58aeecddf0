use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertStoreRequest {
    pub name: Option<String>,
}

impl UpsertStoreRequest {
    pub fn validate(self) -> Result<String, AppError> {
        match self.name.filter(|n| !n.is_empty()) {
            Some(name) => Ok(name),
            None => Err(AppError::BadRequest("Name is required".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_rejected() {
        let err = UpsertStoreRequest { name: None }.validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Name is required"));
    }

    #[test]
    fn empty_name_rejected() {
        let err = UpsertStoreRequest {
            name: Some(String::new()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
