use serde::Deserialize;
use utoipa::ToSchema;

use crate::{error::AppError, reference::ReferenceMeta};

/// Body for creating or replacing a reference row. Fields arrive optional so
/// presence can be validated one at a time with the exact legacy messages;
/// serde-level rejection would surface a different error shape.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertReferenceRequest {
    pub name: Option<String>,
    pub image_url: Option<String>,
}

/// The validated form: name always present, image URL present for makes.
#[derive(Debug)]
pub struct ValidReference {
    pub name: String,
    pub image_url: Option<String>,
}

impl UpsertReferenceRequest {
    pub fn validate(self, meta: &ReferenceMeta) -> Result<ValidReference, AppError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?;

        let image_url = if meta.has_image_url {
            let url = self
                .image_url
                .filter(|u| !u.is_empty())
                .ok_or_else(|| AppError::BadRequest("Image URL is required".to_string()))?;
            Some(url)
        } else {
            None
        };

        Ok(ValidReference { name, image_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference;

    #[test]
    fn name_checked_first() {
        let err = UpsertReferenceRequest {
            name: None,
            image_url: None,
        }
        .validate(&reference::MAKES)
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Name is required"));
    }

    #[test]
    fn make_requires_image_url() {
        let err = UpsertReferenceRequest {
            name: Some("Toyota".into()),
            image_url: None,
        }
        .validate(&reference::MAKES)
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Image URL is required"));
    }

    #[test]
    fn plain_entity_ignores_image_url() {
        let valid = UpsertReferenceRequest {
            name: Some("Diesel".into()),
            image_url: Some("https://cdn.example/ignored.png".into()),
        }
        .validate(&reference::FUEL_TYPES)
        .unwrap();
        assert_eq!(valid.name, "Diesel");
        assert!(valid.image_url.is_none());
    }
}
