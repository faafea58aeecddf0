use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageInput {
    pub url: String,
}

/// Create/replace body for a product. Every field is optional at the serde
/// level; `validate` enforces presence in a fixed order so the first missing
/// field wins, with the message clients already display verbatim.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProductRequest {
    pub name: Option<String>,
    pub images: Option<Vec<ImageInput>>,
    pub price: Option<i64>,
    pub category_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub make_id: Option<Uuid>,
    pub year_id: Option<Uuid>,
    pub condition_id: Option<Uuid>,
    pub drive_type_id: Option<Uuid>,
    pub engine_volume_id: Option<Uuid>,
    pub fuel_type_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub model_id: Option<Uuid>,
    pub option_id: Option<Uuid>,
    pub passenger_id: Option<Uuid>,
    pub steering_id: Option<Uuid>,
    pub transmission_id: Option<Uuid>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

#[derive(Debug)]
pub struct ValidProduct {
    pub name: String,
    pub images: Vec<ImageInput>,
    pub price: i64,
    pub category_id: Uuid,
    pub color_id: Uuid,
    pub make_id: Uuid,
    pub year_id: Uuid,
    pub condition_id: Uuid,
    pub drive_type_id: Uuid,
    pub engine_volume_id: Uuid,
    pub fuel_type_id: Uuid,
    pub location_id: Uuid,
    pub model_id: Uuid,
    pub option_id: Uuid,
    pub passenger_id: Uuid,
    pub steering_id: Uuid,
    pub transmission_id: Uuid,
    pub is_featured: bool,
    pub is_archived: bool,
}

fn required<T>(value: Option<T>, message: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::BadRequest(message.to_string()))
}

impl UpsertProductRequest {
    pub fn validate(self) -> Result<ValidProduct, AppError> {
        let name = required(self.name.filter(|n| !n.is_empty()), "Name is required")?;
        let images = required(
            self.images.filter(|i| !i.is_empty()),
            "Images are required",
        )?;
        let price = required(self.price, "Price is required")?;
        let category_id = required(self.category_id, "Category id is required")?;
        let color_id = required(self.color_id, "Color id is required")?;
        let make_id = required(self.make_id, "Make id is required")?;
        let year_id = required(self.year_id, "Year id is required")?;
        let condition_id = required(self.condition_id, "Condition id is required")?;
        let drive_type_id = required(self.drive_type_id, "Drive Type id is required")?;
        let engine_volume_id = required(self.engine_volume_id, "Engine Volume id is required")?;
        let fuel_type_id = required(self.fuel_type_id, "Fuel Type id is required")?;
        let location_id = required(self.location_id, "Location id is required")?;
        let model_id = required(self.model_id, "Model id is required")?;
        let option_id = required(self.option_id, "Option id is required")?;
        let passenger_id = required(self.passenger_id, "Passenger id is required")?;
        let steering_id = required(self.steering_id, "Steering id is required")?;
        let transmission_id = required(self.transmission_id, "Transmission id is required")?;

        Ok(ValidProduct {
            name,
            images,
            price,
            category_id,
            color_id,
            make_id,
            year_id,
            condition_id,
            drive_type_id,
            engine_volume_id,
            fuel_type_id,
            location_id,
            model_id,
            option_id,
            passenger_id,
            steering_id,
            transmission_id,
            is_featured: self.is_featured.unwrap_or(false),
            is_archived: self.is_archived.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> UpsertProductRequest {
        UpsertProductRequest {
            name: Some("Land Cruiser 300".into()),
            images: Some(vec![ImageInput {
                url: "https://cdn.example/lc300.jpg".into(),
            }]),
            price: Some(85_000),
            category_id: Some(Uuid::new_v4()),
            color_id: Some(Uuid::new_v4()),
            make_id: Some(Uuid::new_v4()),
            year_id: Some(Uuid::new_v4()),
            condition_id: Some(Uuid::new_v4()),
            drive_type_id: Some(Uuid::new_v4()),
            engine_volume_id: Some(Uuid::new_v4()),
            fuel_type_id: Some(Uuid::new_v4()),
            location_id: Some(Uuid::new_v4()),
            model_id: Some(Uuid::new_v4()),
            option_id: Some(Uuid::new_v4()),
            passenger_id: Some(Uuid::new_v4()),
            steering_id: Some(Uuid::new_v4()),
            transmission_id: Some(Uuid::new_v4()),
            is_featured: None,
            is_archived: None,
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::BadRequest(msg) => msg,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn full_request_passes() {
        let valid = full_request().validate().unwrap();
        assert_eq!(valid.name, "Land Cruiser 300");
        assert!(!valid.is_featured);
        assert!(!valid.is_archived);
    }

    #[test]
    fn first_missing_field_wins() {
        // Omit both price and make; the fixed order reports price first.
        let mut req = full_request();
        req.price = None;
        req.make_id = None;
        assert_eq!(message(req.validate().unwrap_err()), "Price is required");
    }

    #[test]
    fn empty_images_rejected() {
        let mut req = full_request();
        req.images = Some(vec![]);
        assert_eq!(message(req.validate().unwrap_err()), "Images are required");
    }

    #[test]
    fn name_precedes_everything() {
        let err = UpsertProductRequest::default().validate().unwrap_err();
        assert_eq!(message(err), "Name is required");
    }

    #[test]
    fn each_reference_id_has_its_own_message() {
        let mut req = full_request();
        req.drive_type_id = None;
        assert_eq!(
            message(req.validate().unwrap_err()),
            "Drive Type id is required"
        );

        let mut req = full_request();
        req.engine_volume_id = None;
        assert_eq!(
            message(req.validate().unwrap_err()),
            "Engine Volume id is required"
        );

        let mut req = full_request();
        req.transmission_id = None;
        assert_eq!(
            message(req.validate().unwrap_err()),
            "Transmission id is required"
        );
    }
}
