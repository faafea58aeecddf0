use sea_orm::entity::prelude::*;

// The reference foreign keys are plain columns here; those tables are managed
// through the generic sqlx layer and the database enforces the constraints.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub price: i64,
    pub is_featured: bool,
    pub is_archived: bool,
    pub category_id: Uuid,
    pub color_id: Uuid,
    pub condition_id: Uuid,
    pub drive_type_id: Uuid,
    pub engine_volume_id: Uuid,
    pub fuel_type_id: Uuid,
    pub location_id: Uuid,
    pub make_id: Uuid,
    pub model_id: Uuid,
    pub option_id: Uuid,
    pub passenger_id: Uuid,
    pub steering_id: Uuid,
    pub transmission_id: Uuid,
    pub year_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stores::Entity",
        from = "Column::StoreId",
        to = "super::stores::Column::Id"
    )]
    Stores,
    #[sea_orm(has_many = "super::images::Entity")]
    Images,
}

impl Related<super::stores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stores.def()
    }
}

impl Related<super::images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
