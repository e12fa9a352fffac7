use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "searches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: String, // SQLite stores CURRENT_TIMESTAMP as "YYYY-MM-DD HH:MM:SS"
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_magnitude: f64,
    pub max_magnitude: Option<f64>,
    #[sea_orm(column_type = "Text")]
    pub raw_response: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
