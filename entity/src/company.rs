use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub logo_url: Option<String>,
    pub category: String,
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub verified: bool,
    pub stage: Option<String>,
    pub website: Option<String>,
    pub founded_year: Option<i32>,
    pub employee_count: Option<String>,
    pub funding_stage: Option<String>,
    pub total_funding: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub investor_information: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub product_description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub business_model: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub target_market: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub competitive_landscape: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub traction_metrics: Option<String>,
    pub traction_score: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

timestamped_behavior!();
