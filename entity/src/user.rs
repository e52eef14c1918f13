use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User account, either local (password) or linked to an OAuth provider.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// The password in hashed PHC form, as represented in the database. `None` for OAuth accounts.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub is_cadenza: bool,
    pub is_admin: bool,
    pub auth_provider: Option<String>,
    pub auth_provider_id: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::blog::Entity")]
    Blog,
}

impl Related<super::blog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Blog.def()
    }
}

timestamped_behavior!();
