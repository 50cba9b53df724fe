use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Caller-facing API keys. `status` is "active" or "inactive"; `user_type`
/// is the subscription tier ("free", "silver", "gold").
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_api_keys")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_api_key: String,
    pub user_type: String,
    pub status: String,
    pub user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
