//! Account entity: login credentials, role and cumulative traffic counters.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role classifier. Stored as text so that ascending order lists admins first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "user")]
    User,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub pass: String,
    #[sea_orm(indexed)]
    pub con_pass: String,
    /// Traffic quota in bytes, `-1` for unlimited.
    pub quota: i64,
    pub download: i64,
    pub upload: i64,
    pub expire_time: DateTimeUtc,
    pub device_no: i64,
    pub kick_util_time: DateTimeUtc,
    pub role: Role,
    pub deleted: bool,
    pub create_time: DateTimeUtc,
    pub update_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the account has no traffic quota.
    pub fn has_unlimited_quota(&self) -> bool {
        self.quota == crate::constants::UNLIMITED_QUOTA
    }

    /// Download and upload combined.
    pub fn total_traffic(&self) -> i64 {
        self.download.saturating_add(self.upload)
    }
}
