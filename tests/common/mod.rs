#![allow(dead_code)]

use chrono::{Duration, Utc};
use hui_dao::account::{self, Role};
use hui_dao::config_entry;
use hui_dao::constants::UNLIMITED_QUOTA;
use hui_dao::storage::Storage;
use sea_orm::ActiveValue::Set;

pub async fn storage() -> Storage {
    Storage::connect_memory().await.expect("in-memory storage should open")
}

pub fn new_account(username: &str, con_pass: &str, role: Role) -> account::ActiveModel {
    let now = Utc::now();
    account::ActiveModel {
        username: Set(username.to_string()),
        pass: Set(format!("{username}-secret")),
        con_pass: Set(con_pass.to_string()),
        quota: Set(UNLIMITED_QUOTA),
        download: Set(0),
        upload: Set(0),
        expire_time: Set(now + Duration::days(30)),
        device_no: Set(3),
        kick_util_time: Set(now),
        role: Set(role),
        deleted: Set(false),
        ..Default::default()
    }
}

pub fn new_entry(key: &str, value: &str) -> config_entry::ActiveModel {
    config_entry::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        ..Default::default()
    }
}
