//! Account repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, Iterable,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Value,
};

use crate::entities::account::{self, Role};
use crate::error::{DaoError, DaoResult};
use crate::repositories::pagination::PageScope;

/// Conjunction of optional clauses selecting accounts.
///
/// An empty filter matches every row, soft-deleted ones included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub id: Option<i64>,
    pub ids: Option<Vec<i64>>,
    pub username: Option<String>,
    pub con_pass: Option<String>,
    pub role: Option<Role>,
    pub deleted: Option<bool>,
}

impl AccountFilter {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn by_con_pass(con_pass: impl Into<String>) -> Self {
        Self {
            con_pass: Some(con_pass.into()),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = Some(deleted);
        self
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(id) = self.id {
            condition = condition.add(account::Column::Id.eq(id));
        }
        if let Some(ids) = &self.ids {
            condition = condition.add(account::Column::Id.is_in(ids.iter().copied()));
        }
        if let Some(username) = &self.username {
            condition = condition.add(account::Column::Username.eq(username.as_str()));
        }
        if let Some(con_pass) = &self.con_pass {
            condition = condition.add(account::Column::ConPass.eq(con_pass.as_str()));
        }
        if let Some(role) = self.role {
            condition = condition.add(account::Column::Role.eq(role));
        }
        if let Some(deleted) = self.deleted {
            condition = condition.add(account::Column::Deleted.eq(deleted));
        }
        condition
    }
}

/// Paged account listing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountPageQuery {
    /// Substring matched against the username. Empty means no constraint.
    pub username: Option<String>,
    pub deleted: Option<bool>,
    pub page_num: u64,
    pub page_size: u64,
}

impl AccountPageQuery {
    pub fn new(page_num: u64, page_size: u64) -> Self {
        Self {
            username: None,
            deleted: None,
            page_num,
            page_size,
        }
    }

    pub fn scope(&self) -> PageScope {
        PageScope::new(self.page_num, self.page_size)
    }
}

/// Account columns that may be changed by a partial update.
///
/// Traffic counters only move through [`AccountRepository::accrue_traffic`].
#[derive(Clone, Debug, PartialEq)]
pub enum AccountField {
    Username(String),
    Pass(String),
    ConPass(String),
    Quota(i64),
    ExpireTime(DateTime<Utc>),
    DeviceNo(i64),
    KickUtilTime(DateTime<Utc>),
    Role(Role),
    Deleted(bool),
}

impl AccountField {
    pub fn column(&self) -> account::Column {
        match self {
            Self::Username(_) => account::Column::Username,
            Self::Pass(_) => account::Column::Pass,
            Self::ConPass(_) => account::Column::ConPass,
            Self::Quota(_) => account::Column::Quota,
            Self::ExpireTime(_) => account::Column::ExpireTime,
            Self::DeviceNo(_) => account::Column::DeviceNo,
            Self::KickUtilTime(_) => account::Column::KickUtilTime,
            Self::Role(_) => account::Column::Role,
            Self::Deleted(_) => account::Column::Deleted,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Username(v) | Self::Pass(v) | Self::ConPass(v) => v.into(),
            Self::Quota(v) | Self::DeviceNo(v) => v.into(),
            Self::ExpireTime(v) | Self::KickUtilTime(v) => v.into(),
            Self::Role(v) => v.into(),
            Self::Deleted(v) => v.into(),
        }
    }
}

/// Set of field assignments applied by [`AccountRepository::update`].
///
/// Assigning the same column twice keeps the last value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountUpdate {
    fields: Vec<AccountField>,
}

impl AccountUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: AccountField) -> Self {
        self.fields
            .retain(|existing| std::mem::discriminant(existing) != std::mem::discriminant(&field));
        self.fields.push(field);
        self
    }

    pub fn username(self, username: impl Into<String>) -> Self {
        self.set(AccountField::Username(username.into()))
    }

    pub fn pass(self, pass: impl Into<String>) -> Self {
        self.set(AccountField::Pass(pass.into()))
    }

    pub fn con_pass(self, con_pass: impl Into<String>) -> Self {
        self.set(AccountField::ConPass(con_pass.into()))
    }

    pub fn quota(self, quota: i64) -> Self {
        self.set(AccountField::Quota(quota))
    }

    pub fn expire_time(self, expire_time: DateTime<Utc>) -> Self {
        self.set(AccountField::ExpireTime(expire_time))
    }

    pub fn device_no(self, device_no: i64) -> Self {
        self.set(AccountField::DeviceNo(device_no))
    }

    pub fn kick_util_time(self, kick_util_time: DateTime<Utc>) -> Self {
        self.set(AccountField::KickUtilTime(kick_util_time))
    }

    pub fn role(self, role: Role) -> Self {
        self.set(AccountField::Role(role))
    }

    pub fn deleted(self, deleted: bool) -> Self {
        self.set(AccountField::Deleted(deleted))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[AccountField] {
        &self.fields
    }
}

/// Repository for account-related database operations.
pub struct AccountRepository;

impl AccountRepository {
    /// Insert an account, or replace the stored row when `id` is set and exists.
    ///
    /// `create_time` is stamped when left unset and is kept on replace;
    /// `update_time` is always refreshed. Returns the account id.
    pub async fn save<C>(conn: &C, mut account: account::ActiveModel) -> DaoResult<i64>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if matches!(account.create_time, ActiveValue::NotSet) {
            account.create_time = ActiveValue::Set(now);
        }
        account.update_time = ActiveValue::Set(now);

        let id = match &account.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Some(*id),
            ActiveValue::NotSet => None,
        };
        let replaced: Vec<account::Column> = account::Column::iter()
            .filter(|column| !matches!(column, account::Column::Id | account::Column::CreateTime))
            .filter(|column| !matches!(account.get(*column), ActiveValue::NotSet))
            .collect();

        let result = account::Entity::insert(account)
            .on_conflict(OnConflict::column(account::Column::Id).update_columns(replaced).to_owned())
            .exec(conn)
            .await?;
        Ok(id.unwrap_or(result.last_insert_id))
    }

    /// Hard-delete accounts by id. Returns the number of removed rows.
    pub async fn delete<C>(conn: &C, ids: &[i64]) -> DaoResult<u64>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = account::Entity::delete_many()
            .filter(account::Column::Id.is_in(ids.iter().copied()))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Apply `update` to every account in `ids`. An empty update never touches storage.
    pub async fn update<C>(conn: &C, ids: &[i64], update: AccountUpdate) -> DaoResult<u64>
    where
        C: ConnectionTrait,
    {
        if update.is_empty() || ids.is_empty() {
            return Ok(0);
        }

        let mut statement = account::Entity::update_many()
            .col_expr(account::Column::UpdateTime, Expr::value(Utc::now()))
            .filter(account::Column::Id.is_in(ids.iter().copied()));
        for field in update.fields {
            let column = field.column();
            statement = statement.col_expr(column, Expr::value(field.into_value()));
        }

        let result = statement.exec(conn).await?;
        Ok(result.rows_affected)
    }

    /// Add traffic to the counters of the account owning `con_pass`.
    ///
    /// The increment is evaluated by the database in a single statement, so
    /// concurrent calls for the same connection credential never lose updates.
    /// Counters saturate at `i64::MAX`.
    /// An unknown `con_pass` matches nothing and is not an error.
    pub async fn accrue_traffic<C>(conn: &C, con_pass: &str, download: u64, upload: u64) -> DaoResult<u64>
    where
        C: ConnectionTrait,
    {
        if download == 0 && upload == 0 {
            return Ok(0);
        }

        let mut statement = account::Entity::update_many()
            .col_expr(account::Column::UpdateTime, Expr::value(Utc::now()))
            .filter(account::Column::ConPass.eq(con_pass));
        if download != 0 {
            statement = statement.col_expr(
                account::Column::Download,
                saturating_increment(account::Column::Download, counter_delta(download)?),
            );
        }
        if upload != 0 {
            statement = statement.col_expr(
                account::Column::Upload,
                saturating_increment(account::Column::Upload, counter_delta(upload)?),
            );
        }

        let result = statement.exec(conn).await?;
        Ok(result.rows_affected)
    }

    /// Get the first account (lowest id) matching `filter`.
    pub async fn get<C>(conn: &C, filter: &AccountFilter) -> DaoResult<account::Model>
    where
        C: ConnectionTrait,
    {
        account::Entity::find()
            .filter(filter.condition())
            .order_by_asc(account::Column::Id)
            .one(conn)
            .await?
            .ok_or(DaoError::AccountNotFound)
    }

    /// Get one page of accounts together with the number of rows matching the
    /// query outside of the page window.
    pub async fn page<C>(conn: &C, query: &AccountPageQuery) -> DaoResult<(Vec<account::Model>, u64)>
    where
        C: ConnectionTrait,
    {
        let mut select = account::Entity::find();
        if let Some(username) = query.username.as_deref().filter(|username| !username.is_empty()) {
            select = select.filter(account::Column::Username.contains(username));
        }
        if let Some(deleted) = query.deleted {
            select = select.filter(account::Column::Deleted.eq(deleted));
        }

        let total = select.clone().count(conn).await?;
        let accounts = query.scope().apply(Self::ordered(select)).all(conn).await?;
        Ok((accounts, total))
    }

    /// Get all accounts matching `filter`, ordered by role then most recent first.
    pub async fn list<C>(conn: &C, filter: &AccountFilter) -> DaoResult<Vec<account::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(Self::ordered(account::Entity::find().filter(filter.condition()))
            .all(conn)
            .await?)
    }

    fn ordered(select: Select<account::Entity>) -> Select<account::Entity> {
        select
            .order_by_asc(account::Column::Role)
            .order_by_desc(account::Column::CreateTime)
            .order_by_desc(account::Column::Id)
    }
}

/// `column + delta`, pinned at `i64::MAX` instead of overflowing. SQLite would
/// otherwise promote the sum to REAL.
fn saturating_increment(column: account::Column, delta: i64) -> SimpleExpr {
    Expr::case(Expr::col(column).gt(i64::MAX - delta), i64::MAX)
        .finally(Expr::col(column).add(delta))
        .into()
}

fn counter_delta(delta: u64) -> DaoResult<i64> {
    i64::try_from(delta)
        .map_err(|_| DaoError::from(DbErr::Custom(format!("traffic delta {delta} exceeds counter range"))))
}
