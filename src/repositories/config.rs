//! Config repository for database operations.

use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait, Iterable, PaginatorTrait,
    QueryFilter, QueryOrder, Select,
};

use crate::entities::config;
use crate::error::{DaoError, DaoResult};
use crate::repositories::pagination::PageScope;

/// Conjunction of optional clauses selecting config entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigFilter {
    pub key: Option<String>,
    pub keys: Option<Vec<String>>,
}

impl ConfigFilter {
    pub fn by_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn by_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: Some(keys.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(key) = &self.key {
            condition = condition.add(config::Column::Key.eq(key.as_str()));
        }
        if let Some(keys) = &self.keys {
            condition = condition.add(config::Column::Key.is_in(keys.iter().map(String::as_str)));
        }
        condition
    }
}

/// Field assignments applied by [`ConfigRepository::update`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    key: Option<String>,
    value: Option<String>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.value.is_none()
    }
}

/// Repository for config-related database operations.
///
/// Entries are never removed at this layer, only inserted and updated.
pub struct ConfigRepository;

impl ConfigRepository {
    /// Insert an entry, or replace the stored row when `id` is set and exists.
    /// A duplicate key is a storage error.
    pub async fn save<C>(conn: &C, mut entry: config::ActiveModel) -> DaoResult<i64>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if matches!(entry.create_time, ActiveValue::NotSet) {
            entry.create_time = ActiveValue::Set(now);
        }
        entry.update_time = ActiveValue::Set(now);

        let id = match &entry.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Some(*id),
            ActiveValue::NotSet => None,
        };
        let replaced: Vec<config::Column> = config::Column::iter()
            .filter(|column| !matches!(column, config::Column::Id | config::Column::CreateTime))
            .filter(|column| !matches!(entry.get(*column), ActiveValue::NotSet))
            .collect();

        let result = config::Entity::insert(entry)
            .on_conflict(OnConflict::column(config::Column::Id).update_columns(replaced).to_owned())
            .exec(conn)
            .await?;
        Ok(id.unwrap_or(result.last_insert_id))
    }

    /// Apply `update` to the entries stored under `keys`.
    pub async fn update<C, S>(conn: &C, keys: &[S], update: ConfigUpdate) -> DaoResult<u64>
    where
        C: ConnectionTrait,
        S: AsRef<str>,
    {
        if update.is_empty() || keys.is_empty() {
            return Ok(0);
        }

        let mut statement = config::Entity::update_many()
            .col_expr(config::Column::UpdateTime, Expr::value(Utc::now()))
            .filter(config::Column::Key.is_in(keys.iter().map(|key| AsRef::<str>::as_ref(key).to_owned())));
        if let Some(key) = update.key {
            statement = statement.col_expr(config::Column::Key, Expr::value(key));
        }
        if let Some(value) = update.value {
            statement = statement.col_expr(config::Column::Value, Expr::value(value));
        }

        let result = statement.exec(conn).await?;
        Ok(result.rows_affected)
    }

    /// Get the first entry (lowest id) matching `filter`.
    pub async fn get<C>(conn: &C, filter: &ConfigFilter) -> DaoResult<config::Model>
    where
        C: ConnectionTrait,
    {
        config::Entity::find()
            .filter(filter.condition())
            .order_by_asc(config::Column::Id)
            .one(conn)
            .await?
            .ok_or(DaoError::ConfigNotFound)
    }

    /// Get all entries matching `filter`, most recent first.
    pub async fn list<C>(conn: &C, filter: &ConfigFilter) -> DaoResult<Vec<config::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(Self::ordered(config::Entity::find().filter(filter.condition()))
            .all(conn)
            .await?)
    }

    /// Get one page of entries and the total number matching `filter`.
    pub async fn page<C>(conn: &C, filter: &ConfigFilter, scope: PageScope) -> DaoResult<(Vec<config::Model>, u64)>
    where
        C: ConnectionTrait,
    {
        let select = config::Entity::find().filter(filter.condition());
        let total = select.clone().count(conn).await?;
        let entries = scope.apply(Self::ordered(select)).all(conn).await?;
        Ok((entries, total))
    }

    fn ordered(select: Select<config::Entity>) -> Select<config::Entity> {
        select
            .order_by_desc(config::Column::CreateTime)
            .order_by_desc(config::Column::Id)
    }
}
