use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::Row;

use crate::core::database::Database;
use crate::core::error::{AppError, Result};
use crate::core::sql::{self, BuiltQuery};
use crate::features::regions::models::{Level, Region};
use crate::features::regions::repositories::RegionRepository;

/// [`RegionRepository`] backed by the shared MySQL/PostgreSQL pool
pub struct SqlRegionRepository {
    db: Database,
}

impl SqlRegionRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn fetch_regions(&self, query: BuiltQuery, level: Level) -> Result<Vec<Region>> {
        tracing::debug!("Executing query: {}", query.sql);
        let rows = query
            .as_query()
            .fetch_all(&self.db.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query {}: {:?}", level.table(), e);
                AppError::Database(e)
            })?;

        Ok(decode_regions(&rows, level))
    }

    async fn fetch_count(&self, query: BuiltQuery) -> Result<i64> {
        tracing::debug!("Executing count query: {}", query.sql);
        let row = query.as_query().fetch_one(&self.db.pool).await?;
        Ok(row.try_get::<i64, _>(0)?)
    }
}

fn decode_region(row: &AnyRow) -> std::result::Result<Region, sqlx::Error> {
    Ok(Region::new(row.try_get(0)?, row.try_get::<String, _>(1)?))
}

/// Rows that fail to decode are logged and dropped
fn decode_regions(rows: &[AnyRow], level: Level) -> Vec<Region> {
    rows.iter()
        .filter_map(|row| match decode_region(row) {
            Ok(region) => Some(region),
            Err(e) => {
                tracing::warn!("Error scanning {} row: {}", level.table(), e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl RegionRepository for SqlRegionRepository {
    async fn list(
        &self,
        level: Level,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Region>> {
        let query = sql::list_query(
            self.db.dialect,
            level.table(),
            level.name_column(),
            search,
            limit,
            offset,
        );
        self.fetch_regions(query, level).await
    }

    async fn find_by_id(&self, level: Level, id: i64) -> Result<Option<Region>> {
        let query = sql::detail_query(self.db.dialect, level.table(), level.name_column(), id);
        tracing::debug!("Executing query: {}", query.sql);

        let row = query
            .as_query()
            .fetch_optional(&self.db.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch {} {}: {:?}", level.table(), id, e);
                AppError::Database(e)
            })?;

        match row {
            Some(row) => Ok(Some(decode_region(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_children(&self, parent: Level, parent_id: i64) -> Result<Vec<Region>> {
        let Some(child) = parent.child() else {
            return Ok(Vec::new());
        };
        let query = sql::children_query(
            self.db.dialect,
            child.table(),
            child.name_column(),
            parent.foreign_key(),
            parent_id,
        );
        self.fetch_regions(query, child).await
    }

    async fn count_under(&self, level: Level, ancestor: Level, ancestor_id: i64) -> Result<i64> {
        let query = sql::count_by_key_query(
            self.db.dialect,
            level.table(),
            ancestor.foreign_key(),
            ancestor_id,
        );
        self.fetch_count(query).await
    }

    async fn count_all(&self, level: Level) -> Result<i64> {
        self.fetch_count(sql::count_all_query(self.db.dialect, level.table()))
            .await
    }
}
