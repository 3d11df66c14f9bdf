use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::regions::models::{Level, Region};

/// Read access to the region tables.
///
/// The service only talks to this trait so tests can swap the database for
/// [`InMemoryRegionRepository`](crate::shared::test_helpers::InMemoryRegionRepository).
#[async_trait]
pub trait RegionRepository: Send + Sync {
    /// Rows of `level` ordered by ascending id, optionally filtered by a name substring
    async fn list(
        &self,
        level: Level,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Region>>;

    async fn find_by_id(&self, level: Level, id: i64) -> Result<Option<Region>>;

    /// Direct children of the `parent` row with id `parent_id`
    async fn list_children(&self, parent: Level, parent_id: i64) -> Result<Vec<Region>>;

    /// Number of `level` rows whose `ancestor` foreign key equals `ancestor_id`
    async fn count_under(&self, level: Level, ancestor: Level, ancestor_id: i64) -> Result<i64>;

    async fn count_all(&self, level: Level) -> Result<i64>;
}
