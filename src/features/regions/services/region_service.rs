use std::sync::Arc;

use futures::future::join_all;

use crate::core::error::{AppError, Result};
use crate::features::regions::dtos::{RegionDetailDto, RegionInfoDto, RegionResponseDto};
use crate::features::regions::models::Level;
use crate::features::regions::repositories::RegionRepository;

/// Service for browsing Indonesian administrative regions
pub struct RegionService {
    repository: Arc<dyn RegionRepository>,
}

impl RegionService {
    pub fn new(repository: Arc<dyn RegionRepository>) -> Self {
        Self { repository }
    }

    /// Page of `level` rows ordered by id, optionally filtered by name
    pub async fn list(
        &self,
        level: Level,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RegionResponseDto>> {
        tracing::debug!(
            "Listing {}: search={:?}, limit={}, offset={}",
            level,
            search,
            limit,
            offset
        );
        let regions = self.repository.list(level, search, limit, offset).await?;
        tracing::debug!("Retrieved {} items from {}", regions.len(), level.table());

        Ok(regions.into_iter().map(Into::into).collect())
    }

    /// A single region with the number of rows on every level below it.
    ///
    /// A failed count only drops that field. An unknown id is a query error,
    /// the same as any other failed lookup.
    pub async fn get_detail(&self, level: Level, id: i64) -> Result<RegionDetailDto> {
        let region = self
            .repository
            .find_by_id(level, id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("{} with id {} not found", level, id);
                AppError::Database(sqlx::Error::RowNotFound)
            })?;

        let descendants = level.descendants();
        let counts = join_all(
            descendants
                .iter()
                .map(|&descendant| self.repository.count_under(descendant, level, id)),
        )
        .await;

        let mut detail = RegionDetailDto::new(region);
        for (descendant, count) in descendants.into_iter().zip(counts) {
            match count {
                Ok(count) => detail.set_count(descendant, count),
                Err(e) => {
                    tracing::warn!(
                        "Error counting {} for {} {}: {}",
                        descendant.table(),
                        level,
                        id,
                        e
                    );
                }
            }
        }

        Ok(detail)
    }

    /// Direct children of a region. An unknown parent yields an empty list.
    pub async fn list_children(
        &self,
        parent: Level,
        parent_id: i64,
    ) -> Result<Vec<RegionResponseDto>> {
        let children = self.repository.list_children(parent, parent_id).await?;
        tracing::debug!(
            "Retrieved {} children for {} with id: {}",
            children.len(),
            parent,
            parent_id
        );

        Ok(children.into_iter().map(Into::into).collect())
    }

    /// Row count of every level.
    ///
    /// Unlike [`get_detail`](Self::get_detail), any failed count fails the whole call.
    pub async fn info(&self) -> Result<RegionInfoDto> {
        let (provinces, regencies, districts, villages) = futures::try_join!(
            self.repository.count_all(Level::Province),
            self.repository.count_all(Level::Regency),
            self.repository.count_all(Level::District),
            self.repository.count_all(Level::Village),
        )?;

        Ok(RegionInfoDto {
            jumlah_provinsi: provinces,
            jumlah_kabupaten: regencies,
            jumlah_kecamatan: districts,
            jumlah_kelurahan: villages,
        })
    }
}
