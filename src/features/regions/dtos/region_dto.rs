use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::regions::models::{Level, Region};

/// A region as listed by every list and children endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegionResponseDto {
    pub id: i64,
    #[serde(rename = "nama")]
    pub name: String,
}

impl From<Region> for RegionResponseDto {
    fn from(region: Region) -> Self {
        Self {
            id: region.id,
            name: region.name,
        }
    }
}

/// A region with the number of rows referencing it on each descendant level.
///
/// Counts that could not be computed are left out of the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegionDetailDto {
    pub id: i64,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumlah_kab_kotas: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumlah_kecamatans: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumlah_kelurahan_desas: Option<i64>,
}

impl RegionDetailDto {
    pub fn new(region: Region) -> Self {
        Self {
            id: region.id,
            name: region.name,
            ..Default::default()
        }
    }

    /// Stores the count for rows of `level` under this region
    pub fn set_count(&mut self, level: Level, count: i64) {
        let slot = match level {
            Level::Regency => &mut self.jumlah_kab_kotas,
            Level::District => &mut self.jumlah_kecamatans,
            Level::Village => &mut self.jumlah_kelurahan_desas,
            // provinces are never below anything
            Level::Province => return,
        };
        *slot = Some(count);
    }
}

/// Row counts of every table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegionInfoDto {
    pub jumlah_provinsi: i64,
    pub jumlah_kabupaten: i64,
    pub jumlah_kecamatan: i64,
    pub jumlah_kelurahan: i64,
}
