mod region_repository;
mod sql_region_repository;

pub use region_repository::RegionRepository;
pub use sql_region_repository::SqlRegionRepository;
