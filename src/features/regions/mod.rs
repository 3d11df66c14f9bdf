//! Indonesian administrative regions (wilayah).
//!
//! Four levels, each referencing its parent by id:
//!
//! - Provinsi (`provinsis`)
//! - Kabupaten/Kota (`kab_kotas.provinsi_id`)
//! - Kecamatan (`kecamatans.kab_kota_id`)
//! - Kelurahan/Desa (`kelurahan_desas.kecamatan_id`)
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Row counts of every level |
//! | GET | `/provinsi` | Paginated, searchable list of provinces |
//! | GET | `/provinsi/{id}` | Province with regency, district and village counts |
//! | GET | `/provinsi/{id}/kota` | Regencies in a province |
//! | GET | `/kota` | Paginated, searchable list of regencies |
//! | GET | `/kota/{id}` | Regency with district and village counts |
//! | GET | `/kota/{id}/kecamatan` | Districts in a regency |
//! | GET | `/kecamatan` | Paginated, searchable list of districts |
//! | GET | `/kecamatan/{id}` | District with village count |
//! | GET | `/kecamatan/{id}/kelurahan` | Villages in a district |
//! | GET | `/kelurahan` | Paginated, searchable list of villages |
//! | GET | `/kelurahan/{id}` | Village |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::SqlRegionRepository;
pub use services::RegionService;
