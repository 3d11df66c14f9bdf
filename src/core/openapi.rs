use utoipa::OpenApi;

use crate::features::regions::{dtos as regions_dtos, handlers as regions_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        regions_handlers::get_info,
        // Provinces
        regions_handlers::list_provinces,
        regions_handlers::get_province,
        regions_handlers::list_regencies_by_province,
        // Regencies
        regions_handlers::list_regencies,
        regions_handlers::get_regency,
        regions_handlers::list_districts_by_regency,
        // Districts
        regions_handlers::list_districts,
        regions_handlers::get_district,
        regions_handlers::list_villages_by_district,
        // Villages
        regions_handlers::list_villages,
        regions_handlers::get_village,
    ),
    components(
        schemas(
            ErrorResponse,
            regions_dtos::RegionResponseDto,
            regions_dtos::RegionDetailDto,
            regions_dtos::RegionInfoDto,
        )
    ),
    tags(
        (name = "regions", description = "Indonesian administrative regions (provinsi, kabupaten/kota, kecamatan, kelurahan/desa)"),
    ),
    info(
        title = "Wilayah API",
        description = "Read-only lookup of Indonesian administrative regions",
    )
)]
pub struct ApiDoc;
