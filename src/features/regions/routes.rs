use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionService;

/// Create routes for the regions feature
pub fn routes(service: Arc<RegionService>) -> Router {
    Router::new()
        .route("/", get(handlers::get_info))
        // Province routes
        .route("/provinsi", get(handlers::list_provinces))
        .route("/provinsi/{id}", get(handlers::get_province))
        .route(
            "/provinsi/{id}/kota",
            get(handlers::list_regencies_by_province),
        )
        // Regency routes
        .route("/kota", get(handlers::list_regencies))
        .route("/kota/{id}", get(handlers::get_regency))
        .route(
            "/kota/{id}/kecamatan",
            get(handlers::list_districts_by_regency),
        )
        // District routes
        .route("/kecamatan", get(handlers::list_districts))
        .route("/kecamatan/{id}", get(handlers::get_district))
        .route(
            "/kecamatan/{id}/kelurahan",
            get(handlers::list_villages_by_district),
        )
        // Village routes
        .route("/kelurahan", get(handlers::list_villages))
        .route("/kelurahan/{id}", get(handlers::get_village))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::regions::models::Level;
    use crate::shared::test_helpers::{seeded_repository, InMemoryRegionRepository};

    fn server_with(repository: InMemoryRegionRepository) -> TestServer {
        let service = Arc::new(RegionService::new(Arc::new(repository)));
        TestServer::new(routes(service)).unwrap()
    }

    fn server() -> TestServer {
        server_with(seeded_repository())
    }

    fn ids(body: &Value) -> Vec<i64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_info_counts_every_table() {
        let response = server().get("/").await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "jumlah_provinsi": 12,
            "jumlah_kabupaten": 3,
            "jumlah_kecamatan": 3,
            "jumlah_kelurahan": 4
        }));
    }

    #[tokio::test]
    async fn test_info_fails_when_any_count_fails() {
        let repository = seeded_repository().failing_count_all(Level::District);
        let response = server_with(repository).get("/").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_list_second_page() {
        let response = server()
            .get("/provinsi")
            .add_query_param("page", 2)
            .add_query_param("limit", 5)
            .await;

        response.assert_status_ok();
        assert_eq!(ids(&response.json()), vec![6, 7, 8, 9, 10]);
    }

    #[tokio::test]
    async fn test_list_defaults_to_first_ten() {
        let response = server().get("/provinsi").await;

        response.assert_status_ok();
        assert_eq!(ids(&response.json()), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_list_invalid_paging_uses_defaults() {
        let response = server()
            .get("/provinsi")
            .add_query_param("page", "zero")
            .add_query_param("limit", -4)
            .await;

        response.assert_status_ok();
        assert_eq!(ids(&response.json()), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_list_repeated_param_uses_first_value() {
        let response = server().get("/provinsi?page=2&page=9&limit=5&limit=1").await;

        response.assert_status_ok();
        assert_eq!(ids(&response.json()), vec![6, 7, 8, 9, 10]);
    }

    #[tokio::test]
    async fn test_list_page_past_end_is_empty_array() {
        let response = server()
            .get("/provinsi")
            .add_query_param("page", 9)
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_list_search_filters_by_substring() {
        let response = server()
            .get("/provinsi")
            .add_query_param("search", "JAWA")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([
            {"id": 3, "nama": "JAWA BARAT"},
            {"id": 4, "nama": "JAWA TENGAH"},
            {"id": 5, "nama": "JAWA TIMUR"}
        ]));
    }

    #[tokio::test]
    async fn test_list_empty_search_is_unfiltered() {
        let unfiltered: Value = server().get("/kota").await.json();
        let empty_search: Value = server()
            .get("/kota")
            .add_query_param("search", "")
            .await
            .json();

        assert_eq!(unfiltered, empty_search);
        assert_eq!(ids(&unfiltered), vec![101, 102, 201]);
    }

    #[tokio::test]
    async fn test_province_detail_has_three_counts() {
        let response = server().get("/provinsi/1").await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "id": 1,
            "nama": "ACEH",
            "jumlah_kab_kotas": 2,
            "jumlah_kecamatans": 2,
            "jumlah_kelurahan_desas": 3
        }));
    }

    #[tokio::test]
    async fn test_regency_and_district_detail_counts() {
        let regency: Value = server().get("/kota/101").await.json();
        assert_eq!(regency["jumlah_kecamatans"], 2);
        assert_eq!(regency["jumlah_kelurahan_desas"], 3);
        assert!(regency.get("jumlah_kab_kotas").is_none());

        let district: Value = server().get("/kecamatan/1001").await.json();
        assert_eq!(district["jumlah_kelurahan_desas"], 2);
        assert_eq!(district.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_village_detail_has_no_counts() {
        let response = server().get("/kelurahan/10001").await;

        response.assert_status_ok();
        response.assert_json(&json!({"id": 10001, "nama": "LAMPULO"}));
    }

    #[tokio::test]
    async fn test_detail_omits_failed_count() {
        let repository = seeded_repository().failing_count_under(Level::District);
        let response = server_with(repository).get("/provinsi/1").await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "id": 1,
            "nama": "ACEH",
            "jumlah_kab_kotas": 2,
            "jumlah_kelurahan_desas": 3
        }));
    }

    #[tokio::test]
    async fn test_detail_unknown_id_is_query_error() {
        let response = server().get("/provinsi/999").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("no rows"));
    }

    #[tokio::test]
    async fn test_detail_non_numeric_id_is_query_error() {
        let response = server().get("/kecamatan/abc").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("'abc'"));
    }

    #[tokio::test]
    async fn test_children_of_each_level() {
        let regencies: Value = server().get("/provinsi/1/kota").await.json();
        assert_eq!(ids(&regencies), vec![101, 102]);

        let districts: Value = server().get("/kota/101/kecamatan").await.json();
        assert_eq!(ids(&districts), vec![1001, 1002]);

        let villages: Value = server().get("/kecamatan/1001/kelurahan").await.json();
        assert_eq!(ids(&villages), vec![10001, 10002]);
    }

    #[tokio::test]
    async fn test_children_of_childless_or_unknown_parent_is_empty() {
        let childless = server().get("/provinsi/12/kota").await;
        childless.assert_status_ok();
        childless.assert_json(&json!([]));

        let unknown = server().get("/provinsi/4242/kota").await;
        unknown.assert_status_ok();
        unknown.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_children_non_numeric_id_is_bad_request() {
        let response = server().get("/kota/abc/kecamatan").await;
        response.assert_status_bad_request();
    }
}
