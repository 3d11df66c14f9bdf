use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::any::{install_default_drivers, AnyPoolOptions};

use crate::core::database::Database;
use crate::core::error::{AppError, Result};
use crate::core::sql::Dialect;
use crate::features::regions::models::{Level, Region};
use crate::features::regions::repositories::RegionRepository;

#[derive(Debug, Clone)]
struct Row {
    region: Region,
    /// Foreign keys to every ancestor level
    keys: HashMap<Level, i64>,
}

/// [`RegionRepository`] over fixed rows, with optional injected failures
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegionRepository {
    rows: HashMap<Level, Vec<Row>>,
    failing_count_all: Option<Level>,
    failing_count_under: Option<Level>,
}

fn injected_failure(what: &str) -> AppError {
    AppError::Database(sqlx::Error::Protocol(format!("injected failure: {}", what)))
}

impl InMemoryRegionRepository {
    /// Adds a row; `ancestors` lists (level, id) pairs for every level above it
    pub fn insert(
        mut self,
        level: Level,
        id: i64,
        name: &str,
        ancestors: &[(Level, i64)],
    ) -> Self {
        let mut rows = self.rows.remove(&level).unwrap_or_default();
        rows.push(Row {
            region: Region::new(id, name),
            keys: ancestors.iter().copied().collect(),
        });
        rows.sort_by_key(|row| row.region.id);
        self.rows.insert(level, rows);
        self
    }

    pub fn failing_count_all(mut self, level: Level) -> Self {
        self.failing_count_all = Some(level);
        self
    }

    pub fn failing_count_under(mut self, level: Level) -> Self {
        self.failing_count_under = Some(level);
        self
    }

    fn rows(&self, level: Level) -> &[Row] {
        self.rows.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[async_trait]
impl RegionRepository for InMemoryRegionRepository {
    async fn list(
        &self,
        level: Level,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Region>> {
        Ok(self
            .rows(level)
            .iter()
            .filter(|row| search.map_or(true, |term| row.region.name.contains(term)))
            .skip(offset as usize)
            .take(limit as usize)
            .map(|row| row.region.clone())
            .collect())
    }

    async fn find_by_id(&self, level: Level, id: i64) -> Result<Option<Region>> {
        Ok(self
            .rows(level)
            .iter()
            .find(|row| row.region.id == id)
            .map(|row| row.region.clone()))
    }

    async fn list_children(&self, parent: Level, parent_id: i64) -> Result<Vec<Region>> {
        let Some(child) = parent.child() else {
            return Ok(Vec::new());
        };
        Ok(self
            .rows(child)
            .iter()
            .filter(|row| row.keys.get(&parent) == Some(&parent_id))
            .map(|row| row.region.clone())
            .collect())
    }

    async fn count_under(&self, level: Level, ancestor: Level, ancestor_id: i64) -> Result<i64> {
        if self.failing_count_under == Some(level) {
            return Err(injected_failure(level.table()));
        }
        Ok(self
            .rows(level)
            .iter()
            .filter(|row| row.keys.get(&ancestor) == Some(&ancestor_id))
            .count() as i64)
    }

    async fn count_all(&self, level: Level) -> Result<i64> {
        if self.failing_count_all == Some(level) {
            return Err(injected_failure(level.table()));
        }
        Ok(self.rows(level).len() as i64)
    }
}

/// Twelve provinces (ids 1..=12), with regencies, districts and villages under
/// Aceh (1) and Sumatera Utara (2). Province 12 has no children.
pub fn seeded_repository() -> InMemoryRegionRepository {
    use Level::*;

    let provinces = [
        "ACEH",
        "SUMATERA UTARA",
        "JAWA BARAT",
        "JAWA TENGAH",
        "JAWA TIMUR",
        "BALI",
        "NUSA TENGGARA BARAT",
        "KALIMANTAN BARAT",
        "SULAWESI SELATAN",
        "MALUKU",
        "PAPUA",
        "PAPUA BARAT",
    ];

    let repo = provinces
        .iter()
        .zip(1..)
        .fold(InMemoryRegionRepository::default(), |repo, (name, id)| {
            repo.insert(Province, id, name, &[])
        });

    repo.insert(Regency, 101, "KAB. ACEH BESAR", &[(Province, 1)])
        .insert(Regency, 102, "KOTA BANDA ACEH", &[(Province, 1)])
        .insert(Regency, 201, "KOTA MEDAN", &[(Province, 2)])
        .insert(District, 1001, "KUTA ALAM", &[(Province, 1), (Regency, 101)])
        .insert(District, 1002, "SYIAH KUALA", &[(Province, 1), (Regency, 101)])
        .insert(District, 2001, "MEDAN BARU", &[(Province, 2), (Regency, 201)])
        .insert(
            Village,
            10001,
            "LAMPULO",
            &[(Province, 1), (Regency, 101), (District, 1001)],
        )
        .insert(
            Village,
            10002,
            "PEUNAYONG",
            &[(Province, 1), (Regency, 101), (District, 1001)],
        )
        .insert(
            Village,
            10003,
            "KOPELMA DARUSSALAM",
            &[(Province, 1), (Regency, 101), (District, 1002)],
        )
        .insert(
            Village,
            20001,
            "BABURA",
            &[(Province, 2), (Regency, 201), (District, 2001)],
        )
}

/// In-memory SQLite database with the four region tables and the fixtures of
/// [`seeded_repository`], plus village 10004 under district 1002 whose name is NULL.
///
/// The pool holds a single connection that is never recycled, since every
/// `sqlite::memory:` connection opens its own empty database.
pub async fn sqlite_database() -> Database {
    install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite database");

    let mut statements = vec![
        "CREATE TABLE provinsis (id INTEGER PRIMARY KEY, nama_provinsi TEXT)".to_string(),
        "CREATE TABLE kab_kotas (id INTEGER PRIMARY KEY, nama_kab_kota TEXT, provinsi_id INTEGER)"
            .to_string(),
        "CREATE TABLE kecamatans (id INTEGER PRIMARY KEY, nama_kecamatan TEXT, \
         provinsi_id INTEGER, kab_kota_id INTEGER)"
            .to_string(),
        "CREATE TABLE kelurahan_desas (id INTEGER PRIMARY KEY, nama_kelurahan_desa TEXT, \
         provinsi_id INTEGER, kab_kota_id INTEGER, kecamatan_id INTEGER)"
            .to_string(),
    ];

    let repository = seeded_repository();
    for level in Level::ALL {
        for row in repository.rows(level) {
            let ancestors: Vec<Level> = Level::ALL
                .into_iter()
                .take_while(|ancestor| *ancestor != level)
                .collect();
            let mut columns = vec!["id", level.name_column()];
            let mut values = vec![
                row.region.id.to_string(),
                format!("'{}'", row.region.name),
            ];
            for ancestor in ancestors {
                columns.push(ancestor.foreign_key());
                values.push(row.keys[&ancestor].to_string());
            }
            statements.push(format!(
                "INSERT INTO {} ({}) VALUES ({})",
                level.table(),
                columns.join(", "),
                values.join(", ")
            ));
        }
    }
    statements.push(
        "INSERT INTO kelurahan_desas \
         (id, nama_kelurahan_desa, provinsi_id, kab_kota_id, kecamatan_id) \
         VALUES (10004, NULL, 1, 101, 1002)"
            .to_string(),
    );

    for statement in &statements {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to run `{}`: {}", statement, e));
    }

    Database {
        pool,
        dialect: Dialect::MySql,
    }
}
