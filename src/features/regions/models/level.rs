use std::fmt;

/// One level of the administrative hierarchy.
///
/// Every identifier used in SQL comes from here, never from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Provinsi
    Province,
    /// Kabupaten/Kota
    Regency,
    /// Kecamatan
    District,
    /// Kelurahan/Desa
    Village,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Province,
        Level::Regency,
        Level::District,
        Level::Village,
    ];

    pub const fn table(self) -> &'static str {
        match self {
            Level::Province => "provinsis",
            Level::Regency => "kab_kotas",
            Level::District => "kecamatans",
            Level::Village => "kelurahan_desas",
        }
    }

    /// Column holding the display name
    pub const fn name_column(self) -> &'static str {
        match self {
            Level::Province => "nama_provinsi",
            Level::Regency => "nama_kab_kota",
            Level::District => "nama_kecamatan",
            Level::Village => "nama_kelurahan_desa",
        }
    }

    /// Column that descendant tables use to reference a row of this level
    pub const fn foreign_key(self) -> &'static str {
        match self {
            Level::Province => "provinsi_id",
            Level::Regency => "kab_kota_id",
            Level::District => "kecamatan_id",
            Level::Village => "kelurahan_desa_id",
        }
    }

    pub const fn child(self) -> Option<Level> {
        match self {
            Level::Province => Some(Level::Regency),
            Level::Regency => Some(Level::District),
            Level::District => Some(Level::Village),
            Level::Village => None,
        }
    }

    /// All levels below this one, nearest first
    pub fn descendants(self) -> Vec<Level> {
        std::iter::successors(self.child(), |level| level.child()).collect()
    }

    /// Human-readable Indonesian label used in log and error messages
    pub const fn label(self) -> &'static str {
        match self {
            Level::Province => "provinsi",
            Level::Regency => "kabupaten/kota",
            Level::District => "kecamatan",
            Level::Village => "kelurahan/desa",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
