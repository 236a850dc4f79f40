use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tabled::Tabled;

/// One row of the source CSV, exactly as the spreadsheet spells it.
///
/// Every field is optional text; normalization into typed values happens in
/// the loader. `NÚMERO` carries a fallback spelling because the header itself
/// is corrupted in some exports of the file.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "ORD")]
    pub ord: Option<String>,
    #[serde(rename = "LOGRADOURO")]
    pub logradouro: Option<String>,
    #[serde(rename = "NÚMERO")]
    pub numero: Option<String>,
    #[serde(rename = "N_MERO")]
    pub numero_alt: Option<String>,
    #[serde(rename = "ZONA")]
    pub zona: Option<String>,
    #[serde(rename = "TIPO")]
    pub tipo: Option<String>,
    #[serde(rename = "STATUS")]
    pub status: Option<String>,
    #[serde(rename = "COMPLEMENTO")]
    pub complemento: Option<String>,
    #[serde(rename = "bairro")]
    pub bairro: Option<String>,
    #[serde(rename = "PROCESSO")]
    pub processo: Option<String>,
    #[serde(rename = "EDITAL")]
    pub edital: Option<String>,
    #[serde(rename = "LONGITUDE")]
    pub longitude: Option<String>,
    #[serde(rename = "LATITUDE")]
    pub latitude: Option<String>,
    #[serde(rename = "FOTO")]
    pub foto: Option<String>,
    #[serde(rename = "RISCO")]
    pub risco: Option<String>,
}

/// City zone of a property. Classification always succeeds; unrecognized
/// text defaults to `Norte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "Norte")]
    North,
    #[serde(rename = "Sul")]
    South,
    #[serde(rename = "Leste")]
    East,
    #[serde(rename = "Oeste")]
    West,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::North, Zone::South, Zone::East, Zone::West];

    pub fn label(self) -> &'static str {
        match self {
            Zone::North => "Norte",
            Zone::South => "Sul",
            Zone::East => "Leste",
            Zone::West => "Oeste",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of property. Unrecognized text defaults to `Casa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "Casa")]
    House,
    #[serde(rename = "Construção")]
    UnderConstruction,
    #[serde(rename = "Prédio")]
    Building,
    #[serde(rename = "Terreno")]
    Lot,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::House,
        PropertyType::UnderConstruction,
        PropertyType::Building,
        PropertyType::Lot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::House => "Casa",
            PropertyType::UnderConstruction => "Construção",
            PropertyType::Building => "Prédio",
            PropertyType::Lot => "Terreno",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Administrative situation of a property. Unrecognized text defaults to
/// `Abandonado`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Abandonado")]
    Abandoned,
    #[serde(rename = "Em análise")]
    UnderReview,
    #[serde(rename = "Regularizado")]
    Regularized,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Abandoned, Status::UnderReview, Status::Regularized];

    pub fn label(self) -> &'static str {
        match self {
            Status::Abandoned => "Abandonado",
            Status::UnderReview => "Em análise",
            Status::Regularized => "Regularizado",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One property, fully classified. After the loader builds it, every field is
/// well-typed: the three categories are always valid enum members and the
/// coordinates always parse, with `0.0` standing in for "no coordinate"
/// (the city center is far from 0,0 so the sentinel cannot collide with a
/// real position).
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub id: String,
    pub street: String,
    pub house_number: String,
    pub zone: Zone,
    pub property_type: PropertyType,
    pub status: Status,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub process_number: String,
    pub notice_id: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub photo_url: Option<String>,
    pub registration_date: String,
    pub notes: Option<String>,
}

/// Sparse filter over the loaded collection. `None` / empty vec means "no
/// constraint on that dimension"; the text fields also treat the literal
/// `"Todos"` as unconstrained because that is what the dropdowns send.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub process_number: Option<String>,
    pub notice_id: Option<String>,
    pub street: Option<String>,
    pub types: Vec<PropertyType>,
    pub zones: Vec<Zone>,
    pub statuses: Vec<Status>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.process_number.is_none()
            && self.notice_id.is_none()
            && self.street.is_none()
            && self.types.is_empty()
            && self.zones.is_empty()
            && self.statuses.is_empty()
    }
}

/// Count of properties on one street, used for the top-10 ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreetCount {
    pub street: String,
    pub count: usize,
}

/// Derived statistics over a record collection. Recomputed on demand from the
/// currently filtered set; never mutated in place.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub by_type: HashMap<PropertyType, usize>,
    pub by_zone: HashMap<Zone, usize>,
    pub by_status: HashMap<Status, usize>,
    pub top_streets: Vec<StreetCount>,
}

// Console preview rows (tabled renders these as markdown tables).

#[derive(Debug, Clone, Tabled)]
pub struct CategoryCountRow {
    #[tabled(rename = "Categoria")]
    pub category: String,
    #[tabled(rename = "Quantidade")]
    pub count: String,
    #[tabled(rename = "%")]
    pub percent: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct StreetRankingRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "Logradouro")]
    pub street: String,
    #[tabled(rename = "Imóveis")]
    pub count: String,
}
