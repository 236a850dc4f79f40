use crate::classify;
use crate::encoding;
use crate::types::{Property, RawRow};
use chrono::Local;
use csv::ReaderBuilder;
use log::debug;
use std::fs;
use thiserror::Error;

/// Terminal failure of one load attempt. Per-field problems never land here;
/// they are resolved with defaults inside the row builder. Callers see either
/// the full collection or one of these, never partial data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read source file: {0}")]
    Fetch(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),
}

/// Well-known location of the municipal dataset.
pub const SOURCE_PATH: &str = "centro_imoveis_abandonados.csv";

/// Load the full dataset: read the file, repair the text encoding, parse the
/// `;`-delimited rows and classify each one into a `Property`.
///
/// The whole file is read and repaired before parsing because the encoding
/// damage also hits the header row (`NÚMERO` arrives corrupted).
pub fn load(path: &str) -> Result<Vec<Property>, LoadError> {
    let raw = fs::read_to_string(path)?;
    let repaired = encoding::repair(&raw);

    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(repaired.as_bytes());

    let today = Local::now().date_naive().to_string();
    let mut properties: Vec<Property> = Vec::new();

    for (index, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result?;
        properties.push(build_property(row, index + 1, &today));
    }

    debug!("loaded {} properties from {}", properties.len(), path);
    Ok(properties)
}

/// Build one `Property` from a raw row. Total: every malformed or missing
/// field resolves to its documented default, so this can never reject a row.
fn build_property(row: RawRow, row_number: usize, today: &str) -> Property {
    let id = match non_blank(row.ord) {
        Some(id) => id,
        None => {
            debug!("row {}: blank ORD, using synthetic id", row_number);
            format!("imovel-{}", row_number)
        }
    };

    // The house-number column exists under two spellings depending on
    // whether the header survived the encoding round trip.
    let house_number = non_blank(row.numero)
        .or_else(|| non_blank(row.numero_alt))
        .unwrap_or_else(|| "S/N".to_string());

    Property {
        id,
        street: non_blank(row.logradouro).unwrap_or_default(),
        house_number,
        zone: classify::zone(row.zona.as_deref()),
        property_type: classify::property_type(row.tipo.as_deref()),
        status: classify::status(row.status.as_deref()),
        complement: non_blank(row.complemento),
        neighborhood: non_blank(row.bairro).unwrap_or_else(|| "Centro".to_string()),
        process_number: non_blank(row.processo).unwrap_or_default(),
        notice_id: non_blank(row.edital),
        longitude: classify::parse_coord(row.longitude.as_deref()),
        latitude: classify::parse_coord(row.latitude.as_deref()),
        photo_url: non_blank(row.foto),
        registration_date: today.to_string(),
        notes: non_blank(row.risco),
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    let s = s?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PropertyType, Status, Zone};

    fn row_from_csv(csv_text: &str) -> Vec<Property> {
        let repaired = encoding::repair(csv_text);
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(repaired.as_bytes());
        rdr.deserialize::<RawRow>()
            .enumerate()
            .map(|(i, r)| build_property(r.unwrap(), i + 1, "2026-08-23"))
            .collect()
    }

    #[test]
    fn classifies_a_complete_row() {
        let rows = row_from_csv(
            "ORD;LOGRADOURO;ZONA;TIPO;STATUS;LATITUDE;LONGITUDE\n\
             1;Rua A;sul;casa;;-5,08;-42,80\n",
        );
        assert_eq!(rows.len(), 1);
        let p = &rows[0];
        assert_eq!(p.id, "1");
        assert_eq!(p.street, "Rua A");
        assert_eq!(p.zone, Zone::South);
        assert_eq!(p.property_type, PropertyType::House);
        assert_eq!(p.status, Status::Abandoned);
        assert_eq!(p.latitude, -5.08);
        assert_eq!(p.longitude, -42.80);
    }

    #[test]
    fn synthetic_id_and_defaults() {
        let rows = row_from_csv("ORD;LOGRADOURO;bairro\n;Rua B;\n;;\n");
        assert_eq!(rows[0].id, "imovel-1");
        assert_eq!(rows[1].id, "imovel-2");
        assert_eq!(rows[0].neighborhood, "Centro");
        assert_eq!(rows[0].house_number, "S/N");
        assert_eq!(rows[1].street, "");
        assert_eq!(rows[1].longitude, 0.0);
    }

    #[test]
    fn corrupted_number_header_is_recognized() {
        // The header itself goes through encoding repair, so the corrupted
        // spelling N�MERO resolves to the primary column name.
        let rows = row_from_csv("ORD;N\u{fffd}MERO\n7;123\n");
        assert_eq!(rows[0].house_number, "123");
        // An already-underscored export falls back to the alternate column.
        let rows = row_from_csv("ORD;N_MERO\n7;456\n");
        assert_eq!(rows[0].house_number, "456");
    }

    #[test]
    fn street_names_are_repaired_before_parsing() {
        let rows = row_from_csv("ORD;LOGRADOURO\n1;Avenida S\u{fffd}o Jo\u{fffd}o\n");
        assert_eq!(rows[0].street, "Avenida São João");
    }

    #[test]
    fn missing_file_is_a_fetch_error() {
        let err = load("no_such_file.csv").unwrap_err();
        assert!(matches!(err, LoadError::Fetch(_)));
    }
}
