use crate::types::Property;
use chrono::Local;
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

/// Column order of the CSV export, fixed so downstream spreadsheets keep
/// their references stable.
const EXPORT_HEADER: [&str; 15] = [
    "ID",
    "Logradouro",
    "Numero",
    "Zona",
    "Tipo",
    "Status",
    "Complemento",
    "Bairro",
    "ProcessoSEI",
    "Edital",
    "Longitude",
    "Latitude",
    "Foto",
    "DataRegistro",
    "Observacoes",
];

/// Name for an export file carrying today's date, e.g.
/// `imoveis-abandonados-2026-08-23.csv`.
pub fn dated_filename(extension: &str) -> String {
    format!(
        "imoveis-abandonados-{}.{}",
        Local::now().date_naive(),
        extension
    )
}

/// Write the given records (normally the filtered set) as comma-separated
/// CSV with the fixed 15-column header. Text fields are double-quoted; the
/// coordinates stay bare numbers.
pub fn write_csv(path: &str, records: &[Property]) -> Result<(), Box<dyn Error>> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_path(path)?;
    wtr.write_record(EXPORT_HEADER)?;
    for p in records {
        let longitude = p.longitude.to_string();
        let latitude = p.latitude.to_string();
        wtr.write_record([
            p.id.as_str(),
            p.street.as_str(),
            p.house_number.as_str(),
            p.zone.label(),
            p.property_type.label(),
            p.status.label(),
            p.complement.as_deref().unwrap_or(""),
            p.neighborhood.as_str(),
            p.process_number.as_str(),
            p.notice_id.as_deref().unwrap_or(""),
            longitude.as_str(),
            latitude.as_str(),
            p.photo_url.as_deref().unwrap_or(""),
            p.registration_date.as_str(),
            p.notes.as_deref().unwrap_or(""),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Serialize a value (records or statistics) as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Print up to `max_rows` of a report as a markdown table.
pub fn preview_table<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(sem registros)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dated_filename_has_extension_and_date() {
        let name = dated_filename("csv");
        assert!(name.starts_with("imoveis-abandonados-"));
        assert!(name.ends_with(".csv"));
        // imoveis-abandonados-YYYY-MM-DD.csv
        assert_eq!(name.len(), "imoveis-abandonados-".len() + 10 + 4);
    }
}
