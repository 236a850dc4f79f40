// Classification of free-text CSV fields into the three closed categories,
// plus coordinate coercion. Every function here is total: the source data is
// known to contain blank and malformed fields, and a row must never be
// rejected for that reason. Unrecognized text degrades to the most common
// category instead.

use crate::types::{PropertyType, Status, Zone};

/// Classify the raw zone text. Checks "sul", then "leste", then "oeste" as
/// substrings of the lowercased input; anything else (including blank) is
/// `Norte`.
pub fn zone(raw: Option<&str>) -> Zone {
    let Some(raw) = raw else { return Zone::North };
    let z = raw.to_lowercase();
    if z.contains("sul") {
        Zone::South
    } else if z.contains("leste") {
        Zone::East
    } else if z.contains("oeste") {
        Zone::West
    } else {
        Zone::North
    }
}

/// Classify the raw type text. Accent-stripped spellings are accepted because
/// the field may arrive either repaired or with its accents dropped.
pub fn property_type(raw: Option<&str>) -> PropertyType {
    let Some(raw) = raw else {
        return PropertyType::House;
    };
    let t = raw.to_lowercase();
    if t.contains("prédio") || t.contains("predio") {
        PropertyType::Building
    } else if t.contains("terreno") {
        PropertyType::Lot
    } else if t.contains("construção") || t.contains("construcao") {
        PropertyType::UnderConstruction
    } else {
        PropertyType::House
    }
}

/// Classify the raw status text. Blank or unrecognized means `Abandonado`.
pub fn status(raw: Option<&str>) -> Status {
    let Some(raw) = raw else {
        return Status::Abandoned;
    };
    let s = raw.to_lowercase();
    if s.contains("regularizado") {
        Status::Regularized
    } else if s.contains("análise") || s.contains("analise") {
        Status::UnderReview
    } else {
        Status::Abandoned
    }
}

/// Coerce a coordinate field to `f64`. The source uses a comma as the decimal
/// separator, so the comma is swapped for a period before parsing. Anything
/// unparseable becomes `0.0`, the sentinel for "no valid coordinate".
pub fn parse_coord(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else { return 0.0 };
    let s = raw.trim().replace(',', ".");
    s.parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PropertyType, Status, Zone};

    #[test]
    fn zone_substring_priority() {
        assert_eq!(zone(Some("sul")), Zone::South);
        assert_eq!(zone(Some("Zona SUL")), Zone::South);
        assert_eq!(zone(Some("leste")), Zone::East);
        assert_eq!(zone(Some("zona oeste")), Zone::West);
        assert_eq!(zone(Some("norte")), Zone::North);
    }

    #[test]
    fn zone_defaults_to_north() {
        assert_eq!(zone(None), Zone::North);
        assert_eq!(zone(Some("")), Zone::North);
        assert_eq!(zone(Some("centro")), Zone::North);
    }

    #[test]
    fn type_accepts_both_spellings() {
        assert_eq!(property_type(Some("Prédio")), PropertyType::Building);
        assert_eq!(property_type(Some("PREDIO comercial")), PropertyType::Building);
        assert_eq!(property_type(Some("terreno baldio")), PropertyType::Lot);
        assert_eq!(
            property_type(Some("construção")),
            PropertyType::UnderConstruction
        );
        assert_eq!(
            property_type(Some("Construcao inacabada")),
            PropertyType::UnderConstruction
        );
    }

    #[test]
    fn type_defaults_to_house() {
        assert_eq!(property_type(None), PropertyType::House);
        assert_eq!(property_type(Some("casa")), PropertyType::House);
        assert_eq!(property_type(Some("galpão")), PropertyType::House);
    }

    #[test]
    fn status_classification() {
        assert_eq!(status(Some("Regularizado")), Status::Regularized);
        assert_eq!(status(Some("em análise")), Status::UnderReview);
        assert_eq!(status(Some("Em Analise")), Status::UnderReview);
        assert_eq!(status(Some("")), Status::Abandoned);
        assert_eq!(status(None), Status::Abandoned);
    }

    #[test]
    fn coord_comma_decimal() {
        assert_eq!(parse_coord(Some("-5,08")), -5.08);
        assert_eq!(parse_coord(Some("-42,80")), -42.80);
        assert_eq!(parse_coord(Some(" -5.093 ")), -5.093);
    }

    #[test]
    fn coord_sentinel_on_garbage() {
        assert_eq!(parse_coord(None), 0.0);
        assert_eq!(parse_coord(Some("")), 0.0);
        assert_eq!(parse_coord(Some("s/c")), 0.0);
    }
}
