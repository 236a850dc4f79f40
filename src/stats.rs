use crate::types::{Property, Statistics, StreetCount};
use std::cmp::Reverse;
use std::collections::HashMap;

/// How many streets the ranking keeps.
const TOP_STREETS: usize = 10;

/// Compute the derived statistics for a record collection, usually the
/// currently filtered subset. Single pass over the records plus one sort of
/// the distinct street names.
pub fn aggregate(records: &[Property]) -> Statistics {
    let mut by_type = HashMap::new();
    let mut by_zone = HashMap::new();
    let mut by_status = HashMap::new();
    let mut street_counts: HashMap<&str, usize> = HashMap::new();

    for p in records {
        *by_type.entry(p.property_type).or_insert(0) += 1;
        *by_zone.entry(p.zone).or_insert(0) += 1;
        *by_status.entry(p.status).or_insert(0) += 1;
        *street_counts.entry(p.street.as_str()).or_insert(0) += 1;
    }

    // Descending by count; equal counts ordered alphabetically so the
    // ranking is deterministic across runs.
    let mut streets: Vec<StreetCount> = street_counts
        .into_iter()
        .map(|(street, count)| StreetCount {
            street: street.to_string(),
            count,
        })
        .collect();
    streets.sort_by(|a, b| {
        Reverse(a.count)
            .cmp(&Reverse(b.count))
            .then_with(|| a.street.cmp(&b.street))
    });
    streets.truncate(TOP_STREETS);

    Statistics {
        total: records.len(),
        by_type,
        by_zone,
        by_status,
        top_streets: streets,
    }
}

/// Share of `count` in `total` as a percentage. A zero total reads as 0%
/// rather than NaN so empty filter results render cleanly.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PropertyType, Status, Zone};

    fn property(street: &str, zone: Zone, tipo: PropertyType, status: Status) -> Property {
        Property {
            id: street.to_string(),
            street: street.to_string(),
            house_number: "S/N".to_string(),
            zone,
            property_type: tipo,
            status,
            complement: None,
            neighborhood: "Centro".to_string(),
            process_number: String::new(),
            notice_id: None,
            longitude: 0.0,
            latitude: 0.0,
            photo_url: None,
            registration_date: "2026-08-23".to_string(),
            notes: None,
        }
    }

    #[test]
    fn top_streets_ranked_by_count() {
        let records = vec![
            property("Rua A", Zone::North, PropertyType::House, Status::Abandoned),
            property("Rua A", Zone::North, PropertyType::House, Status::Abandoned),
            property("Rua B", Zone::North, PropertyType::House, Status::Abandoned),
        ];
        let stats = aggregate(&records);
        assert_eq!(
            stats.top_streets,
            vec![
                StreetCount { street: "Rua A".to_string(), count: 2 },
                StreetCount { street: "Rua B".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn ties_break_alphabetically() {
        let records = vec![
            property("Rua Z", Zone::North, PropertyType::House, Status::Abandoned),
            property("Rua A", Zone::North, PropertyType::House, Status::Abandoned),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.top_streets[0].street, "Rua A");
        assert_eq!(stats.top_streets[1].street, "Rua Z");
    }

    #[test]
    fn ranking_keeps_at_most_ten() {
        let records: Vec<Property> = (0..15)
            .map(|i| {
                property(
                    &format!("Rua {:02}", i),
                    Zone::North,
                    PropertyType::House,
                    Status::Abandoned,
                )
            })
            .collect();
        assert_eq!(aggregate(&records).top_streets.len(), 10);
    }

    #[test]
    fn grouped_counts_sum_to_total() {
        let records = vec![
            property("Rua A", Zone::South, PropertyType::House, Status::Abandoned),
            property("Rua B", Zone::North, PropertyType::Lot, Status::Regularized),
            property("Rua C", Zone::South, PropertyType::House, Status::UnderReview),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_zone.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_type.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_zone[&Zone::South], 2);
    }

    #[test]
    fn empty_collection_is_all_zeroes() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.top_streets.is_empty());
        assert_eq!(percentage(0, stats.total), 0.0);
    }

    #[test]
    fn percentage_of_nonzero_total() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(3, 3), 100.0);
    }
}
