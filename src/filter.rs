// Filtering of the loaded collection and the cross-filter option sets that
// feed the dropdowns. Everything here is pure and single-pass; the canonical
// collection is never mutated, only borrowed.

use crate::types::{FilterSpec, Property};

/// The dropdowns send this literal to mean "no constraint".
pub const ALL_SENTINEL: &str = "Todos";

/// One filterable dimension, named so callers can ask for its option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    ProcessNumber,
    NoticeId,
    Street,
    Type,
    Zone,
    Status,
}

/// True when a text filter actually constrains anything: present, non-empty
/// and not the "Todos" sentinel.
fn is_active(filter: &Option<String>) -> bool {
    matches!(filter.as_deref(), Some(v) if !v.is_empty() && v != ALL_SENTINEL)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(property: &Property, spec: &FilterSpec) -> bool {
    // Process number and notice id match on case-insensitive containment so
    // a partial case reference like "123" finds "SEI-0012345".
    if is_active(&spec.process_number) {
        let needle = spec.process_number.as_deref().unwrap_or_default();
        if !contains_ci(&property.process_number, needle) {
            return false;
        }
    }
    if is_active(&spec.notice_id) {
        let needle = spec.notice_id.as_deref().unwrap_or_default();
        // Records with no notice id at all are not constrained by this
        // filter; only a present notice id that lacks the needle excludes.
        if let Some(notice) = &property.notice_id {
            if !contains_ci(notice, needle) {
                return false;
            }
        }
    }
    // Street is an exact pick from the dropdown, not a search.
    if is_active(&spec.street) {
        if Some(property.street.as_str()) != spec.street.as_deref() {
            return false;
        }
    }
    if !spec.types.is_empty() && !spec.types.contains(&property.property_type) {
        return false;
    }
    if !spec.zones.is_empty() && !spec.zones.contains(&property.zone) {
        return false;
    }
    if !spec.statuses.is_empty() && !spec.statuses.contains(&property.status) {
        return false;
    }
    true
}

/// Apply every active dimension of `spec` as a logical AND over `records`.
/// Pure and idempotent: filtering the result again with the same spec is a
/// no-op.
pub fn apply(records: &[Property], spec: &FilterSpec) -> Vec<Property> {
    records
        .iter()
        .filter(|p| matches(p, spec))
        .cloned()
        .collect()
}

/// Copy of `spec` with the named dimension forced to "unconstrained".
fn without_dimension(spec: &FilterSpec, dimension: Dimension) -> FilterSpec {
    let mut relaxed = spec.clone();
    match dimension {
        Dimension::ProcessNumber => relaxed.process_number = None,
        Dimension::NoticeId => relaxed.notice_id = None,
        Dimension::Street => relaxed.street = None,
        Dimension::Type => relaxed.types.clear(),
        Dimension::Zone => relaxed.zones.clear(),
        Dimension::Status => relaxed.statuses.clear(),
    }
    relaxed
}

fn dimension_value(property: &Property, dimension: Dimension) -> Option<String> {
    match dimension {
        Dimension::ProcessNumber => Some(property.process_number.clone()),
        Dimension::NoticeId => property.notice_id.clone(),
        Dimension::Street => Some(property.street.clone()),
        Dimension::Type => Some(property.property_type.to_string()),
        Dimension::Zone => Some(property.zone.to_string()),
        Dimension::Status => Some(property.status.to_string()),
    }
}

/// Available options for one dropdown: re-filter with every *other* active
/// dimension, then collect the distinct non-blank values of this one, sorted
/// ascending. A dimension never constrains its own option list, so the
/// current selection always remains offered.
pub fn options_for(dimension: Dimension, records: &[Property], spec: &FilterSpec) -> Vec<String> {
    let relaxed = without_dimension(spec, dimension);
    let mut values: Vec<String> = apply(records, &relaxed)
        .iter()
        .filter_map(|p| dimension_value(p, dimension))
        .filter(|v| !v.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

/// Narrow an option list by a case-insensitive substring search. This is the
/// search box above the street dropdown; it trims the visible options without
/// touching the underlying filtered set.
pub fn search_options(options: &[String], query: &str) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return options.to_vec();
    }
    options
        .iter()
        .filter(|o| contains_ci(o, query))
        .cloned()
        .collect()
}
