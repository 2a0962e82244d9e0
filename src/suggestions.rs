//! Tag autosuggest for the goal and condition pickers.
//!
//! Matches the typed text against the reference catalogs from the snapshot.
//! No ranking: catalog order is display order.

/// Catalog entries containing `query` (case-insensitive) that are not
/// already selected. A blank query suggests nothing.
pub fn suggest<'a>(catalog: &'a [String], query: &str, selected: &[String]) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .filter(|candidate| !selected.contains(*candidate))
        .map(String::as_str)
        .collect()
}
