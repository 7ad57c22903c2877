//! Free-text search resolution

use crate::records::Searchable;
use std::collections::BTreeSet;

/// Resolve a free-text query to the ids of matching records.
///
/// Matching is a case-insensitive substring test over each record's search
/// fields. A blank query resolves to `None`, which filters nothing; a query
/// that matches nothing resolves to an empty set, which filters everything.
pub fn resolve_search<R: Searchable>(records: &[R], query: &str) -> Option<BTreeSet<String>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let ids: BTreeSet<String> = records
        .iter()
        .filter(|record| {
            record
                .search_text()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .map(|record| record.id().to_string())
        .collect();

    log::debug!("Search {:?} matched {} records", query, ids.len());
    Some(ids)
}
