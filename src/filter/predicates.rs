//! Pure record predicates and their combinator
//!
//! Each predicate is a total function of `(record, criteria)`: a record that
//! lacks the field a constraint needs is excluded, never an error.

use crate::filter::FilterCriteria;
use crate::records::{FilterableRecord, HasCost, HasCountry, HasDateRange, Identified};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;

/// Selection value that matches records with no association at all
pub const NULL_SELECTION: &str = "null";

/// Boxed record predicate
pub type Predicate<'a, R> = Box<dyn Fn(&R) -> bool + 'a>;

/// AND of all predicates, stopping at the first failure
pub fn all_of<'a, R: 'a>(predicates: Vec<Predicate<'a, R>>) -> impl Fn(&R) -> bool + 'a {
    move |record| predicates.iter().all(|predicate| predicate(record))
}

/// Country is one of the selected codes
pub fn matches_country<R: HasCountry + ?Sized>(record: &R, countries: &BTreeSet<String>) -> bool {
    if countries.is_empty() {
        return true;
    }
    record.country().is_some_and(|code| countries.contains(code))
}

/// Record interval overlaps the inclusive `(min, max)` year window
pub fn matches_year_range<R: HasDateRange + ?Sized>(record: &R, window: Option<(i32, i32)>) -> bool {
    let Some((min_year, max_year)) = window else {
        return true;
    };

    let start = record.start_date().and_then(parse_year);
    let end = record.end_date().and_then(parse_year);
    match (start, end) {
        (Some(start), Some(end)) => max_year >= start && min_year <= end,
        _ => false,
    }
}

/// Cost reaches the minimum budget; a null cost fails any positive minimum
pub fn matches_budget<R: HasCost + ?Sized>(record: &R, min_budget: f64) -> bool {
    if !(min_budget > 0.0) {
        return true;
    }
    record.total_cost().is_some_and(|cost| cost >= min_budget)
}

/// Associated ids intersect the selection.
///
/// An empty association only matches when the selection holds [`NULL_SELECTION`].
pub fn matches_any(associated: &[String], selected: &BTreeSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    if associated.is_empty() {
        return selected.contains(NULL_SELECTION);
    }
    associated.iter().any(|id| selected.contains(id))
}

/// Id is in the resolved search result set
pub fn matches_search<R: Identified + ?Sized>(record: &R, search_ids: Option<&BTreeSet<String>>) -> bool {
    match search_ids {
        None => true,
        Some(ids) => ids.contains(record.id()),
    }
}

/// Calendar year of an ISO date, datetime or bare year string
pub(crate) fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date.year());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.year());
    }
    if let Ok(datetime) = raw.parse::<NaiveDateTime>() {
        return Some(datetime.year());
    }
    if raw.len() == 4 {
        return raw.parse::<i32>().ok();
    }
    None
}

/// The active predicates of one `FilterCriteria`, cheapest first
pub struct PredicateFilterSet<'a, R> {
    predicates: Vec<Predicate<'a, R>>,
    dimensions: Vec<&'static str>,
}

impl<'a, R: FilterableRecord + 'a> PredicateFilterSet<'a, R> {
    /// Build predicates for every constrained dimension of `criteria`
    pub fn from_criteria(criteria: &'a FilterCriteria) -> Self {
        let mut set = Self {
            predicates: Vec::new(),
            dimensions: Vec::new(),
        };

        if !criteria.countries.is_empty() {
            set.push("country", Box::new(move |r: &R| matches_country(r, &criteria.countries)));
        }
        if criteria.year_range.is_some() {
            set.push("year", Box::new(move |r: &R| matches_year_range(r, criteria.year_range)));
        }
        if criteria.min_budget > 0.0 {
            set.push("budget", Box::new(move |r: &R| matches_budget(r, criteria.min_budget)));
        }
        if !criteria.topics.is_empty() {
            set.push("topic", Box::new(move |r: &R| matches_any(r.topic_ids(), &criteria.topics)));
        }
        if !criteria.framework_programmes.is_empty() {
            set.push(
                "framework_programme",
                Box::new(move |r: &R| matches_any(r.framework_programmes(), &criteria.framework_programmes)),
            );
        }
        if let Some(ids) = &criteria.search_ids {
            set.push("search", Box::new(move |r: &R| matches_search(r, Some(ids))));
        }

        set
    }

    fn push(&mut self, dimension: &'static str, predicate: Predicate<'a, R>) {
        self.dimensions.push(dimension);
        self.predicates.push(predicate);
    }

    /// Names of the constrained dimensions in evaluation order
    pub fn dimensions(&self) -> &[&'static str] {
        &self.dimensions
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluate every active predicate, stopping at the first failure
    pub fn matches(&self, record: &R) -> bool {
        self.predicates.iter().all(|predicate| predicate(record))
    }

    /// Records passing every predicate, in input order
    pub fn apply(&self, records: &[R]) -> Vec<R>
    where
        R: Clone,
    {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    /// Collapse into a single predicate
    pub fn into_predicate(self) -> impl Fn(&R) -> bool + 'a {
        all_of(self.predicates)
    }
}
