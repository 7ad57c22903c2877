//! Multi-criteria record filtering module

pub mod criteria;
pub mod facets;
pub mod predicates;
pub mod search;

pub use criteria::FilterCriteria;
pub use facets::Facets;
pub use predicates::{all_of, Predicate, PredicateFilterSet, NULL_SELECTION};
pub use search::resolve_search;
