//! Record capabilities and the concrete research-funding rows
//!
//! Predicates and the grouper are generic over small capability traits
//! rather than over concrete row types, so any row the API layer hands
//! over can be filtered as long as it says what it carries.

use serde::{Deserialize, Serialize};

/// Row with a unique string identifier
pub trait Identified {
    fn id(&self) -> &str;
}

/// Row that may sit at a `[lat, lon]` position
pub trait HasGeolocation: Identified {
    fn geolocation(&self) -> Option<[f64; 2]>;
}

/// Row attached to a country code
pub trait HasCountry {
    fn country(&self) -> Option<&str>;
}

/// Row with an activity interval given as ISO date strings
pub trait HasDateRange {
    fn start_date(&self) -> Option<&str>;
    fn end_date(&self) -> Option<&str>;
}

/// Row with a total cost / funding amount
pub trait HasCost {
    fn total_cost(&self) -> Option<f64>;
}

/// Row associated with zero or more topic ids
pub trait HasTopics {
    fn topic_ids(&self) -> &[String];
}

/// Row associated with zero or more framework programmes (e.g. `H2020`)
pub trait HasFrameworkProgrammes {
    fn framework_programmes(&self) -> &[String];
}

/// Row exposing text fields for free-text search
pub trait Searchable: Identified {
    fn search_text(&self) -> Vec<&str>;
}

/// Everything the full predicate set needs to evaluate a row
pub trait FilterableRecord:
    Identified + HasCountry + HasDateRange + HasCost + HasTopics + HasFrameworkProgrammes
{
}

impl<T> FilterableRecord for T where
    T: Identified + HasCountry + HasDateRange + HasCost + HasTopics + HasFrameworkProgrammes
{
}

/// A research institution participating in funded projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub geolocation: Option<[f64; 2]>,
    /// Funding received across all participations
    #[serde(default)]
    pub total_cost: Option<f64>,
    /// Start of the earliest participation
    #[serde(default)]
    pub start_date: Option<String>,
    /// End of the latest participation
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub framework_programmes: Vec<String>,
}

/// A funded research project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub acronym: Option<String>,
    pub title: String,
    /// Country of the coordinating institution
    #[serde(default)]
    pub coordinator_country: Option<String>,
    /// Position of the coordinating institution
    #[serde(default)]
    pub geolocation: Option<[f64; 2]>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub framework_programme: Option<String>,
}

impl Identified for Institution {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasGeolocation for Institution {
    fn geolocation(&self) -> Option<[f64; 2]> {
        self.geolocation
    }
}

impl HasCountry for Institution {
    fn country(&self) -> Option<&str> {
        self.country_code.as_deref()
    }
}

impl HasDateRange for Institution {
    fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }
}

impl HasCost for Institution {
    fn total_cost(&self) -> Option<f64> {
        self.total_cost
    }
}

impl HasTopics for Institution {
    fn topic_ids(&self) -> &[String] {
        &self.topics
    }
}

impl HasFrameworkProgrammes for Institution {
    fn framework_programmes(&self) -> &[String] {
        &self.framework_programmes
    }
}

impl Searchable for Institution {
    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(short) = &self.short_name {
            fields.push(short);
        }
        fields
    }
}

impl Identified for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasGeolocation for Project {
    fn geolocation(&self) -> Option<[f64; 2]> {
        self.geolocation
    }
}

impl HasCountry for Project {
    fn country(&self) -> Option<&str> {
        self.coordinator_country.as_deref()
    }
}

impl HasDateRange for Project {
    fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }
}

impl HasCost for Project {
    fn total_cost(&self) -> Option<f64> {
        self.total_cost
    }
}

impl HasTopics for Project {
    fn topic_ids(&self) -> &[String] {
        &self.topics
    }
}

impl HasFrameworkProgrammes for Project {
    fn framework_programmes(&self) -> &[String] {
        self.framework_programme.as_slice()
    }
}

impl Searchable for Project {
    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(acronym) = &self.acronym {
            fields.push(acronym);
        }
        fields
    }
}
