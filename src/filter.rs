//! Filter Predicate Evaluator
//!
//! One predicate shared by listing, charts, stats and export. `end_year`
//! compares exactly; every other field is a case-insensitive substring test.
//! A record lacking a constrained field never matches that constraint.

use crate::insight::Insight;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    EndYear,
    Topic,
    Sector,
    Region,
    Pestle,
    Source,
    Swot,
    Country,
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    ContainsIgnoreCase,
}

impl FilterField {
    pub const ALL: [FilterField; 9] = [
        FilterField::EndYear,
        FilterField::Topic,
        FilterField::Sector,
        FilterField::Region,
        FilterField::Pestle,
        FilterField::Source,
        FilterField::Swot,
        FilterField::Country,
        FilterField::City,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FilterField::EndYear => "end_year",
            FilterField::Topic => "topic",
            FilterField::Sector => "sector",
            FilterField::Region => "region",
            FilterField::Pestle => "pestle",
            FilterField::Source => "source",
            FilterField::Swot => "swot",
            FilterField::Country => "country",
            FilterField::City => "city",
        }
    }

    /// Query parameter names for this field, in lookup order. `end_year`
    /// also answers to the `endYear` spelling used by the UI.
    pub fn param_keys(&self) -> &'static [&'static str] {
        match self {
            FilterField::EndYear => &["end_year", "endYear"],
            FilterField::Topic => &["topic"],
            FilterField::Sector => &["sector"],
            FilterField::Region => &["region"],
            FilterField::Pestle => &["pestle"],
            FilterField::Source => &["source"],
            FilterField::Swot => &["swot"],
            FilterField::Country => &["country"],
            FilterField::City => &["city"],
        }
    }

    pub fn mode(&self) -> MatchMode {
        match self {
            FilterField::EndYear => MatchMode::Exact,
            _ => MatchMode::ContainsIgnoreCase,
        }
    }

    pub fn value_of<'a>(&self, insight: &'a Insight) -> Option<&'a str> {
        let value = match self {
            FilterField::EndYear => &insight.end_year,
            FilterField::Topic => &insight.topic,
            FilterField::Sector => &insight.sector,
            FilterField::Region => &insight.region,
            FilterField::Pestle => &insight.pestle,
            FilterField::Source => &insight.source,
            FilterField::Swot => &insight.swot,
            FilterField::Country => &insight.country,
            FilterField::City => &insight.city,
        };
        value.as_deref()
    }
}

impl MatchMode {
    pub fn accepts(&self, candidate: &str, wanted: &str) -> bool {
        match self {
            MatchMode::Exact => candidate == wanted,
            MatchMode::ContainsIgnoreCase => candidate
                .to_lowercase()
                .contains(&wanted.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub end_year: Option<String>,
    pub topic: Option<String>,
    pub sector: Option<String>,
    pub region: Option<String>,
    pub pestle: Option<String>,
    pub source: Option<String>,
    pub swot: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        let slot = match field {
            FilterField::EndYear => &mut self.end_year,
            FilterField::Topic => &mut self.topic,
            FilterField::Sector => &mut self.sector,
            FilterField::Region => &mut self.region,
            FilterField::Pestle => &mut self.pestle,
            FilterField::Source => &mut self.source,
            FilterField::Swot => &mut self.swot,
            FilterField::Country => &mut self.country,
            FilterField::City => &mut self.city,
        };
        *slot = value;
    }

    /// The constraint on `field`; empty strings count as unset.
    pub fn get(&self, field: FilterField) -> Option<&str> {
        let value = match field {
            FilterField::EndYear => &self.end_year,
            FilterField::Topic => &self.topic,
            FilterField::Sector => &self.sector,
            FilterField::Region => &self.region,
            FilterField::Pestle => &self.pestle,
            FilterField::Source => &self.source,
            FilterField::Swot => &self.swot,
            FilterField::Country => &self.country,
            FilterField::City => &self.city,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> + '_ {
        FilterField::ALL
            .iter()
            .filter_map(move |field| self.get(*field).map(|v| (*field, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Builds criteria from raw query parameters, ignoring unknown keys.
    /// When a field is given under several names, the first non-empty one
    /// in `param_keys` order wins.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut criteria = Self::default();
        for field in FilterField::ALL {
            let value = field
                .param_keys()
                .iter()
                .filter_map(|key| params.get(*key))
                .find(|value| !value.is_empty());
            criteria.set(field, value.cloned());
        }
        criteria
    }

    pub fn matches(&self, insight: &Insight) -> bool {
        self.active().all(|(field, wanted)| {
            field
                .value_of(insight)
                .is_some_and(|candidate| field.mode().accepts(candidate, wanted))
        })
    }

    /// Matching records in dataset order.
    pub fn apply<'a>(&self, data: &'a [Insight]) -> Vec<&'a Insight> {
        data.iter().filter(|insight| self.matches(insight)).collect()
    }
}
