use crate::filter::FilterField;
use crate::insight::Insight;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Distinct values observed per filterable field, for populating filter
/// controls. `end_year` is sorted; the rest keep first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub end_year: Vec<String>,
    pub topic: Vec<String>,
    pub sector: Vec<String>,
    pub region: Vec<String>,
    pub pestle: Vec<String>,
    pub source: Vec<String>,
    pub swot: Vec<String>,
    pub country: Vec<String>,
    pub city: Vec<String>,
}

impl FilterOptions {
    pub fn discover(data: &[Insight]) -> Self {
        let mut end_year = distinct_values(data, FilterField::EndYear);
        end_year.sort();

        Self {
            end_year,
            topic: distinct_values(data, FilterField::Topic),
            sector: distinct_values(data, FilterField::Sector),
            region: distinct_values(data, FilterField::Region),
            pestle: distinct_values(data, FilterField::Pestle),
            source: distinct_values(data, FilterField::Source),
            swot: distinct_values(data, FilterField::Swot),
            country: distinct_values(data, FilterField::Country),
            city: distinct_values(data, FilterField::City),
        }
    }

    pub fn values(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::EndYear => &self.end_year,
            FilterField::Topic => &self.topic,
            FilterField::Sector => &self.sector,
            FilterField::Region => &self.region,
            FilterField::Pestle => &self.pestle,
            FilterField::Source => &self.source,
            FilterField::Swot => &self.swot,
            FilterField::Country => &self.country,
            FilterField::City => &self.city,
        }
    }
}

fn distinct_values(data: &[Insight], field: FilterField) -> Vec<String> {
    let mut seen = HashSet::new();
    data.iter()
        .filter_map(|insight| field.value_of(insight))
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_string)
        .collect()
}
