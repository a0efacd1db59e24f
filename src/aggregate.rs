//! Aggregation Functions
//!
//! Each chart metric reduces an already-filtered record set into labels plus
//! one numeric series. Groups keep first-occurrence order unless a metric
//! ranks them. All functions are total: empty input yields empty series.

use crate::filter::FilterField;
use crate::insight::{averageable, Insight};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Topic and country rankings keep only this many entries.
pub const TOP_N: usize = 10;

lazy_static! {
    static ref LEADING_DIGITS: Regex = Regex::new(r"^\d+").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    pub fn single(label: impl Into<String>, series: Vec<(String, f64)>) -> Self {
        let (labels, data) = series.into_iter().unzip();
        Self {
            labels,
            datasets: vec![ChartDataset {
                label: label.into(),
                data,
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Numeric score carried by each insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Intensity,
    Likelihood,
    Relevance,
}

impl Score {
    pub fn of(&self, insight: &Insight) -> Option<f64> {
        match self {
            Score::Intensity => insight.intensity,
            Score::Likelihood => insight.likelihood,
            Score::Relevance => insight.relevance,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    sum: f64,
    count: usize,
}

/// Buckets keyed by label, remembering first-occurrence order.
#[derive(Debug, Default)]
struct OrderedBuckets {
    index: HashMap<String, usize>,
    buckets: Vec<(String, Bucket)>,
}

impl OrderedBuckets {
    fn add(&mut self, key: &str, value: f64) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.index.insert(key.to_string(), self.buckets.len());
                self.buckets.push((key.to_string(), Bucket::default()));
                self.buckets.len() - 1
            }
        };
        let bucket = &mut self.buckets[slot].1;
        bucket.sum += value;
        bucket.count += 1;
    }

    fn sums(self) -> Vec<(String, f64)> {
        self.buckets.into_iter().map(|(k, b)| (k, b.sum)).collect()
    }

    fn counts(self) -> Vec<(String, f64)> {
        self.buckets
            .into_iter()
            .map(|(k, b)| (k, b.count as f64))
            .collect()
    }

    fn means(self) -> Vec<(String, f64)> {
        self.buckets
            .into_iter()
            .filter(|(_, b)| b.count > 0)
            .map(|(k, b)| (k, b.sum / b.count as f64))
            .collect()
    }
}

/// Sum of `score` per distinct `key`; an absent score adds 0.
pub fn sum_by_category(data: &[&Insight], key: FilterField, score: Score) -> Vec<(String, f64)> {
    let mut buckets = OrderedBuckets::default();
    for insight in data {
        if let Some(group) = key.value_of(insight) {
            buckets.add(group, score.of(insight).unwrap_or(0.0));
        }
    }
    buckets.sums()
}

/// Mean of `score` per distinct `key`, over records whose score is present
/// and non-zero. A group with no such record does not appear.
pub fn average_by_category(
    data: &[&Insight],
    key: FilterField,
    score: Score,
) -> Vec<(String, f64)> {
    let mut buckets = OrderedBuckets::default();
    for insight in data {
        if let (Some(group), Some(value)) = (key.value_of(insight), averageable(score.of(insight))) {
            buckets.add(group, value);
        }
    }
    buckets.means()
}

/// Occurrences per distinct `key`. With a limit, groups are ranked by
/// descending count (ties keep first-occurrence order) and truncated.
pub fn frequency_by_category(
    data: &[&Insight],
    key: FilterField,
    limit: Option<usize>,
) -> Vec<(String, f64)> {
    let mut buckets = OrderedBuckets::default();
    for insight in data {
        if let Some(group) = key.value_of(insight) {
            buckets.add(group, 0.0);
        }
    }
    let counts = buckets.counts();

    match limit {
        Some(limit) => counts
            .into_iter()
            .sorted_by(|a, b| b.1.total_cmp(&a.1))
            .take(limit)
            .collect(),
        None => counts,
    }
}

/// Year token of a `published` string such as `"January, 09 2017 00:00:00"`:
/// the leading digits of whatever follows the first `", "`.
pub fn extract_year(published: &str) -> Option<&str> {
    let token = published.split(", ").nth(1)?;
    LEADING_DIGITS.find(token).map(|m| m.as_str())
}

/// Mean of `score` per year token, years ascending. Records without a usable
/// `published` value are skipped.
pub fn yearly_average(data: &[&Insight], score: Score) -> Vec<(String, f64)> {
    let mut buckets = OrderedBuckets::default();
    for insight in data {
        let year = insight.published.as_deref().and_then(extract_year);
        if let (Some(year), Some(value)) = (year, averageable(score.of(insight))) {
            buckets.add(year, value);
        }
    }
    let mut means = buckets.means();
    means.sort_by(|a, b| a.0.cmp(&b.0));
    means
}

/// Chart metrics selectable through `chartType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartKind {
    #[default]
    IntensityByRegion,
    LikelihoodByRegion,
    RelevanceByRegion,
    TopicDistribution,
    IntensityBySector,
    YearlyTrends,
    CountryComparison,
    PestleAnalysis,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::IntensityByRegion,
        ChartKind::LikelihoodByRegion,
        ChartKind::RelevanceByRegion,
        ChartKind::TopicDistribution,
        ChartKind::IntensityBySector,
        ChartKind::YearlyTrends,
        ChartKind::CountryComparison,
        ChartKind::PestleAnalysis,
    ];

    pub fn selector(&self) -> &'static str {
        match self {
            ChartKind::IntensityByRegion => "intensityByRegion",
            ChartKind::LikelihoodByRegion => "likelihoodByRegion",
            ChartKind::RelevanceByRegion => "relevanceByRegion",
            ChartKind::TopicDistribution => "topicDistribution",
            ChartKind::IntensityBySector => "intensityBySector",
            ChartKind::YearlyTrends => "yearlyTrends",
            ChartKind::CountryComparison => "countryComparison",
            ChartKind::PestleAnalysis => "pestleAnalysis",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::IntensityByRegion => "Intensity by Region",
            ChartKind::LikelihoodByRegion => "Average Likelihood by Region",
            ChartKind::RelevanceByRegion => "Average Relevance by Region",
            ChartKind::TopicDistribution => "Topic Distribution",
            ChartKind::IntensityBySector => "Average Intensity by Sector",
            ChartKind::YearlyTrends => "Average Intensity Yearly Trend",
            ChartKind::CountryComparison => "Insights by Country",
            ChartKind::PestleAnalysis => "PESTLE Analysis",
        }
    }

    /// Unknown or missing selectors fall back to `intensityByRegion`.
    pub fn from_selector(selector: Option<&str>) -> Self {
        selector
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn compute(&self, data: &[&Insight]) -> ChartData {
        let series = match self {
            ChartKind::IntensityByRegion => {
                sum_by_category(data, FilterField::Region, Score::Intensity)
            }
            ChartKind::LikelihoodByRegion => {
                average_by_category(data, FilterField::Region, Score::Likelihood)
            }
            ChartKind::RelevanceByRegion => {
                average_by_category(data, FilterField::Region, Score::Relevance)
            }
            ChartKind::IntensityBySector => {
                average_by_category(data, FilterField::Sector, Score::Intensity)
            }
            ChartKind::TopicDistribution => {
                frequency_by_category(data, FilterField::Topic, Some(TOP_N))
            }
            ChartKind::CountryComparison => {
                frequency_by_category(data, FilterField::Country, Some(TOP_N))
            }
            ChartKind::PestleAnalysis => frequency_by_category(data, FilterField::Pestle, None),
            ChartKind::YearlyTrends => yearly_average(data, Score::Intensity),
        };
        ChartData::single(self.label(), series)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.selector() == s)
            .ok_or_else(|| format!("Unknown chart type: {}", s))
    }
}
