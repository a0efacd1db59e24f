//! Stats Summary Service - scalar summary over a filtered subset

use crate::aggregate::Score;
use crate::insight::{averageable, Insight};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Categorical fields fall back to this when nothing qualifies.
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_records: usize,
    pub avg_intensity: f64,
    pub avg_likelihood: f64,
    pub avg_relevance: f64,
    pub top_region: String,
    pub top_topic: String,
    pub filtered_percentage: u32,
    pub total_dataset_size: usize,
}

impl StatsSummary {
    pub fn empty(total_dataset_size: usize) -> Self {
        Self {
            total_records: 0,
            avg_intensity: 0.0,
            avg_likelihood: 0.0,
            avg_relevance: 0.0,
            top_region: NOT_APPLICABLE.to_string(),
            top_topic: NOT_APPLICABLE.to_string(),
            filtered_percentage: 0,
            total_dataset_size,
        }
    }
}

pub fn summarize(data: &[&Insight], total_dataset_size: usize) -> StatsSummary {
    if data.is_empty() {
        return StatsSummary::empty(total_dataset_size);
    }

    StatsSummary {
        total_records: data.len(),
        avg_intensity: rounded_mean(data, Score::Intensity),
        avg_likelihood: rounded_mean(data, Score::Likelihood),
        avg_relevance: rounded_mean(data, Score::Relevance),
        top_region: most_frequent(data.iter().map(|i| i.region.as_deref())),
        top_topic: most_frequent(data.iter().map(|i| i.topic.as_deref())),
        filtered_percentage: filtered_percentage(data.len(), total_dataset_size),
        total_dataset_size,
    }
}

/// `round(100 * filtered / total)`, capped to 100; 0 for an empty dataset.
pub fn filtered_percentage(filtered: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (filtered as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Mean over present, non-zero scores, rounded to one decimal.
fn rounded_mean(data: &[&Insight], score: Score) -> f64 {
    let values: Vec<f64> = data.iter().filter_map(|i| averageable(score.of(i))).collect();
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Most frequent trimmed, non-blank value; ties go to the one seen first.
fn most_frequent<'a>(values: impl Iterator<Item = Option<&'a str>>) -> String {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, value) in values.flatten().map(str::trim).filter(|v| !v.is_empty()).enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value.to_string())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}
