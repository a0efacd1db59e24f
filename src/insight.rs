//! Insight record model.
//!
//! The backing file carries no schema, so every field decodes leniently:
//! empty strings and nulls become `None`, years may arrive as numbers,
//! scores may arrive as numeric strings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Assigned by the loader (`id-<index>`) when the file omits it.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub end_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_year: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub intensity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub likelihood: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub relevance: Option<f64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pestle: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub swot: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub impact: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub added: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub published: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub insight: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

impl Insight {
    pub fn intensity_or_zero(&self) -> f64 {
        self.intensity.unwrap_or(0.0)
    }

    pub fn likelihood_or_zero(&self) -> f64 {
        self.likelihood.unwrap_or(0.0)
    }

    pub fn relevance_or_zero(&self) -> f64 {
        self.relevance.unwrap_or(0.0)
    }
}

/// Keeps a score only when it counts toward an average: present and non-zero.
pub fn averageable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_blackcoffer_style_record() {
        let raw = json!({
            "end_year": "",
            "intensity": 6,
            "sector": "Energy",
            "topic": "gas",
            "insight": "Annual Energy Outlook",
            "url": "http://www.eia.gov/outlooks/aeo/",
            "region": "Northern America",
            "start_year": "",
            "impact": "",
            "added": "January, 20 2017 03:51:25",
            "published": "January, 09 2017 00:00:00",
            "country": "United States of America",
            "relevance": 2,
            "pestle": "Industries",
            "source": "EIA",
            "title": "U.S. natural gas consumption is expected to increase during much of the projection period.",
            "likelihood": 3
        });

        let insight: Insight = serde_json::from_value(raw).unwrap();
        assert_eq!(insight.id, "");
        assert_eq!(insight.end_year, None);
        assert_eq!(insight.impact, None);
        assert_eq!(insight.intensity, Some(6.0));
        assert_eq!(insight.region.as_deref(), Some("Northern America"));
        assert_eq!(insight.swot, None);
    }

    #[test]
    fn test_lenient_numbers_and_years() {
        let raw = json!({
            "id": 17,
            "end_year": 2027,
            "intensity": "4",
            "likelihood": "",
            "relevance": null,
            "topic": ["not", "a", "string"]
        });

        let insight: Insight = serde_json::from_value(raw).unwrap();
        assert_eq!(insight.id, "17");
        assert_eq!(insight.end_year.as_deref(), Some("2027"));
        assert_eq!(insight.intensity, Some(4.0));
        assert_eq!(insight.likelihood, None);
        assert_eq!(insight.relevance, None);
        assert_eq!(insight.topic, None);
        assert_eq!(insight.likelihood_or_zero(), 0.0);
    }

    #[test]
    fn test_averageable_drops_zero() {
        assert_eq!(averageable(Some(0.0)), None);
        assert_eq!(averageable(None), None);
        assert_eq!(averageable(Some(2.5)), Some(2.5));
    }
}
