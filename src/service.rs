//! Insight service - the object handed to request handlers.
//!
//! Owns the dataset loader and runs every operation through the same
//! filter predicate, so listing, charts, stats and export never disagree
//! about which records a set of criteria selects.

use crate::aggregate::{ChartData, ChartKind};
use crate::error::Result;
use crate::export;
use crate::filter::FilterCriteria;
use crate::insight::Insight;
use crate::loader::DatasetLoader;
use crate::options::FilterOptions;
use crate::pagination::paginate;
use crate::stats::{summarize, StatsSummary};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub data: Vec<Insight>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub message: String,
    pub record_count: usize,
    pub sample_record: Option<Insight>,
}

#[derive(Debug)]
pub struct InsightService {
    loader: DatasetLoader,
}

impl InsightService {
    pub fn new(loader: DatasetLoader) -> Self {
        Self { loader }
    }

    /// True once the dataset read has been attempted, successful or not.
    pub fn is_loaded(&self) -> bool {
        self.loader.is_initialized()
    }

    pub fn dataset(&self) -> Result<Arc<[Insight]>> {
        self.loader.dataset()
    }

    pub fn list(&self, criteria: &FilterCriteria, page: usize, limit: usize) -> Result<Listing> {
        let data = self.dataset()?;
        let filtered = criteria.apply(&data);
        let page = paginate(&filtered, page, limit);
        debug!(
            "Listing page {} ({} of {} matching insights)",
            page.page,
            page.items.len(),
            page.total
        );

        Ok(Listing {
            data: page.items.into_iter().map(|i| (*i).clone()).collect(),
            total: page.total,
            page: page.page,
            limit: page.page_size,
        })
    }

    pub fn chart(&self, criteria: &FilterCriteria, kind: ChartKind) -> Result<ChartData> {
        let data = self.dataset()?;
        let filtered = criteria.apply(&data);
        debug!("Computing {} over {} insights", kind, filtered.len());
        Ok(kind.compute(&filtered))
    }

    pub fn stats(&self, criteria: &FilterCriteria) -> Result<StatsSummary> {
        let data = self.dataset()?;
        let filtered = criteria.apply(&data);
        Ok(summarize(&filtered, data.len()))
    }

    pub fn filter_options(&self) -> Result<FilterOptions> {
        let data = self.dataset()?;
        Ok(FilterOptions::discover(&data))
    }

    /// CSV of the filtered records on the requested page.
    pub fn export_csv(&self, criteria: &FilterCriteria, page: usize, limit: usize) -> Result<String> {
        let data = self.dataset()?;
        let filtered = criteria.apply(&data);
        let page = paginate(&filtered, page, limit);
        let rows: Vec<&Insight> = page.items.into_iter().copied().collect();
        export::to_csv_string(&rows)
    }

    /// Fails when the dataset could not be loaded or holds no records.
    pub fn health(&self) -> std::result::Result<HealthReport, String> {
        let data = self.dataset().map_err(|e| e.to_string())?;
        if data.is_empty() {
            return Err("No data found in JSON file".to_string());
        }

        Ok(HealthReport {
            status: "ok".to_string(),
            message: "Local JSON data loaded successfully".to_string(),
            record_count: data.len(),
            sample_record: data.first().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterField;

    fn service() -> InsightService {
        let data = vec![
            Insight {
                topic: Some("Climate Change".into()),
                region: Some("Asia".into()),
                intensity: Some(4.0),
                ..Default::default()
            },
            Insight {
                topic: Some("Energy".into()),
                region: Some("Asia".into()),
                intensity: Some(6.0),
                ..Default::default()
            },
            Insight {
                topic: Some("climate policy".into()),
                region: Some("EU".into()),
                intensity: Some(10.0),
                ..Default::default()
            },
        ];
        InsightService::new(DatasetLoader::from_records(data))
    }

    #[test]
    fn test_listing_total_matches_filtered_count() {
        let service = service();
        let criteria = FilterCriteria::new().with(FilterField::Topic, "clim");

        let listing = service.list(&criteria, 1, 1).unwrap();
        assert_eq!(listing.total, 2);
        assert_eq!(listing.data.len(), 1);
        assert_eq!(listing.data[0].id, "id-0");

        let stats = service.stats(&criteria).unwrap();
        assert_eq!(stats.total_records, listing.total);
        assert_eq!(stats.total_dataset_size, 3);
        assert_eq!(stats.filtered_percentage, 67);
    }

    #[test]
    fn test_chart_uses_same_filter() {
        let service = service();
        let criteria = FilterCriteria::new().with(FilterField::Topic, "clim");
        let chart = service.chart(&criteria, ChartKind::IntensityByRegion).unwrap();
        assert_eq!(chart.labels, vec!["Asia", "EU"]);
        assert_eq!(chart.datasets[0].data, vec![4.0, 10.0]);
    }

    #[test]
    fn test_export_respects_filter() {
        let service = service();
        let criteria = FilterCriteria::new().with(FilterField::Region, "eu");
        let csv = service.export_csv(&criteria, 1, 1000).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("climate policy"));
    }

    #[test]
    fn test_health() {
        let report = service().health().unwrap();
        assert_eq!(report.status, "ok");
        assert_eq!(report.record_count, 3);

        let empty = InsightService::new(DatasetLoader::from_records(Vec::new()));
        assert!(empty.health().is_err());
    }
}
