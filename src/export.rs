//! CSV export of filtered insights.

use crate::error::Result;
use crate::insight::Insight;
use chrono::NaiveDate;
use std::io::Write;

pub const DEFAULT_EXPORT_LIMIT: usize = 1000;

pub const CSV_HEADERS: [&str; 15] = [
    "ID",
    "Title",
    "Topic",
    "Sector",
    "Region",
    "Country",
    "Intensity",
    "Likelihood",
    "Relevance",
    "PESTLE",
    "Start Year",
    "End Year",
    "Added",
    "Published",
    "Source",
];

/// Writes a header row then one row per insight. Absent text becomes an
/// empty field, absent scores become `0`.
pub fn write_csv<W: Write>(writer: W, data: &[&Insight]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADERS)?;

    for insight in data {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        csv.write_record([
            insight.id.clone(),
            text(&insight.title),
            text(&insight.topic),
            text(&insight.sector),
            text(&insight.region),
            text(&insight.country),
            insight.intensity_or_zero().to_string(),
            insight.likelihood_or_zero().to_string(),
            insight.relevance_or_zero().to_string(),
            text(&insight.pestle),
            text(&insight.start_year),
            text(&insight.end_year),
            text(&insight.added),
            text(&insight.published),
            text(&insight.source),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

pub fn to_csv_string(data: &[&Insight]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, data)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// `insights-data-YYYY-MM-DD.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("insights-data-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_quotes_and_defaults() {
        let data = vec![Insight {
            id: "id-0".into(),
            title: Some(r#"Oil "shock", revisited"#.into()),
            topic: Some("oil".into()),
            intensity: Some(6.0),
            ..Default::default()
        }];
        let refs: Vec<&Insight> = data.iter().collect();

        let csv = to_csv_string(&refs).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Title,Topic,Sector,Region,Country,Intensity,Likelihood,Relevance,PESTLE,Start Year,End Year,Added,Published,Source"
        );
        assert_eq!(
            lines.next().unwrap(),
            r#"id-0,"Oil ""shock"", revisited",oil,,,,6,0,0,,,,,,"#
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_header_only_for_empty_input() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "insights-data-2024-03-07.csv");
    }
}
