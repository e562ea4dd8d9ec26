//! Catalog summary statistics shown in the page header.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;

use crate::catalog::VideoRecord;
use crate::{IndexError, Result};

/// Input format of record dates.
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Display format of date range endpoints, e.g. "November 2019".
const MONTH_YEAR_FORMAT: &str = "%B %Y";

/// Counts and date range across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub video_count: usize,
    /// Distinct topic strings across all records
    pub topic_count: usize,
    /// Distinct `sutta_id` values across all records
    pub sutta_count: usize,
    /// `None` when no record carries a date
    pub date_range: Option<DateRange>,
}

/// Earliest and latest publication dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl CatalogStats {
    /// Collects statistics for `records`.
    ///
    /// # Errors
    /// - `IndexError::InvalidDate` - Earliest or latest date is not `YYYY-MM-DD`
    pub fn collect(records: &[VideoRecord]) -> Result<Self> {
        let topics: HashSet<&str> = records
            .iter()
            .flat_map(|record| record.topics.iter().map(String::as_str))
            .collect();

        let suttas: HashSet<&str> = records
            .iter()
            .flat_map(|record| record.sutta_refs.iter().map(|s| s.sutta_id.as_str()))
            .collect();

        Ok(Self {
            video_count: records.len(),
            topic_count: topics.len(),
            sutta_count: suttas.len(),
            date_range: DateRange::from_dates(records.iter().filter_map(VideoRecord::known_date))?,
        })
    }
}

impl DateRange {
    /// Finds the range of ISO dates.
    ///
    /// ISO dates sort correctly as strings, so only the two endpoints are
    /// parsed.
    ///
    /// # Errors
    /// - `IndexError::InvalidDate` - An endpoint is not a valid `YYYY-MM-DD` date
    pub fn from_dates<'a, I>(dates: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sorted: Vec<&str> = dates.into_iter().collect();
        sorted.sort_unstable();

        let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
            return Ok(None);
        };

        Ok(Some(Self {
            earliest: parse_date(first)?,
            latest: parse_date(last)?,
        }))
    }

    /// Earliest date as "Month YYYY".
    pub fn earliest_label(&self) -> String {
        self.earliest.format(MONTH_YEAR_FORMAT).to_string()
    }

    /// Latest date as "Month YYYY".
    pub fn latest_label(&self) -> String {
        self.latest.format(MONTH_YEAR_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.earliest_label(), self.latest_label())
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| IndexError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::catalog::parse_records;

    fn records(values: Vec<serde_json::Value>) -> Vec<VideoRecord> {
        parse_records(values).unwrap()
    }

    #[test]
    fn test_date_range_sorts_before_picking_endpoints() {
        let range = DateRange::from_dates(["2021-03-05", "2019-11-02", "2020-01-01"])
            .unwrap()
            .unwrap();

        assert_eq!(range.earliest, NaiveDate::from_ymd_opt(2019, 11, 2).unwrap());
        assert_eq!(range.latest, NaiveDate::from_ymd_opt(2021, 3, 5).unwrap());
        assert_eq!(range.earliest_label(), "November 2019");
        assert_eq!(range.latest_label(), "March 2021");
        assert_eq!(range.to_string(), "November 2019 – March 2021");
    }

    #[test]
    fn test_single_date_range() {
        let range = DateRange::from_dates(["2018-07-15"]).unwrap().unwrap();
        assert_eq!(range.to_string(), "July 2018 – July 2018");
    }

    #[test]
    fn test_no_dates_gives_no_range() {
        assert_eq!(DateRange::from_dates(std::iter::empty()).unwrap(), None);
    }

    #[test]
    fn test_invalid_endpoint_date_fails() {
        let error = DateRange::from_dates(["2020-01-01", "someday"]).unwrap_err();
        assert!(matches!(error, IndexError::InvalidDate { value } if value == "someday"));
    }

    #[test]
    fn test_collect_counts_distinct_values() {
        let catalog = records(vec![
            json!({
                "title": "A", "youtube_url": "a", "date": "2020-05-01",
                "topics": ["metta", "metta", "jhana"],
                "sutta_refs": [{"sutta_id": "MN 1"}, {"sutta_id": "MN 2"}]
            }),
            json!({
                "title": "B", "youtube_url": "b", "date": "",
                "topics": ["jhana", "karma"],
                "sutta_refs": [{"sutta_id": "MN 2"}]
            }),
            json!({"title": "C", "youtube_url": "c"}),
        ]);

        let stats = CatalogStats::collect(&catalog).unwrap();

        assert_eq!(stats.video_count, 3);
        assert_eq!(stats.topic_count, 3);
        assert_eq!(stats.sutta_count, 2);
        assert_eq!(
            stats.date_range.map(|r| r.to_string()),
            Some("May 2020 – May 2020".to_string())
        );
    }

    #[test]
    fn test_collect_without_dates() {
        let catalog = records(vec![json!({"title": "A", "youtube_url": "a"})]);

        let stats = CatalogStats::collect(&catalog).unwrap();
        assert_eq!(stats.date_range, None);
    }

    fn topic_record(topics: &[String], suttas: &[String]) -> serde_json::Value {
        let refs: Vec<_> = suttas.iter().map(|id| json!({"sutta_id": id})).collect();
        json!({"title": "T", "youtube_url": "U", "topics": topics, "sutta_refs": refs})
    }

    proptest! {
        #[test]
        fn topic_and_sutta_counts_match_distinct_values(
            catalog in prop::collection::vec(
                (
                    prop::collection::vec("[a-d]{1,2}", 0..5),
                    prop::collection::vec("(MN|SN) [1-9]", 0..4),
                ),
                0..8
            )
        ) {
            let values = catalog
                .iter()
                .map(|(topics, suttas)| topic_record(topics, suttas))
                .collect();
            let parsed = records(values);

            let expected_topics: HashSet<&String> =
                catalog.iter().flat_map(|(topics, _)| topics).collect();
            let expected_suttas: HashSet<&String> =
                catalog.iter().flat_map(|(_, suttas)| suttas).collect();

            let stats = CatalogStats::collect(&parsed).unwrap();

            prop_assert_eq!(stats.video_count, catalog.len());
            prop_assert_eq!(stats.topic_count, expected_topics.len());
            prop_assert_eq!(stats.sutta_count, expected_suttas.len());
        }

        #[test]
        fn date_range_endpoints_are_min_and_max(
            dates in prop::collection::vec((2000i32..2030, 1u32..=12, 1u32..=28), 1..10)
        ) {
            let formatted: Vec<String> = dates
                .iter()
                .map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
                .collect();

            let range = DateRange::from_dates(formatted.iter().map(String::as_str))
                .unwrap()
                .unwrap();

            let parsed: Vec<NaiveDate> = dates
                .iter()
                .map(|(y, m, d)| NaiveDate::from_ymd_opt(*y, *m, *d).unwrap())
                .collect();

            prop_assert_eq!(Some(&range.earliest), parsed.iter().min());
            prop_assert_eq!(Some(&range.latest), parsed.iter().max());
        }
    }
}
