//! Alignment of sparse daily records into a contiguous daily timeline.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::domain::{DailyRecord, Metric, NormalizedPoint};

/// Daily records indexed by date.
#[derive(Debug, Clone, Default)]
pub struct RecordBook {
    records: BTreeMap<NaiveDate, DailyRecord>,
}

impl RecordBook {
    /// Builds a book from unsorted records.
    pub fn from_records(records: &[DailyRecord]) -> Self {
        let mut book = BTreeMap::new();
        for record in records {
            // If multiple records share a date, use the last one
            book.insert(record.date, record.clone());
        }
        Self { records: book }
    }

    /// Returns the record for a date.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.records.get(&date)
    }

    /// Returns records in `[start, end]`, in date order.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = &DailyRecord> {
        self.records
            .range(start..)
            .take_while(move |(d, _)| **d <= end)
            .map(|(_, r)| r)
    }

    /// Number of distinct dates.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records on which `metric` was logged.
    pub fn count(&self, metric: Metric) -> usize {
        self.records
            .values()
            .filter(|r| match metric {
                Metric::Weight => r.observed_weight().is_some(),
                _ => metric.value_of(r).is_some(),
            })
            .count()
    }

    /// Returns the overall date range.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.records
            .keys()
            .next()
            .copied()
            .zip(self.records.keys().next_back().copied())
    }

    /// Weight observations sorted by date.
    pub fn weight_observations(&self) -> Vec<(NaiveDate, f64)> {
        self.records
            .values()
            .filter_map(|r| r.observed_weight().map(|w| (r.date, w)))
            .collect()
    }
}

/// Normalizes records into one point per day between the first and last weight
/// observation, inclusive.
///
/// Days without a record get `weight = None` and no drivers. Returns an empty
/// series when no record carries a weight.
pub fn normalize(records: &[DailyRecord]) -> Vec<NormalizedPoint> {
    normalize_book(&RecordBook::from_records(records))
}

/// Normalizes an already indexed record book. See [`normalize`].
pub fn normalize_book(book: &RecordBook) -> Vec<NormalizedPoint> {
    let weights = book.weight_observations();
    let (Some(&(first_date, _)), Some(&(last_date, _))) = (weights.first(), weights.last()) else {
        return Vec::new();
    };

    let days_between = (last_date - first_date).num_days();

    (0..=days_between)
        .map(|offset| {
            let date = first_date + Duration::days(offset);
            match book.get(date) {
                Some(record) => NormalizedPoint {
                    date,
                    weight: record.observed_weight(),
                    drivers: Some(record.drivers_or_zero()),
                },
                None => NormalizedPoint {
                    date,
                    weight: None,
                    drivers: None,
                },
            }
        })
        .collect()
}
