use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::error::{AppError, AppResult};
use crate::models::day_record::DayRecord;
use crate::models::profile::BodyMetrics;
use crate::services::targets::DEFAULT_TEMPERATURE_C;

pub const MAX_HISTORY_DAYS: u32 = 30;

/// Day records of a single profile, keyed by local calendar date.
#[derive(Debug, Clone, Default)]
pub struct DayRecordStore {
    records: BTreeMap<NaiveDate, DayRecord>,
}

impl DayRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.records.get(&date)
    }

    pub fn get_mut(&mut self, date: NaiveDate) -> Option<&mut DayRecord> {
        self.records.get_mut(&date)
    }

    /// Returns the record for `date`, creating it on first access.
    ///
    /// `temperature` is consulted only when the record is created; `None`
    /// falls back to 20 °C. An existing record is returned untouched.
    pub fn get_or_create<F>(
        &mut self,
        date: NaiveDate,
        metrics: &BodyMetrics,
        temperature: F,
    ) -> &mut DayRecord
    where
        F: FnOnce() -> Option<f64>,
    {
        self.records.entry(date).or_insert_with(|| {
            let temperature_c = temperature().unwrap_or_else(|| {
                tracing::debug!(date = %date, "No temperature available, using default");
                DEFAULT_TEMPERATURE_C
            });

            let mut record = DayRecord::new(date);
            record.apply_targets(metrics, temperature_c);
            tracing::debug!(date = %date, temperature_c, "Day record created");
            record
        })
    }

    /// Recomputes the goals of an existing record for a new temperature.
    pub fn recalculate_targets(
        &mut self,
        date: NaiveDate,
        metrics: &BodyMetrics,
        temperature_c: f64,
    ) -> AppResult<&DayRecord> {
        let record = self
            .records
            .get_mut(&date)
            .ok_or_else(|| AppError::NotFound(format!("No day record for {date}")))?;
        record.apply_targets(metrics, temperature_c);
        Ok(record)
    }

    /// Records of the `days_back` days ending at `end`, oldest first.
    /// Days without a record are skipped.
    pub fn range(&self, end: NaiveDate, days_back: u32) -> AppResult<Vec<&DayRecord>> {
        if !(1..=MAX_HISTORY_DAYS).contains(&days_back) {
            return Err(AppError::Validation(format!(
                "History period must be between 1 and {MAX_HISTORY_DAYS} days"
            )));
        }
        let start = end - Duration::days(i64::from(days_back) - 1);
        Ok(self.records.range(start..=end).map(|(_, r)| r).collect())
    }
}
