use chrono::NaiveDate;
use serde::Serialize;

use crate::models::day_record::DayRecord;

/// Running totals of a day without the individual log entries.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub water_consumed_ml: f64,
    pub water_target_ml: f64,
    pub water_remaining_ml: f64,
    pub calories_eaten: f64,
    pub calorie_target_kcal: f64,
    pub calories_burned: f64,
    pub calorie_balance: f64,
    pub temperature_c: f64,
}

impl From<&DayRecord> for DayTotals {
    fn from(record: &DayRecord) -> Self {
        Self {
            date: record.date,
            water_consumed_ml: record.water_consumed_ml,
            water_target_ml: record.water_target_ml,
            water_remaining_ml: record.water_remaining_ml(),
            calories_eaten: record.calories_eaten,
            calorie_target_kcal: record.calorie_target_kcal,
            calories_burned: record.calories_burned,
            calorie_balance: record.calorie_balance(),
            temperature_c: record.temperature_c,
        }
    }
}

/// A freshly appended log entry plus the day totals after it.
#[derive(Debug, Clone, Serialize)]
pub struct Logged<T> {
    pub entry: T,
    pub totals: DayTotals,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    #[serde(flatten)]
    pub totals: DayTotals,
    pub live_temperature_c: Option<f64>,
    pub targets_recalculated: bool,
}
