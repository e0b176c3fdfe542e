use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::models::day_record::DayRecord;
use crate::services::day_store::DayRecordStore;
use crate::services::targets;

pub type UserId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyMetrics {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub activity_minutes: u32,
    pub city: String,
}

/// A user's body metrics together with every day they have logged.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user_id: UserId,
    pub metrics: BodyMetrics,
    days: DayRecordStore,
}

impl UserProfile {
    pub fn new(user_id: UserId, metrics: BodyMetrics) -> Self {
        Self {
            user_id,
            metrics,
            days: DayRecordStore::new(),
        }
    }

    pub fn water_target(&self, temperature_c: f64) -> f64 {
        targets::water_target(&self.metrics, temperature_c)
    }

    pub fn calorie_target(&self) -> f64 {
        targets::calorie_target(&self.metrics)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(date)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut DayRecord> {
        self.days.get_mut(date)
    }

    pub fn days_logged(&self) -> usize {
        self.days.len()
    }

    /// Today's record, created on first access. `temperature` receives the
    /// profile's city and is only called when a record has to be created.
    pub fn get_or_create_today<F>(&mut self, today: NaiveDate, temperature: F) -> &mut DayRecord
    where
        F: FnOnce(&str) -> Option<f64>,
    {
        let city = &self.metrics.city;
        self.days
            .get_or_create(today, &self.metrics, || temperature(city))
    }

    pub fn recalculate_targets(
        &mut self,
        today: NaiveDate,
        temperature_c: f64,
    ) -> AppResult<&DayRecord> {
        self.days
            .recalculate_targets(today, &self.metrics, temperature_c)
    }

    pub fn summarize_range(&self, today: NaiveDate, days_back: u32) -> AppResult<Vec<&DayRecord>> {
        self.days.range(today, days_back)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(range(min = 1.0, max = 500.0, message = "Weight must be 1-500 kg"))]
    pub weight_kg: f64,

    #[validate(range(min = 30.0, max = 300.0, message = "Height must be 30-300 cm"))]
    pub height_cm: f64,

    #[validate(range(min = 1, max = 150, message = "Age must be 1-150 years"))]
    pub age_years: u32,

    #[validate(range(max = 1440, message = "Activity cannot exceed 1440 minutes a day"))]
    pub activity_minutes: u32,

    #[validate(
        length(min = 1, max = 100, message = "City must be 1-100 characters"),
        custom = "not_blank"
    )]
    pub city: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("City cannot be blank".into());
        return Err(err);
    }
    Ok(())
}

impl UpsertProfileRequest {
    pub fn into_metrics(self) -> BodyMetrics {
        BodyMetrics {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age_years: self.age_years,
            activity_minutes: self.activity_minutes,
            city: self.city.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user_id: UserId,
    #[serde(flatten)]
    pub metrics: BodyMetrics,
    pub calorie_target_kcal: f64,
    pub days_logged: usize,
}

impl From<&UserProfile> for ProfileView {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.user_id,
            metrics: profile.metrics.clone(),
            calorie_target_kcal: profile.calorie_target(),
            days_logged: profile.days_logged(),
        }
    }
}
