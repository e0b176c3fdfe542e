use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::profile::BodyMetrics;
use crate::models::workout::{recommended_water_ml, WorkoutType};
use crate::services::targets;

/// Longest single workout accepted, one full day
pub const MAX_WORKOUT_MINUTES: u32 = 1440;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealEntry {
    pub name: String,
    pub weight_grams: f64,
    pub calories: f64,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutEntry {
    pub workout_type: WorkoutType,
    pub duration_minutes: u32,
    pub calories_burned: u32,
    pub timestamp: NaiveDateTime,
}

/// One calendar day of intake, training and the goals they are measured against.
///
/// Meal and workout logs are append-only; entries are never edited once
/// recorded and stay in the order they were logged.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub water_consumed_ml: f64,
    pub calories_eaten: f64,
    pub calories_burned: f64,
    pub water_target_ml: f64,
    pub calorie_target_kcal: f64,
    pub temperature_c: f64,
    meals: Vec<MealEntry>,
    workouts: Vec<WorkoutEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkoutLogged {
    #[serde(flatten)]
    pub entry: WorkoutEntry,
    pub recommended_water_ml: u32,
}

impl DayRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            water_consumed_ml: 0.0,
            calories_eaten: 0.0,
            calories_burned: 0.0,
            water_target_ml: 0.0,
            calorie_target_kcal: 0.0,
            temperature_c: 0.0,
            meals: Vec::new(),
            workouts: Vec::new(),
        }
    }

    pub fn meals(&self) -> &[MealEntry] {
        &self.meals
    }

    pub fn workouts(&self) -> &[WorkoutEntry] {
        &self.workouts
    }

    /// Overwrites both goals and the temperature they were computed for.
    pub fn apply_targets(&mut self, metrics: &BodyMetrics, temperature_c: f64) {
        self.water_target_ml = targets::water_target(metrics, temperature_c);
        self.calorie_target_kcal = targets::calorie_target(metrics);
        self.temperature_c = temperature_c;
    }

    pub fn log_water(&mut self, amount_ml: f64) -> AppResult<()> {
        if !amount_ml.is_finite() || amount_ml <= 0.0 {
            return Err(AppError::Validation(
                "Water amount must be a positive number of ml".into(),
            ));
        }
        self.water_consumed_ml += amount_ml;
        Ok(())
    }

    pub fn log_meal(
        &mut self,
        name: &str,
        weight_grams: f64,
        calories_per_100g: f64,
        at: NaiveDateTime,
    ) -> AppResult<MealEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Meal name cannot be empty".into()));
        }
        if !weight_grams.is_finite() || weight_grams <= 0.0 {
            return Err(AppError::Validation(
                "Meal weight must be a positive number of grams".into(),
            ));
        }
        if !calories_per_100g.is_finite() || calories_per_100g < 0.0 {
            return Err(AppError::Validation(
                "Calories per 100 g cannot be negative".into(),
            ));
        }

        let entry = MealEntry {
            name: name.to_string(),
            weight_grams,
            calories: calories_per_100g * weight_grams / 100.0,
            timestamp: at,
        };
        self.calories_eaten += entry.calories;
        self.meals.push(entry.clone());
        Ok(entry)
    }

    pub fn log_workout(
        &mut self,
        workout_type: WorkoutType,
        duration_minutes: u32,
        at: NaiveDateTime,
    ) -> AppResult<WorkoutLogged> {
        if duration_minutes == 0 {
            return Err(AppError::Validation(
                "Workout duration must be at least 1 minute".into(),
            ));
        }
        if duration_minutes > MAX_WORKOUT_MINUTES {
            return Err(AppError::Validation(format!(
                "Workout duration cannot exceed {MAX_WORKOUT_MINUTES} minutes"
            )));
        }

        let calories_burned = workout_type.calories_per_minute() * duration_minutes;
        let entry = WorkoutEntry {
            workout_type,
            duration_minutes,
            calories_burned,
            timestamp: at,
        };

        self.calories_burned += f64::from(calories_burned);
        self.credit_workout_to_water_target(calories_burned);
        self.workouts.push(entry.clone());

        Ok(WorkoutLogged {
            entry,
            recommended_water_ml: recommended_water_ml(duration_minutes),
        })
    }

    /// Adds burned kcal to the *water* goal.
    ///
    /// Long-standing behavior kept as-is: exercise calories end up in the
    /// hydration target rather than a calorie field. Change it here only.
    pub fn credit_workout_to_water_target(&mut self, calories_burned: u32) {
        self.water_target_ml += f64::from(calories_burned);
    }

    pub fn water_remaining_ml(&self) -> f64 {
        (self.water_target_ml - self.water_consumed_ml).max(0.0)
    }

    /// eaten - target - burned
    pub fn calorie_balance(&self) -> f64 {
        self.calories_eaten - self.calorie_target_kcal - self.calories_burned
    }
}

#[derive(Debug, Deserialize)]
pub struct LogWaterRequest {
    pub amount_ml: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogMealRequest {
    #[validate(length(min = 1, max = 200, message = "Meal name must be 1-200 characters"))]
    pub name: String,
    pub weight_grams: f64,
    pub calories_per_100g: f64,
}

#[derive(Debug, Deserialize)]
pub struct LogWorkoutRequest {
    pub workout_type: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        date().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn metrics() -> BodyMetrics {
        BodyMetrics {
            weight_kg: 70.0,
            height_cm: 175.0,
            age_years: 30,
            activity_minutes: 45,
            city: "Moscow".into(),
        }
    }

    fn seeded() -> DayRecord {
        let mut record = DayRecord::new(date());
        record.apply_targets(&metrics(), 20.0);
        record
    }

    #[test]
    fn test_new_record_is_zeroed() {
        let record = DayRecord::new(date());
        assert_eq!(record.water_consumed_ml, 0.0);
        assert_eq!(record.calories_eaten, 0.0);
        assert_eq!(record.calories_burned, 0.0);
        assert!(record.meals().is_empty());
        assert!(record.workouts().is_empty());
    }

    #[test]
    fn test_apply_targets() {
        let record = seeded();
        assert_eq!(record.water_target_ml, 70.0 * 35.0 + 400.0);
        assert_eq!(record.temperature_c, 20.0);
        assert!(record.calorie_target_kcal > 0.0);
    }

    #[test]
    fn test_log_water_accumulates() {
        let mut record = seeded();
        record.log_water(250.0).unwrap();
        record.log_water(500.0).unwrap();
        assert_eq!(record.water_consumed_ml, 750.0);
    }

    #[test]
    fn test_log_water_rejects_non_positive() {
        let mut record = seeded();
        for bad in [0.0, -100.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(record.log_water(bad), Err(AppError::Validation(_))));
        }
        assert_eq!(record.water_consumed_ml, 0.0);
    }

    #[test]
    fn test_log_meal_computes_calories() {
        let mut record = seeded();
        let entry = record.log_meal("Pasta", 150.0, 200.0, at(12, 30)).unwrap();
        assert_eq!(entry.calories, 300.0);
        assert_eq!(record.calories_eaten, 300.0);
        assert_eq!(record.meals().len(), 1);
        assert_eq!(record.meals()[0], entry);
    }

    #[test]
    fn test_log_meal_preserves_order() {
        let mut record = seeded();
        record.log_meal("Oats", 80.0, 370.0, at(8, 0)).unwrap();
        record.log_meal("Apple", 150.0, 52.0, at(11, 0)).unwrap();
        record.log_meal("Soup", 300.0, 40.0, at(19, 0)).unwrap();
        let names: Vec<_> = record.meals().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Oats", "Apple", "Soup"]);
    }

    #[test]
    fn test_log_meal_rejects_bad_input_without_mutation() {
        let mut record = seeded();
        assert!(record.log_meal("  ", 100.0, 100.0, at(9, 0)).is_err());
        assert!(record.log_meal("Rice", 0.0, 100.0, at(9, 0)).is_err());
        assert!(record.log_meal("Rice", 100.0, -1.0, at(9, 0)).is_err());
        assert_eq!(record.calories_eaten, 0.0);
        assert!(record.meals().is_empty());
    }

    #[test]
    fn test_log_workout_run() {
        let mut record = seeded();
        let target_before = record.water_target_ml;

        let logged = record.log_workout(WorkoutType::Run, 45, at(7, 0)).unwrap();

        assert_eq!(logged.entry.calories_burned, 540);
        assert_eq!(logged.recommended_water_ml, 250);
        assert_eq!(record.water_target_ml, target_before + 540.0);
        assert_eq!(record.calories_burned, 540.0);
        assert_eq!(record.workouts().len(), 1);
    }

    #[test]
    fn test_log_workout_zero_duration_rejected() {
        let mut record = seeded();
        let before = record.clone();
        assert!(record.log_workout(WorkoutType::Walk, 0, at(7, 0)).is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn test_log_workout_oversized_duration_rejected() {
        let mut record = seeded();
        let before = record.clone();
        let err = record
            .log_workout(WorkoutType::Run, 400_000_000, at(7, 0))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(record
            .log_workout(WorkoutType::Run, MAX_WORKOUT_MINUTES + 1, at(7, 0))
            .is_err());
        assert_eq!(record, before);

        let logged = record
            .log_workout(WorkoutType::Run, MAX_WORKOUT_MINUTES, at(7, 0))
            .unwrap();
        assert_eq!(logged.entry.calories_burned, 12 * 1440);
    }

    #[test]
    fn test_calorie_target_unaffected_by_logging() {
        let mut record = seeded();
        let calorie_target = record.calorie_target_kcal;
        record.log_meal("Bread", 100.0, 250.0, at(8, 0)).unwrap();
        record.log_workout(WorkoutType::Swim, 30, at(9, 0)).unwrap();
        record.log_water(300.0).unwrap();
        assert_eq!(record.calorie_target_kcal, calorie_target);
    }

    #[test]
    fn test_water_remaining_never_negative() {
        let mut record = seeded();
        record.log_water(10_000.0).unwrap();
        assert_eq!(record.water_remaining_ml(), 0.0);
    }

    #[test]
    fn test_calorie_balance() {
        let mut record = seeded();
        record.log_meal("Pizza", 100.0, 1000.0, at(13, 0)).unwrap();
        record.log_workout(WorkoutType::Yoga, 10, at(18, 0)).unwrap();
        let expected = 1000.0 - record.calorie_target_kcal - 30.0;
        assert!((record.calorie_balance() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_serialized_shape() {
        let mut record = seeded();
        record.log_workout(WorkoutType::Bike, 30, at(7, 15)).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2026-02-10");
        assert_eq!(json["workouts"][0]["workout_type"], "bike");
        assert_eq!(json["workouts"][0]["calories_burned"], 180);
        assert!(json["meals"].as_array().unwrap().is_empty());
    }
}
