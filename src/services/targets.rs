//! Daily water and calorie goals derived from body metrics.

use crate::models::profile::BodyMetrics;

pub const WATER_PER_KG_ML: f64 = 35.0;
pub const WATER_PER_ACTIVITY_ML: f64 = 400.0;
pub const WATER_HOT_WEATHER_ML: f64 = 350.0;
pub const HOT_WEATHER_THRESHOLD_C: f64 = 26.0;

/// Used whenever the weather provider has no answer
pub const DEFAULT_TEMPERATURE_C: f64 = 20.0;

/// `35 ml/kg + 400 ml per full 30 activity minutes + 350 ml at >= 26 °C`.
pub fn water_target(metrics: &BodyMetrics, temperature_c: f64) -> f64 {
    let base = metrics.weight_kg * WATER_PER_KG_ML;
    let activity_bonus = f64::from(metrics.activity_minutes / 30) * WATER_PER_ACTIVITY_ML;
    let heat_bonus = if temperature_c >= HOT_WEATHER_THRESHOLD_C {
        WATER_HOT_WEATHER_ML
    } else {
        0.0
    };
    base + activity_bonus + heat_bonus
}

/// Mifflin-St Jeor without the sex term, plus 4.2 kcal per activity minute.
pub fn calorie_target(metrics: &BodyMetrics) -> f64 {
    let base = 10.0 * metrics.weight_kg + 6.25 * metrics.height_cm
        - 5.0 * f64::from(metrics.age_years);
    let activity_bonus = f64::from(metrics.activity_minutes) * 4.2;
    base + activity_bonus
}
