use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Recommended extra water per full 30 minutes of training
pub const WATER_PER_WORKOUT_ML: u32 = 250;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Run,
    Walk,
    Swim,
    Bike,
    Yoga,
    Power,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 6] = [
        WorkoutType::Run,
        WorkoutType::Walk,
        WorkoutType::Swim,
        WorkoutType::Bike,
        WorkoutType::Yoga,
        WorkoutType::Power,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Run => "run",
            WorkoutType::Walk => "walk",
            WorkoutType::Swim => "swim",
            WorkoutType::Bike => "bike",
            WorkoutType::Yoga => "yoga",
            WorkoutType::Power => "power",
        }
    }

    /// kcal burned per minute
    pub fn calories_per_minute(&self) -> u32 {
        match self {
            WorkoutType::Run => 12,
            WorkoutType::Walk => 4,
            WorkoutType::Swim => 9,
            WorkoutType::Bike => 6,
            WorkoutType::Yoga => 3,
            WorkoutType::Power => 7,
        }
    }

    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown workout type '{}'. Supported types: {}",
                    s.trim(),
                    Self::supported()
                ))
            })
    }
}

/// Extra water suggested after a workout: 250 ml per full half hour.
pub fn recommended_water_ml(duration_minutes: u32) -> u32 {
    (duration_minutes / 30) * WATER_PER_WORKOUT_ML
}
